//! Core library for GST invoice field extraction.
//!
//! This crate provides:
//! - Text normalization for OCR output (currency markers, whitespace)
//! - GSTIN recognition and structural validation
//! - Keyword-anchored amount location (taxable value, CGST/SGST/IGST, totals)
//! - Aggregation into invoice records with advisory warnings
//! - GSTR-1 B2B CSV export
//! - An OCR collaborator interface with a pure Rust engine

pub mod error;
pub mod export;
pub mod extraction;
pub mod models;
pub mod ocr;
pub mod store;

pub use error::{ExportError, GstrError, OcrError, Result};
pub use export::export_csv;
pub use extraction::{decode_image, extract_fields, unreadable_image, ExtractedFields, InvoiceParser};
pub use models::{GstrConfig, Gstr1B2BRow, InvoiceExtraction, MoneyBreakdown, GSTR1_B2B_HEADERS};
pub use ocr::{OcrEngine, OcrResult, TextBox};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use store::{InMemoryStore, InvoiceRepository, StoreStats, StoredInvoice};
