//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::{decode_image, extract_fields, unreadable_image, ExtractedFields, InvoiceParser};

/// Warning emitted when no GSTIN is found.
pub const WARN_GSTIN_NOT_FOUND: &str = "GSTIN not found";

/// Warning emitted when no invoice total is found.
pub const WARN_INVOICE_TOTAL_NOT_FOUND: &str = "Invoice total not found";

/// Warning emitted when no taxable value is found.
pub const WARN_TAXABLE_VALUE_NOT_FOUND: &str = "Taxable value not found";

/// Warning emitted when an uploaded file cannot be decoded as an image.
pub const WARN_UNREADABLE_IMAGE: &str = "Unsupported file or unreadable image";
