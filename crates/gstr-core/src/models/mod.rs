//! Data models: extraction records, GSTR-1 rows and configuration.

pub mod config;
pub mod gstr1;
pub mod invoice;

pub use config::GstrConfig;
pub use gstr1::{Gstr1B2BRow, GSTR1_B2B_HEADERS};
pub use invoice::{InvoiceExtraction, MoneyBreakdown};
