//! Rule-based field extractors for GST invoices.

pub mod amounts;
pub mod details;
pub mod gstin;
pub mod normalize;
pub mod patterns;

pub use amounts::{locate_amount, parse_amount, AmountCategory, AmountExtractor};
pub use details::{extract_invoice_date, extract_invoice_number, InvoiceDateExtractor, InvoiceNumberExtractor};
pub use gstin::{find_all_tax_ids, find_tax_id, is_structurally_valid, validate_candidates, GstinExtractor, GstinReport};
pub use normalize::normalize;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A located value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Zero-based index of the line the value was read from.
    pub line: usize,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, line: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            line,
            source: source.into(),
        }
    }
}

/// Zero-based line index of a byte offset in `text`.
pub(crate) fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count()
}
