//! Invoice number and invoice date extraction.
//!
//! Dates are returned exactly as printed: OCR date formats are too
//! unreliable to normalize without review.

use super::patterns::{INVOICE_NUMBER, LABELED_DATE, MONTH_NAME_DATE, NUMERIC_DATE};
use super::{line_of, ExtractionMatch, FieldExtractor};

/// Invoice number extractor (`Invoice No`, `Invoice Number`, `Invoice #`, `Bill No`).
pub struct InvoiceNumberExtractor;

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        INVOICE_NUMBER
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let number = caps[1].trim_end_matches(['-', '/', '_']);
                // "Invoice No: Date ..." style OCR noise has no digit in it
                if !number.chars().any(|c| c.is_ascii_digit()) {
                    return None;
                }
                Some(ExtractionMatch::new(
                    number.to_string(),
                    line_of(text, full_match.start()),
                    full_match.as_str(),
                ))
            })
            .collect()
    }
}

/// Invoice date extractor.
///
/// Tries a `Date` / `Invoice Date` label first, then the first standalone
/// `dd/mm/yyyy` date, then a month-name date such as `12 Jan 2024`.
pub struct InvoiceDateExtractor;

impl InvoiceDateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceDateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Candidates ordered by pattern priority, then by position.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for pattern in [&*LABELED_DATE, &*NUMERIC_DATE, &*MONTH_NAME_DATE] {
            for caps in pattern.captures_iter(text) {
                let Some(date) = caps.get(1) else {
                    continue;
                };
                if results.iter().any(|r| r.value == date.as_str()) {
                    continue;
                }
                results.push(ExtractionMatch::new(
                    date.as_str().to_string(),
                    line_of(text, date.start()),
                    &caps[0],
                ));
            }
        }

        results
    }
}

/// Extract the invoice number from text.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    InvoiceNumberExtractor::new().extract(text).map(|m| m.value)
}

/// Extract the invoice date from text, as printed.
pub fn extract_invoice_date(text: &str) -> Option<String> {
    InvoiceDateExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_number_variants() {
        assert_eq!(
            extract_invoice_number("Invoice No: INV-2024-001"),
            Some("INV-2024-001".to_string())
        );
        assert_eq!(
            extract_invoice_number("Tax Invoice\nInvoice No. 4512"),
            Some("4512".to_string())
        );
        assert_eq!(
            extract_invoice_number("INVOICE NUMBER: GST/24-25/118"),
            Some("GST/24-25/118".to_string())
        );
        assert_eq!(
            extract_invoice_number("Invoice #A19"),
            Some("A19".to_string())
        );
        assert_eq!(
            extract_invoice_number("Bill No - 778"),
            Some("778".to_string())
        );
    }

    #[test]
    fn test_invoice_number_absent() {
        assert_eq!(extract_invoice_number("Tax Invoice\nInvoice Date: 01/02/2024"), None);
        assert_eq!(extract_invoice_number("Invoice No: Original"), None);
        assert_eq!(extract_invoice_number(""), None);
    }

    #[test]
    fn test_invoice_number_label_stays_on_one_line() {
        assert_eq!(extract_invoice_number("TAX INVOICE\nNo 12 items"), None);
        assert_eq!(
            extract_invoice_number("TAX INVOICE\nNo 12 items\nInvoice No: 88"),
            Some("88".to_string())
        );
        assert_eq!(
            extract_invoice_number("Invoice \t No: 4512"),
            Some("4512".to_string())
        );
    }

    #[test]
    fn test_labeled_date() {
        let text = "Invoice No: 12\nInvoice Date: 05/04/2024\nDue 30/04/2024";
        assert_eq!(extract_invoice_date(text), Some("05/04/2024".to_string()));
    }

    #[test]
    fn test_labeled_date_preferred_over_earlier_standalone() {
        let text = "Printed 01-01-2024\nDate: 15-03-24";
        assert_eq!(extract_invoice_date(text), Some("15-03-24".to_string()));
    }

    #[test]
    fn test_standalone_date() {
        assert_eq!(
            extract_invoice_date("Kolkata 21/11/2023 Original copy"),
            Some("21/11/2023".to_string())
        );
    }

    #[test]
    fn test_month_name_date() {
        assert_eq!(
            extract_invoice_date("Dated 12 Jan 2024"),
            Some("12 Jan 2024".to_string())
        );
        assert_eq!(
            extract_invoice_date("Issued on 3 September, 2023"),
            Some("3 September, 2023".to_string())
        );
    }

    #[test]
    fn test_date_absent() {
        assert_eq!(extract_invoice_date("Grand Total 500.00"), None);
    }
}
