//! Common regex patterns for GST invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // GSTIN: state code, PAN (5 letters, 4 digits, 1 letter), entity number, 'Z', check char
    pub static ref GSTIN_PATTERN: Regex = Regex::new(
        r"\b[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9]Z[A-Z0-9]\b"
    ).unwrap();

    pub static ref GSTIN_EXACT: Regex = Regex::new(
        r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9]Z[A-Z0-9]$"
    ).unwrap();

    // Amount tokens: comma-grouped (12,345.67) or plain digits (12345.67)
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"[0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]{1,2})?|[0-9]+(?:\.[0-9]{1,2})?"
    ).unwrap();

    // Normalization
    pub static ref HORIZONTAL_WHITESPACE: Regex = Regex::new(
        r"[ \t\u{00a0}]+"
    ).unwrap();

    // Amount category keywords
    pub static ref INVOICE_TOTAL_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(?:grand\s*total|invoice\s*value|net\s*amount|total\s*amount|amount\s*payable)\b"
    ).unwrap();

    pub static ref TAXABLE_VALUE_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(?:taxable\s*value|taxable\s*amount|sub\s*total)\b"
    ).unwrap();

    pub static ref CGST_KEYWORD: Regex = Regex::new(r"(?i)\bCGST\b").unwrap();

    pub static ref SGST_KEYWORD: Regex = Regex::new(r"(?i)\bSGST\b").unwrap();

    pub static ref IGST_KEYWORD: Regex = Regex::new(r"(?i)\bIGST\b").unwrap();

    pub static ref TOTAL_TAX_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(?:total\s*tax|gst\s*total|total\s*gst)\b"
    ).unwrap();

    // Invoice number patterns
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)\b(?:invoice[ \t]*(?:no\b|number\b|#)|bill[ \t]*no\b)\.?[\s:#\-]*([A-Za-z0-9][A-Za-z0-9/\-_]*)"
    ).unwrap();

    // Invoice date patterns
    pub static ref LABELED_DATE: Regex = Regex::new(
        r"(?i)\b(?:invoice[ \t]*)?date\b[\s.:\-]*([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4})\b"
    ).unwrap();

    pub static ref NUMERIC_DATE: Regex = Regex::new(
        r"\b([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{4})\b"
    ).unwrap();

    pub static ref MONTH_NAME_DATE: Regex = Regex::new(
        r"(?i)\b([0-9]{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s*[0-9]{2,4})\b"
    ).unwrap();
}
