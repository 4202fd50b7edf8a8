//! Keyword-anchored amount location for GST invoices.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::patterns::{
    AMOUNT_TOKEN, CGST_KEYWORD, IGST_KEYWORD, INVOICE_TOTAL_KEYWORDS, SGST_KEYWORD,
    TAXABLE_VALUE_KEYWORDS, TOTAL_TAX_KEYWORDS,
};
use super::{ExtractionMatch, FieldExtractor};

/// Monetary fields located on an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountCategory {
    /// Amount payable including tax.
    InvoiceTotal,
    /// Value before tax.
    TaxableValue,
    /// Central GST.
    Cgst,
    /// State GST.
    Sgst,
    /// Integrated GST.
    Igst,
    /// Sum of all GST components.
    TotalTax,
}

impl AmountCategory {
    /// All categories in extraction order.
    pub const ALL: [AmountCategory; 6] = [
        AmountCategory::InvoiceTotal,
        AmountCategory::TaxableValue,
        AmountCategory::Cgst,
        AmountCategory::Sgst,
        AmountCategory::Igst,
        AmountCategory::TotalTax,
    ];

    /// Case-insensitive keyword pattern that marks a line for this category.
    pub fn keywords(&self) -> &'static Regex {
        match self {
            AmountCategory::InvoiceTotal => &INVOICE_TOTAL_KEYWORDS,
            AmountCategory::TaxableValue => &TAXABLE_VALUE_KEYWORDS,
            AmountCategory::Cgst => &CGST_KEYWORD,
            AmountCategory::Sgst => &SGST_KEYWORD,
            AmountCategory::Igst => &IGST_KEYWORD,
            AmountCategory::TotalTax => &TOTAL_TAX_KEYWORDS,
        }
    }

    /// Whether this is one of the CGST/SGST/IGST components.
    pub fn is_tax_component(&self) -> bool {
        matches!(
            self,
            AmountCategory::Cgst | AmountCategory::Sgst | AmountCategory::Igst
        )
    }
}

impl fmt::Display for AmountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AmountCategory::InvoiceTotal => "invoice total",
            AmountCategory::TaxableValue => "taxable value",
            AmountCategory::Cgst => "CGST",
            AmountCategory::Sgst => "SGST",
            AmountCategory::Igst => "IGST",
            AmountCategory::TotalTax => "total tax",
        };
        f.write_str(label)
    }
}

/// Locates the amount for one category.
///
/// The first line carrying a category keyword wins. Tokens come from that
/// line, or from the next line when the keyword line has none (OCR often
/// wraps the value). Later keyword lines are never consulted, even when the
/// first one yields nothing usable.
pub struct AmountExtractor {
    category: AmountCategory,
}

impl AmountExtractor {
    pub fn new(category: AmountCategory) -> Self {
        Self { category }
    }

    pub fn category(&self) -> AmountCategory {
        self.category
    }

    /// Index of the first line matching the category keywords.
    fn anchor_line(&self, lines: &[&str]) -> Option<usize> {
        let keywords = self.category.keywords();
        lines.iter().position(|line| keywords.is_match(line))
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    /// The rightmost strictly positive amount near the first keyword line.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).pop()
    }

    /// Every strictly positive amount near the first keyword line, in line order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lines: Vec<&str> = text.lines().collect();

        let Some(anchor) = self.anchor_line(&lines) else {
            return Vec::new();
        };

        let mut line_index = anchor;
        let mut tokens = amount_tokens(lines[anchor]);

        if tokens.is_empty() {
            if let Some(next) = lines.get(anchor + 1) {
                line_index = anchor + 1;
                tokens = amount_tokens(next);
            }
        }

        tokens
            .into_iter()
            .filter_map(|token| {
                parse_amount(token)
                    .filter(|amount| amount.is_sign_positive() && !amount.is_zero())
                    .map(|amount| ExtractionMatch::new(amount, line_index, token))
            })
            .collect()
    }
}

/// All amount-shaped tokens on a line, left to right.
pub fn amount_tokens(line: &str) -> Vec<&str> {
    AMOUNT_TOKEN.find_iter(line).map(|m| m.as_str()).collect()
}

/// Parse an amount token, dropping thousands separators ("12,345.67").
pub fn parse_amount(token: &str) -> Option<Decimal> {
    let cleaned = token.replace(',', "");
    Decimal::from_str(&cleaned).ok()
}

/// Locate the amount for `category` in normalized text.
pub fn locate_amount(text: &str, category: AmountCategory) -> Option<Decimal> {
    AmountExtractor::new(category).extract(text).map(|m| m.value)
}
