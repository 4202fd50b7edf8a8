//! Invoice extraction records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::extraction::rules::AmountCategory;

/// Monetary breakdown of a GST invoice.
///
/// Every value is optional: OCR noise routinely hides one or more of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoneyBreakdown {
    /// Value before tax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable_value: Option<Decimal>,

    /// Central GST amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgst: Option<Decimal>,

    /// State GST amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sgst: Option<Decimal>,

    /// Integrated GST amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub igst: Option<Decimal>,

    /// Total tax, printed or derived from the components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tax: Option<Decimal>,

    /// Invoice total including tax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_value: Option<Decimal>,

    /// Set when `total_tax` was computed rather than read from the text.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub total_tax_derived: bool,
}

impl MoneyBreakdown {
    /// Value stored for a category.
    pub fn get(&self, category: AmountCategory) -> Option<Decimal> {
        match category {
            AmountCategory::InvoiceTotal => self.invoice_value,
            AmountCategory::TaxableValue => self.taxable_value,
            AmountCategory::Cgst => self.cgst,
            AmountCategory::Sgst => self.sgst,
            AmountCategory::Igst => self.igst,
            AmountCategory::TotalTax => self.total_tax,
        }
    }

    /// Store a value for a category.
    pub fn set(&mut self, category: AmountCategory, value: Option<Decimal>) {
        let slot = match category {
            AmountCategory::InvoiceTotal => &mut self.invoice_value,
            AmountCategory::TaxableValue => &mut self.taxable_value,
            AmountCategory::Cgst => &mut self.cgst,
            AmountCategory::Sgst => &mut self.sgst,
            AmountCategory::Igst => &mut self.igst,
            AmountCategory::TotalTax => &mut self.total_tax,
        };
        *slot = value;
    }

    /// Sum of the CGST/SGST/IGST components that are present.
    pub fn component_sum(&self) -> Option<Decimal> {
        [self.cgst, self.sgst, self.igst]
            .into_iter()
            .flatten()
            .reduce(|acc, v| acc + v)
    }

    /// Fill a missing total tax from its components.
    ///
    /// One-way: a printed total is never split back into components.
    pub fn infer_total_tax(&mut self) {
        if self.total_tax.is_some() {
            return;
        }
        if let Some(sum) = self.component_sum() {
            self.total_tax = Some(sum);
            self.total_tax_derived = true;
        }
    }

    /// Whether no amount was found at all.
    pub fn is_empty(&self) -> bool {
        AmountCategory::ALL.iter().all(|c| self.get(*c).is_none())
    }
}

/// Automatically derived, unreviewed data for one invoice document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceExtraction {
    /// First GSTIN found in the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,

    /// Every distinct GSTIN-shaped token, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gstin_candidates: Vec<String>,

    /// Invoice number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_no: Option<String>,

    /// Invoice date exactly as printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,

    /// Monetary breakdown.
    #[serde(default)]
    pub money: MoneyBreakdown,

    /// Mean OCR region confidence (0.0 - 1.0), if the text came from OCR.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_confidence: Option<f32>,

    /// Human-readable issues found during extraction.
    #[serde(default)]
    pub warnings: Vec<String>,

    /// Text the fields were extracted from.
    pub raw_text: String,
}

impl InvoiceExtraction {
    /// An extraction that carries only a warning, e.g. for an unreadable upload.
    pub fn failed(warning: impl Into<String>) -> Self {
        Self {
            warnings: vec![warning.into()],
            ..Self::default()
        }
    }

    /// Whether extraction produced any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
