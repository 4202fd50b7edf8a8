//! GSTR-1 B2B export rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::extraction::rules::is_structurally_valid;

/// Column headers of the GSTR-1 B2B schedule, in filing order.
pub const GSTR1_B2B_HEADERS: [&str; 13] = [
    "GSTIN/UIN of Recipient",
    "Receiver Name",
    "Invoice Number",
    "Invoice date",
    "Invoice Value",
    "Place Of Supply",
    "Reverse Charge",
    "Applicable % of Tax Rate",
    "Invoice Type",
    "E-Commerce GSTIN",
    "Rate",
    "Taxable Value",
    "Cess Amount",
];

/// Invoice types accepted by the B2B schedule.
pub const INVOICE_TYPES: [&str; 4] = [
    "Regular",
    "SEZ supplies with payment",
    "SEZ supplies without payment",
    "Deemed Exp",
];

/// One reviewed invoice line of the GSTR-1 B2B schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gstr1B2BRow {
    /// GSTIN/UIN of the recipient.
    pub gstin_uin_of_recipient: String,

    /// Receiver (trade) name.
    #[serde(default)]
    pub receiver_name: Option<String>,

    /// Invoice number.
    #[serde(default)]
    pub invoice_number: Option<String>,

    /// Invoice date as entered by the reviewer.
    #[serde(default)]
    pub invoice_date: Option<String>,

    /// Invoice value including tax.
    #[serde(default)]
    pub invoice_value: Option<Decimal>,

    /// Place of supply (state code and name).
    #[serde(default)]
    pub place_of_supply: Option<String>,

    /// Reverse charge flag, "Y" or "N".
    #[serde(default = "default_reverse_charge")]
    pub reverse_charge: String,

    /// Applicable percentage of tax rate label (e.g. "65%").
    #[serde(default)]
    pub applicable_tax_rate: Option<String>,

    /// Invoice type.
    #[serde(default = "default_invoice_type")]
    pub invoice_type: String,

    /// GSTIN of the e-commerce operator, if any.
    #[serde(default)]
    pub ecommerce_gstin: Option<String>,

    /// Tax rate.
    #[serde(default)]
    pub rate: Option<Decimal>,

    /// Taxable value.
    #[serde(default)]
    pub taxable_value: Option<Decimal>,

    /// Cess amount.
    #[serde(default = "default_cess_amount")]
    pub cess_amount: Decimal,
}

fn default_reverse_charge() -> String {
    "N".to_string()
}

fn default_invoice_type() -> String {
    "Regular".to_string()
}

fn default_cess_amount() -> Decimal {
    // 0.0, one fractional digit
    Decimal::new(0, 1)
}

impl Gstr1B2BRow {
    /// Create a row for a recipient with every other field at its default.
    pub fn new(gstin_uin_of_recipient: impl Into<String>) -> Self {
        Self {
            gstin_uin_of_recipient: gstin_uin_of_recipient.into(),
            receiver_name: None,
            invoice_number: None,
            invoice_date: None,
            invoice_value: None,
            place_of_supply: None,
            reverse_charge: default_reverse_charge(),
            applicable_tax_rate: None,
            invoice_type: default_invoice_type(),
            ecommerce_gstin: None,
            rate: None,
            taxable_value: None,
            cess_amount: default_cess_amount(),
        }
    }

    /// The row's fields as CSV cells, in [`GSTR1_B2B_HEADERS`] order.
    pub fn to_record(&self) -> [String; 13] {
        [
            self.gstin_uin_of_recipient.clone(),
            self.receiver_name.clone().unwrap_or_default(),
            self.invoice_number.clone().unwrap_or_default(),
            self.invoice_date.clone().unwrap_or_default(),
            decimal_cell(self.invoice_value),
            self.place_of_supply.clone().unwrap_or_default(),
            self.reverse_charge.clone(),
            self.applicable_tax_rate.clone().unwrap_or_default(),
            self.invoice_type.clone(),
            self.ecommerce_gstin.clone().unwrap_or_default(),
            decimal_cell(self.rate),
            decimal_cell(self.taxable_value),
            self.cess_amount.to_string(),
        ]
    }

    /// Validate the row and return any issues found.
    ///
    /// Issues do not block export; the caller decides.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !is_structurally_valid(&self.gstin_uin_of_recipient) {
            issues.push(format!(
                "Invalid recipient GSTIN: {}",
                self.gstin_uin_of_recipient
            ));
        }

        if let Some(ecommerce) = &self.ecommerce_gstin {
            if !ecommerce.is_empty() && !is_structurally_valid(ecommerce) {
                issues.push(format!("Invalid e-commerce GSTIN: {}", ecommerce));
            }
        }

        if self.reverse_charge != "Y" && self.reverse_charge != "N" {
            issues.push(format!(
                "Reverse charge must be Y or N, got {}",
                self.reverse_charge
            ));
        }

        if !INVOICE_TYPES.contains(&self.invoice_type.as_str()) {
            issues.push(format!("Unknown invoice type: {}", self.invoice_type));
        }

        if self.invoice_number.as_deref().unwrap_or("").is_empty() {
            issues.push("Missing invoice number".to_string());
        }

        let amounts = [
            ("Invoice value", self.invoice_value),
            ("Rate", self.rate),
            ("Taxable value", self.taxable_value),
            ("Cess amount", Some(self.cess_amount)),
        ];
        for (label, amount) in amounts {
            if amount.is_some_and(|v| v.is_sign_negative() && !v.is_zero()) {
                issues.push(format!("{} is negative", label));
            }
        }

        issues
    }
}

fn decimal_cell(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
