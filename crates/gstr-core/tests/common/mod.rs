//! Seeded generator of synthetic GST invoice text.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// State codes used for generated GSTINs (MH, TS, KA, TN, DL).
pub const STATE_CODES: [&str; 5] = ["27", "36", "29", "33", "07"];

const ITEMS: [&str; 10] = [
    "Rice Bags",
    "Cooking Oil",
    "Sugar Packets",
    "Tea Powder",
    "Wheat Flour",
    "Detergent",
    "Soap Bars",
    "Biscuits",
    "Milk Powder",
    "Spices",
];

const TOTAL_LABELS: [&str; 5] = [
    "Grand Total",
    "Invoice Value",
    "Amount Payable",
    "Total Amount",
    "Net Amount",
];

const TAXABLE_LABELS: [&str; 3] = ["Taxable Value", "Taxable Amount", "Sub Total"];

const CURRENCY_PREFIXES: [&str; 4] = ["₹ ", "Rs ", "INR ", ""];

/// Invoice text together with the values it was generated from.
#[derive(Debug, Clone)]
pub struct SyntheticInvoice {
    pub text: String,
    pub seller_gstin: String,
    pub buyer_gstin: String,
    pub invoice_no: String,
    pub taxable_value: Decimal,
    pub cgst: Option<Decimal>,
    pub sgst: Option<Decimal>,
    pub igst: Option<Decimal>,
    pub total_tax: Decimal,
    pub total_tax_printed: bool,
    pub invoice_value: Decimal,
}

pub struct InvoiceGenerator {
    rng: StdRng,
}

impl InvoiceGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn gstin(&mut self) -> String {
        let state = STATE_CODES.choose(&mut self.rng).copied().unwrap_or("27");
        let letters: String = (0..5).map(|_| self.upper()).collect();
        let digits: u32 = self.rng.gen_range(0..10_000);
        let entity: u32 = self.rng.gen_range(1..10);
        let check = if self.rng.gen_bool(0.5) {
            self.upper()
        } else {
            char::from(b'0' + self.rng.gen_range(0..10u8))
        };
        format!("{}{}{:04}{}{}Z{}", state, letters, digits, self.upper(), entity, check)
    }

    pub fn invoice(&mut self) -> SyntheticInvoice {
        let seller_gstin = self.gstin();
        let buyer_gstin = self.gstin();
        let invoice_no = format!("INV-{}", self.rng.gen_range(10_000..100_000));

        let taxable_value = Decimal::new(self.rng.gen_range(5_000..55_000), 0);
        let total_tax = (taxable_value * Decimal::new(18, 2)).round_dp(2);
        let interstate = seller_gstin[..2] != buyer_gstin[..2];

        let (cgst, sgst, igst) = if interstate {
            (None, None, Some(total_tax))
        } else {
            let cgst = (total_tax / Decimal::from(2)).round_dp(2);
            (Some(cgst), Some(total_tax - cgst), None)
        };
        let invoice_value = taxable_value + total_tax;
        let total_tax_printed = self.rng.gen_bool(0.5);

        let mut lines = vec![
            "TAX INVOICE".to_string(),
            format!("Seller GSTIN: {}", seller_gstin),
            format!("Buyer GSTIN: {}", buyer_gstin),
            format!("Invoice No: {}", invoice_no),
            format!(
                "Invoice Date: {:02}/{:02}/2024",
                self.rng.gen_range(1..29),
                self.rng.gen_range(1..13)
            ),
        ];

        let item_count = self.rng.gen_range(1..4);
        let items: Vec<&str> = ITEMS
            .choose_multiple(&mut self.rng, item_count)
            .copied()
            .collect();
        for item in items {
            let qty = self.rng.gen_range(1..21);
            let rate = self.rng.gen_range(50..501);
            lines.push(format!("{} {} x {} = {}", item, qty, rate, qty * rate));
        }

        let taxable_label = self.pick(&TAXABLE_LABELS);
        lines.push(format!("{}: {}", taxable_label, self.money(taxable_value)));

        if let Some(cgst) = cgst {
            lines.push(format!("CGST @ 9%: {}", self.money(cgst)));
        }
        if let Some(sgst) = sgst {
            lines.push(format!("SGST @ 9%: {}", self.money(sgst)));
        }
        if let Some(igst) = igst {
            lines.push(format!("IGST @ 18%: {}", self.money(igst)));
        }
        if total_tax_printed {
            lines.push(format!("Total Tax: {}", self.money(total_tax)));
        }

        let total_label = self.pick(&TOTAL_LABELS);
        let total = self.money(invoice_value);
        if self.rng.gen_bool(0.3) {
            // OCR wrapped the value onto its own line
            lines.push(total_label.to_string());
            lines.push(total);
        } else {
            lines.push(format!("{}: {}", total_label, total));
        }
        lines.push("Authorised Signatory".to_string());

        SyntheticInvoice {
            text: lines.join("\n"),
            seller_gstin,
            buyer_gstin,
            invoice_no,
            taxable_value,
            cgst,
            sgst,
            igst,
            total_tax,
            total_tax_printed,
            invoice_value,
        }
    }

    /// Random text built from letters, digits and punctuation.
    pub fn noise(&mut self, len: usize) -> String {
        const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 ,.:-\t\n";
        (0..len)
            .map(|_| char::from(CHARSET[self.rng.gen_range(0..CHARSET.len())]))
            .collect()
    }

    fn upper(&mut self) -> char {
        char::from(b'A' + self.rng.gen_range(0..26u8))
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options.choose(&mut self.rng).copied().unwrap_or("")
    }

    /// Currency prefix plus the amount, grouped with commas half the time.
    fn money(&mut self, amount: Decimal) -> String {
        let prefix = self.pick(&CURRENCY_PREFIXES);
        let plain = format!("{:.2}", amount);
        let body = if self.rng.gen_bool(0.5) {
            group_thousands(&plain)
        } else {
            plain
        };
        format!("{}{}", prefix, body)
    }
}

/// Insert thousands separators into a plain "12345.67" amount.
pub fn group_thousands(plain: &str) -> String {
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain, ""));
    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}
