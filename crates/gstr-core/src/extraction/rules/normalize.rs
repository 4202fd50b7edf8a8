//! Canonicalization of OCR text before pattern matching.

use super::patterns::HORIZONTAL_WHITESPACE;

/// Canonical currency marker substituted for `₹` and `INR`.
pub const CURRENCY_MARKER: &str = "Rs ";

/// Normalize OCR text for amount matching.
///
/// Rupee glyphs and the literal `INR` become `Rs `, runs of horizontal
/// whitespace collapse to one space, and line breaks are kept untouched
/// because amounts are located line by line.
pub fn normalize(text: &str) -> String {
    let mut replaced = text.replace('\u{20b9}', CURRENCY_MARKER);

    // "IN₹" turns into "INRs " above; repeat until no INR is left so that a
    // second pass is a no-op. Each round removes at least one 'I'.
    while replaced.contains("INR") {
        replaced = replaced.replace("INR", CURRENCY_MARKER);
    }

    HORIZONTAL_WHITESPACE
        .replace_all(&replaced, " ")
        .into_owned()
}
