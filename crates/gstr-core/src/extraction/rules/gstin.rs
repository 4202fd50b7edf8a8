//! GSTIN (Goods and Services Tax Identification Number) recognition.
//!
//! Only the structural grammar is checked: 2 digits, 5 letters, 4 digits,
//! 1 letter, 1 digit, a literal `Z` and one alphanumeric character. The
//! trailing check character is not verified.

use serde::{Deserialize, Serialize};

use super::patterns::{GSTIN_EXACT, GSTIN_PATTERN};
use super::{line_of, ExtractionMatch, FieldExtractor};

/// Length of a GSTIN in characters.
pub const GSTIN_LEN: usize = 15;

/// GSTIN field extractor.
///
/// Searches the upper-cased text, so OCR output in mixed case still matches.
pub struct GstinExtractor;

impl GstinExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GstinExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for GstinExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let upper = text.to_uppercase();
        GSTIN_PATTERN.find(&upper).map(|m| {
            ExtractionMatch::new(m.as_str().to_string(), line_of(&upper, m.start()), m.as_str())
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let upper = text.to_uppercase();
        let mut results: Vec<Self::Output> = Vec::new();

        for m in GSTIN_PATTERN.find_iter(&upper) {
            if results.iter().any(|r| r.value == m.as_str()) {
                continue;
            }
            results.push(ExtractionMatch::new(
                m.as_str().to_string(),
                line_of(&upper, m.start()),
                m.as_str(),
            ));
        }

        results
    }
}

/// Find the first GSTIN-shaped token in free text.
pub fn find_tax_id(text: &str) -> Option<String> {
    GstinExtractor::new().extract(text).map(|m| m.value)
}

/// Find every distinct GSTIN-shaped token, in document order.
pub fn find_all_tax_ids(text: &str) -> Vec<String> {
    GstinExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// Check a standalone candidate against the GSTIN grammar.
///
/// Unlike [`find_tax_id`] the input is not upper-cased: a lowercase
/// candidate is rejected.
pub fn is_structurally_valid(id: &str) -> bool {
    if id.chars().count() != GSTIN_LEN {
        return false;
    }

    GSTIN_EXACT.is_match(id)
}

/// Candidates split by structural validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstinReport {
    /// Candidates that satisfy the grammar.
    pub valid: Vec<String>,
    /// Candidates that do not.
    pub invalid: Vec<String>,
}

impl GstinReport {
    /// Whether at least one candidate is usable.
    pub fn has_valid(&self) -> bool {
        !self.valid.is_empty()
    }
}

/// Validate a list of GSTIN candidates discovered by some other means.
pub fn validate_candidates<S: AsRef<str>>(candidates: &[S]) -> GstinReport {
    let mut report = GstinReport::default();

    for candidate in candidates {
        let candidate = candidate.as_ref();
        if is_structurally_valid(candidate) {
            report.valid.push(candidate.to_string());
        } else {
            report.invalid.push(candidate.to_string());
        }
    }

    report
}
