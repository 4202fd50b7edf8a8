//! Field aggregation: recognizer and locator outputs combined into one record.

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::OcrError;
use crate::models::config::ExtractionConfig;
use crate::models::invoice::{InvoiceExtraction, MoneyBreakdown};
use crate::ocr::{OcrEngine, OcrResult};

use super::rules::{
    details::{extract_invoice_date, extract_invoice_number},
    find_all_tax_ids, find_tax_id, locate_amount, normalize, AmountCategory,
};
use super::{
    WARN_GSTIN_NOT_FOUND, WARN_INVOICE_TOTAL_NOT_FOUND, WARN_TAXABLE_VALUE_NOT_FOUND,
    WARN_UNREADABLE_IMAGE,
};

/// Core fields read from invoice text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    /// First GSTIN in the text.
    pub tax_id: Option<String>,
    /// Located and inferred amounts.
    pub money: MoneyBreakdown,
    /// Advisory warnings: GSTIN, then invoice total, then taxable value.
    pub warnings: Vec<String>,
}

/// Extract the GSTIN and money breakdown from raw invoice text.
///
/// Never fails: anything not found is `None` and reported in `warnings`.
pub fn extract_fields(raw_text: &str) -> ExtractedFields {
    // The GSTIN grammar tolerates case, so it runs on the raw text
    let tax_id = find_tax_id(raw_text);

    let normalized = normalize(raw_text);
    let mut money = MoneyBreakdown::default();
    for category in AmountCategory::ALL {
        money.set(category, locate_amount(&normalized, category));
    }
    money.infer_total_tax();

    let mut warnings = Vec::new();
    if tax_id.is_none() {
        warnings.push(WARN_GSTIN_NOT_FOUND.to_string());
    }
    if money.invoice_value.is_none() {
        warnings.push(WARN_INVOICE_TOTAL_NOT_FOUND.to_string());
    }
    if money.taxable_value.is_none() {
        warnings.push(WARN_TAXABLE_VALUE_NOT_FOUND.to_string());
    }

    ExtractedFields {
        tax_id,
        money,
        warnings,
    }
}

/// Builds [`InvoiceExtraction`] records from text, OCR results or images.
#[derive(Debug, Clone, Default)]
pub struct InvoiceParser {
    config: ExtractionConfig,
}

impl InvoiceParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from extraction configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Set whether invoice number and date are looked for.
    pub fn with_invoice_details(mut self, enabled: bool) -> Self {
        self.config.detect_invoice_details = enabled;
        self
    }

    /// Set whether every GSTIN candidate is recorded.
    pub fn with_candidates(mut self, enabled: bool) -> Self {
        self.config.collect_candidates = enabled;
        self
    }

    /// Parse invoice text into an extraction record.
    pub fn parse(&self, text: &str) -> InvoiceExtraction {
        info!("Parsing invoice from {} characters of text", text.len());

        let fields = extract_fields(text);

        let (invoice_no, invoice_date) = if self.config.detect_invoice_details {
            (extract_invoice_number(text), extract_invoice_date(text))
        } else {
            (None, None)
        };

        let gstin_candidates = if self.config.collect_candidates {
            find_all_tax_ids(text)
        } else {
            Vec::new()
        };

        debug!(
            "Extracted GSTIN {:?}, invoice {:?}, {} warnings",
            fields.tax_id,
            invoice_no,
            fields.warnings.len()
        );

        InvoiceExtraction {
            gstin: fields.tax_id,
            gstin_candidates,
            invoice_no,
            invoice_date,
            money: fields.money,
            ocr_confidence: None,
            warnings: fields.warnings,
            raw_text: text.to_string(),
        }
    }

    /// Parse the text of an OCR result, keeping its confidence.
    pub fn extract(&self, ocr_result: &OcrResult) -> InvoiceExtraction {
        let mut extraction = self.parse(&ocr_result.text);
        extraction.ocr_confidence = ocr_result.confidence();
        extraction
    }

    /// Decode an uploaded image, run OCR on it and parse the result.
    ///
    /// Bytes that do not decode as an image yield an extraction with empty
    /// text and a single warning. OCR failures are returned to the caller.
    pub fn scan_image<E: OcrEngine>(
        &self,
        engine: &E,
        bytes: &[u8],
    ) -> Result<InvoiceExtraction, OcrError> {
        match decode_image(bytes) {
            Some(image) => self.scan_decoded(engine, &image),
            None => Ok(unreadable_image()),
        }
    }

    /// Run OCR on an already decoded image and parse the result.
    pub fn scan_decoded<E: OcrEngine>(
        &self,
        engine: &E,
        image: &DynamicImage,
    ) -> Result<InvoiceExtraction, OcrError> {
        let ocr_result = engine.recognize(image)?;
        debug!(
            "OCR produced {} text boxes in {}ms",
            ocr_result.boxes.len(),
            ocr_result.processing_time_ms
        );

        Ok(self.extract(&ocr_result))
    }
}

/// Decode uploaded bytes, `None` when they are not a readable image.
///
/// Lets callers skip loading an OCR engine for uploads that would never
/// reach it.
pub fn decode_image(bytes: &[u8]) -> Option<DynamicImage> {
    match image::load_from_memory(bytes) {
        Ok(image) => Some(image),
        Err(e) => {
            warn!("Could not decode uploaded image: {}", e);
            None
        }
    }
}

/// The extraction reported for an upload that is not a readable image.
pub fn unreadable_image() -> InvoiceExtraction {
    InvoiceExtraction::failed(WARN_UNREADABLE_IMAGE)
}
