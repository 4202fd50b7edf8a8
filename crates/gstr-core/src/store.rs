//! Storage for extracted invoices.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GstrError, Result};
use crate::models::invoice::InvoiceExtraction;

/// An extraction saved in a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredInvoice {
    /// Repository-assigned identifier.
    pub id: String,
    /// When the record was saved.
    pub created_at: DateTime<Utc>,
    /// The saved extraction.
    #[serde(flatten)]
    pub extraction: InvoiceExtraction,
}

/// Aggregate figures over every stored invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_invoices: usize,
    pub total_taxable_value: Decimal,
    pub total_tax: Decimal,
    /// Mean OCR confidence; records without one count as zero.
    pub avg_confidence: f32,
    /// Records without warnings.
    pub valid_count: usize,
    /// Records carrying at least one warning.
    pub warning_count: usize,
}

/// A place extracted invoices are kept.
pub trait InvoiceRepository {
    /// Save an extraction and return the stored record.
    fn save(&self, extraction: InvoiceExtraction) -> Result<StoredInvoice>;

    /// All stored records, newest first.
    fn list(&self) -> Result<Vec<StoredInvoice>>;

    /// Look a record up by its ID or by its invoice number.
    fn get(&self, key: &str) -> Result<Option<StoredInvoice>>;

    /// Aggregate figures over all records.
    fn stats(&self) -> Result<StoreStats>;
}

/// Process-local repository.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<StoredInvoice>>,
    /// Sequence suffix of the next ID; never reset.
    next_seq: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every record. IDs already issued are not reused.
    pub fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<StoredInvoice>>> {
        self.records
            .lock()
            .map_err(|_| GstrError::Store("invoice store lock poisoned".to_string()))
    }
}

impl InvoiceRepository for InMemoryStore {
    fn save(&self, extraction: InvoiceExtraction) -> Result<StoredInvoice> {
        let mut records = self.lock()?;
        let created_at = Utc::now();
        let record = StoredInvoice {
            id: format!(
                "inv_{}_{}",
                created_at.format("%Y%m%d%H%M%S"),
                self.next_seq.fetch_add(1, Ordering::Relaxed)
            ),
            created_at,
            extraction,
        };

        debug!("Stored invoice {}", record.id);
        records.insert(0, record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<StoredInvoice>> {
        Ok(self.lock()?.clone())
    }

    fn get(&self, key: &str) -> Result<Option<StoredInvoice>> {
        Ok(self
            .lock()?
            .iter()
            .find(|r| r.id == key || r.extraction.invoice_no.as_deref() == Some(key))
            .cloned())
    }

    fn stats(&self) -> Result<StoreStats> {
        let records = self.lock()?;
        if records.is_empty() {
            return Ok(StoreStats::default());
        }

        let mut stats = StoreStats {
            total_invoices: records.len(),
            ..StoreStats::default()
        };
        let mut confidence_sum = 0.0f32;

        for record in records.iter() {
            let money = &record.extraction.money;
            stats.total_taxable_value += money.taxable_value.unwrap_or_default();
            stats.total_tax += money.total_tax.unwrap_or_default();
            confidence_sum += record.extraction.ocr_confidence.unwrap_or(0.0);

            if record.extraction.has_warnings() {
                stats.warning_count += 1;
            } else {
                stats.valid_count += 1;
            }
        }

        stats.avg_confidence = confidence_sum / records.len() as f32;
        Ok(stats)
    }
}
