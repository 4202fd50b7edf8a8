//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the gstr pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GstrConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Invoice extraction configuration.
    pub extraction: ExtractionConfig,

    /// Model configuration.
    pub models: ModelConfig,

    /// GSTR-1 export configuration.
    pub export: ExportConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Keep `[UNK]` markers emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,

    /// Text regions scoring below this (0.0 - 1.0) are dropped.
    pub min_region_score: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            keep_unk: false,
            min_region_score: 0.0,
        }
    }
}

/// Invoice extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Look for invoice number and invoice date.
    pub detect_invoice_details: bool,

    /// Record every GSTIN-shaped token, not just the first.
    pub collect_candidates: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            detect_invoice_details: true,
            collect_candidates: true,
        }
    }
}

/// Model file paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "rec.onnx".to_string(),
            dictionary: "dict.txt".to_string(),
        }
    }
}

/// GSTR-1 export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default file name for the B2B CSV.
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "gstr1_b2b.csv".to_string(),
        }
    }
}

impl GstrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }

    /// Whether all OCR model files exist under `model_dir`.
    pub fn has_models(&self) -> bool {
        [
            &self.models.detection_model,
            &self.models.recognition_model,
            &self.models.dictionary,
        ]
        .iter()
        .all(|name| self.model_path(name).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GstrConfig =
            serde_json::from_str(r#"{"extraction": {"collect_candidates": false}}"#).unwrap();

        assert!(!config.extraction.collect_candidates);
        assert!(config.extraction.detect_invoice_details);
        assert_eq!(config.export.file_name, "gstr1_b2b.csv");
        assert_eq!(config.models.model_dir, PathBuf::from("models"));
    }

    #[test]
    fn test_model_path() {
        let mut config = GstrConfig::default();
        config.models.model_dir = PathBuf::from("/opt/ocr");
        assert_eq!(config.model_path("det.onnx"), PathBuf::from("/opt/ocr/det.onnx"));
        assert!(!config.has_models());
    }
}
