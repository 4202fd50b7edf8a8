//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod export;
pub mod extract;

use std::path::{Path, PathBuf};

use tracing::debug;

use gstr_core::models::config::GstrConfig;
use gstr_core::PureOcrEngine;

/// Image extensions handed to the OCR engine.
pub const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "webp", "tiff", "tif", "bmp", "gif"];

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gstr")
        .join("config.json")
}

/// Load configuration from `--config`, the default path, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<GstrConfig> {
    if let Some(path) = config_path {
        return Ok(GstrConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(GstrConfig::from_file(&default_path)?)
    } else {
        Ok(GstrConfig::default())
    }
}

/// Lower-cased file extension, empty when there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load the OCR engine, with `model_dir` overriding the configured directory.
pub fn load_engine(model_dir: Option<&Path>, config: &GstrConfig) -> anyhow::Result<PureOcrEngine> {
    let mut config = config.clone();
    if let Some(dir) = model_dir {
        config.models.model_dir = dir.to_path_buf();
    }

    if !config.has_models() {
        anyhow::bail!(
            "OCR models not found in {}.\n\n\
             Expected {}, {} and {}. Pass --model-dir or run 'gstr config set models.model_dir <dir>'.",
            config.models.model_dir.display(),
            config.models.detection_model,
            config.models.recognition_model,
            config.models.dictionary
        );
    }

    debug!("Using OCR models from {}", config.models.model_dir.display());

    PureOcrEngine::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))
}
