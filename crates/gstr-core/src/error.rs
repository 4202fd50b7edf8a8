//! Error types for the gstr-core library.
//!
//! Missing invoice fields are never errors: extraction reports them as
//! `None` plus a warning. These types cover the fallible edges only (the OCR
//! collaborator, CSV writing, configuration and I/O).

use thiserror::Error;

/// Main error type for the gstr library.
#[derive(Error, Debug)]
pub enum GstrError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// GSTR-1 export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invoice store error.
    #[error("store error: {0}")]
    Store(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors raised while writing the GSTR-1 CSV document.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The CSV writer rejected a record.
    #[error("failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the in-memory buffer failed.
    #[error("failed to flush CSV buffer: {0}")]
    Flush(String),

    /// The produced bytes were not valid UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Result type for the gstr library.
pub type Result<T> = std::result::Result<T, GstrError>;
