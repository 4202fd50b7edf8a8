//! OCR collaborator interface.
//!
//! The extraction core only consumes text. Recognition is delegated to an
//! [`OcrEngine`] that the caller constructs and owns.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// A text recognition engine.
pub trait OcrEngine {
    /// Recognize text regions in an image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;
}

impl<E: OcrEngine + ?Sized> OcrEngine for &E {
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        (**self).recognize(image)
    }
}

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub score: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text boxes in reading order.
    pub boxes: Vec<TextBox>,

    /// Full text (boxes joined with newlines).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Create an empty result.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            boxes: Vec::new(),
            text: String::new(),
            processing_time_ms: 0,
            image_size: (width, height),
        }
    }

    /// Build a result from boxes, ordering them and joining their text.
    pub fn from_boxes(boxes: Vec<TextBox>, image_size: (u32, u32)) -> Self {
        let mut result = Self {
            boxes,
            text: String::new(),
            processing_time_ms: 0,
            image_size,
        };
        result.sort_by_reading_order();
        result
    }

    /// Mean recognition score over all boxes, `None` when nothing was read.
    pub fn confidence(&self) -> Option<f32> {
        if self.boxes.is_empty() {
            return None;
        }
        let total: f32 = self.boxes.iter().map(|b| b.score).sum();
        Some((total / self.boxes.len() as f32).clamp(0.0, 1.0))
    }

    /// Sort boxes by reading order (top-to-bottom, left-to-right).
    pub fn sort_by_reading_order(&mut self) {
        self.boxes.sort_by(|a, b| {
            let (ax, ay, _, _) = a.rect();
            let (bx, by, _, _) = b.rect();

            // Group by approximate vertical position (within 20 pixels)
            let row_a = (ay / 20.0) as i32;
            let row_b = (by / 20.0) as i32;

            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        // One region per line: amounts are located line by line
        self.text = self
            .boxes
            .iter()
            .map(|b| b.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
    }
}
