//! OCR capability: images in, recognized text lines out.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Something that can turn an image into text lines.
///
/// Engines are loaded once and handed to whoever needs them, so they must be
/// shareable across threads.
pub trait OcrEngine: Send + Sync {
    /// Engine identifier.
    fn name(&self) -> &'static str;

    /// Recognize text in an image. Boxes come back in reading order.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;

    /// Decode raw image bytes and recognize them.
    fn recognize_bytes(&self, data: &[u8]) -> Result<OcrResult, OcrError> {
        let image = image::load_from_memory(data)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;
        self.recognize(&image)
    }

    /// Run a throwaway recognition so models are loaded before real work.
    fn warm_up(&self) -> Result<(), OcrError> {
        let blank = DynamicImage::new_luma8(200, 50);
        self.recognize(&blank).map(|_| ())
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
    pub confidence: f32,
}

impl TextBox {
    /// Create a box from an axis-aligned rectangle.
    pub fn from_rect(text: impl Into<String>, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            bbox: [x, y, x + w, y, x + w, y + h, x, y + h],
            text: text.into(),
            confidence: 1.0,
        }
    }

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

/// Result of OCR processing on one or more images.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text boxes in reading order.
    pub boxes: Vec<TextBox>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height) of the last processed image.
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Text of each box, in order.
    pub fn lines(&self) -> Vec<String> {
        self.boxes.iter().map(|b| b.text.clone()).collect()
    }

    /// Sort boxes top-to-bottom in bands of `row_height` pixels, then left-to-right.
    pub fn sort_by_reading_order(&mut self, row_height: f32) {
        let row_height = if row_height > 0.0 { row_height } else { 1.0 };

        self.boxes.sort_by(|a, b| {
            let (ax, ay, _, _) = a.rect();
            let (bx, by, _, _) = b.rect();

            let row_a = (ay / row_height) as i32;
            let row_b = (by / row_height) as i32;

            row_a
                .cmp(&row_b)
                .then_with(|| ax.total_cmp(&bx))
        });
    }

    /// Append the boxes of a following page.
    pub fn merge(&mut self, other: OcrResult) {
        self.boxes.extend(other.boxes);
        self.processing_time_ms += other.processing_time_ms;
        self.image_size = other.image_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_order() {
        let mut result = OcrResult {
            boxes: vec![
                TextBox::from_rect("KUMAR", 10.0, 52.0, 80.0, 14.0),
                TextBox::from_rect("Given Name", 200.0, 8.0, 80.0, 14.0),
                TextBox::from_rect("Surname", 10.0, 5.0, 80.0, 14.0),
            ],
            ..Default::default()
        };

        result.sort_by_reading_order(20.0);

        assert_eq!(result.lines(), vec!["Surname", "Given Name", "KUMAR"]);
    }

    #[test]
    fn test_reading_order_with_nan_coordinates() {
        let mut result = OcrResult {
            boxes: vec![
                TextBox::from_rect("KUMAR", 10.0, 52.0, 80.0, 14.0),
                TextBox::from_rect("?", f32::NAN, 6.0, 80.0, 14.0),
                TextBox::from_rect("Given Name", 200.0, 8.0, 80.0, 14.0),
                TextBox::from_rect("Surname", 10.0, 5.0, 80.0, 14.0),
            ],
            ..Default::default()
        };

        result.sort_by_reading_order(20.0);

        // A box without a usable x sorts to the end of its row.
        assert_eq!(result.lines(), vec!["Surname", "Given Name", "?", "KUMAR"]);
    }

    struct EchoSize;

    impl OcrEngine for EchoSize {
        fn name(&self) -> &'static str {
            "echo-size"
        }

        fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
            Ok(OcrResult {
                image_size: (image.width(), image.height()),
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_recognize_bytes_rejects_garbage() {
        let err = EchoSize.recognize_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, OcrError::InvalidImage(_)));
    }

    #[test]
    fn test_warm_up_uses_blank_image() {
        assert!(EchoSize.warm_up().is_ok());
        let result = EchoSize.recognize(&DynamicImage::new_luma8(200, 50)).unwrap();
        assert_eq!(result.image_size, (200, 50));
    }

    #[test]
    fn test_merge_keeps_page_order() {
        let mut first = OcrResult {
            boxes: vec![TextBox::from_rect("PAGE 1", 0.0, 0.0, 10.0, 10.0)],
            processing_time_ms: 5,
            image_size: (100, 100),
        };
        let second = OcrResult {
            boxes: vec![TextBox::from_rect("PAGE 2", 0.0, 0.0, 10.0, 10.0)],
            processing_time_ms: 7,
            image_size: (200, 300),
        };

        first.merge(second);

        assert_eq!(first.lines(), vec!["PAGE 1", "PAGE 2"]);
        assert_eq!(first.processing_time_ms, 12);
        assert_eq!(first.image_size, (200, 300));
    }
}
