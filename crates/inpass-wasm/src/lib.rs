//! WASM bindings for Indian passport field extraction.
//!
//! OCR runs in the browser (or wherever the caller likes); these bindings
//! take the recognized lines and return the structured passport record.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use inpass_core::models::passport::{PassportField, PassportRecord};
use inpass_core::passport::rules::{extract_dates, extract_passport_number, DateExtractor, FieldExtractor};
use inpass_core::{OcrResult, PassportExtractor as _, PassportParser, TextBox};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects with `null` for missing fields, matching the JSON shape.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn lines_from_js(lines: JsValue) -> Result<Vec<String>, JsValue> {
    serde_wasm_bindgen::from_value(lines)
        .map_err(|e| JsValue::from_str(&format!("expected an array of strings: {}", e)))
}

fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Extract passport fields from an array of OCR lines.
#[wasm_bindgen]
pub fn extract_passport(lines: JsValue) -> Result<JsValue, JsValue> {
    let lines = lines_from_js(lines)?;
    to_js(&inpass_core::extract(&lines))
}

/// Extract passport fields from newline-separated OCR text.
#[wasm_bindgen]
pub fn extract_passport_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&inpass_core::extract(&split_lines(text)))
}

/// Keys of the required fields missing from a record.
#[wasm_bindgen]
pub fn missing_required_fields(record: JsValue) -> Result<Vec<String>, JsValue> {
    let record: PassportRecord = serde_wasm_bindgen::from_value(record)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(record
        .missing_required_fields()
        .into_iter()
        .map(|f| f.key().to_string())
        .collect())
}

/// Keys of every passport field, in output order.
#[wasm_bindgen]
pub fn field_keys() -> Vec<String> {
    PassportField::ALL.iter().map(|f| f.key().to_string()).collect()
}

/// First `DD/MM/YYYY` date in a string.
#[wasm_bindgen]
pub fn find_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

/// Every `DD/MM/YYYY` date in a string, in order.
#[wasm_bindgen]
pub fn find_dates(text: &str) -> Vec<String> {
    extract_dates(text)
}

/// First passport number (`A1234567`) in a string. Case-sensitive.
#[wasm_bindgen]
pub fn find_passport_number(text: &str) -> Option<String> {
    extract_passport_number(text)
}

/// Passport extractor class for browser use.
#[wasm_bindgen]
pub struct PassportExtractor {
    parser: PassportParser,
}

#[wasm_bindgen]
impl PassportExtractor {
    /// Create a new passport extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: PassportParser::new(),
        }
    }

    /// Lines after a date label searched for the date.
    #[wasm_bindgen]
    pub fn set_date_window(&mut self, lines: usize) {
        self.parser = self.parser.clone().with_date_window(lines);
    }

    /// Lines after an address label inspected for address parts.
    #[wasm_bindgen]
    pub fn set_address_line_limit(&mut self, lines: usize) {
        self.parser = self.parser.clone().with_address_line_limit(lines);
    }

    /// Extract a record from an array of OCR lines.
    #[wasm_bindgen]
    pub fn extract(&self, lines: JsValue) -> Result<JsValue, JsValue> {
        let lines = lines_from_js(lines)?;
        to_js(&self.parser.extract_lines(&lines))
    }

    /// Extract a record with warnings and timing.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(&split_lines(text));

        #[derive(Serialize)]
        struct ExtractResult {
            data: PassportRecord,
            missing_fields: Vec<&'static str>,
            warnings: Vec<String>,
            processing_time_ms: u64,
        }

        let missing_fields = result
            .record
            .missing_required_fields()
            .iter()
            .map(|f| f.key())
            .collect();

        to_js(&ExtractResult {
            data: result.record,
            missing_fields,
            warnings: result.warnings,
            processing_time_ms: result.processing_time_ms,
        })
    }
}

impl Default for PassportExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// OCR result assembled from browser-side detections.
#[wasm_bindgen]
pub struct OcrResultJs {
    result: OcrResult,
    row_height: f32,
}

#[wasm_bindgen]
impl OcrResultJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            result: OcrResult::default(),
            row_height: 20.0,
        }
    }

    /// Vertical distance within which boxes count as the same line.
    #[wasm_bindgen]
    pub fn set_row_height(&mut self, row_height: f32) {
        self.row_height = row_height;
    }

    /// Add a text box to the result.
    #[allow(clippy::too_many_arguments)]
    #[wasm_bindgen]
    pub fn add_box(
        &mut self,
        text: &str,
        x1: f32, y1: f32,
        x2: f32, y2: f32,
        x3: f32, y3: f32,
        x4: f32, y4: f32,
        confidence: f32,
    ) {
        self.result.boxes.push(TextBox {
            bbox: [x1, y1, x2, y2, x3, y3, x4, y4],
            text: text.to_string(),
            confidence,
        });
    }

    /// Number of boxes added so far.
    #[wasm_bindgen]
    pub fn len(&self) -> usize {
        self.result.boxes.len()
    }

    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.result.boxes.is_empty()
    }

    /// Box texts in reading order.
    #[wasm_bindgen]
    pub fn lines(&self) -> Vec<String> {
        self.sorted().lines()
    }

    /// Extract a passport record from the boxes in reading order.
    #[wasm_bindgen]
    pub fn extract_passport(&self) -> Result<JsValue, JsValue> {
        to_js(&PassportParser::new().extract(&self.sorted()))
    }
}

impl OcrResultJs {
    fn sorted(&self) -> OcrResult {
        let mut result = self.result.clone();
        result.sort_by_reading_order(self.row_height);
        result
    }
}

impl Default for OcrResultJs {
    fn default() -> Self {
        Self::new()
    }
}
