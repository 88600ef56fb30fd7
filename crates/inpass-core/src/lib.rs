//! Core library for Indian passport OCR field extraction.
//!
//! This crate provides:
//! - Passport field extraction from OCR text lines (names, dates, numbers, family, address)
//! - An OCR engine abstraction with a PaddleOCR backend (`native` feature)
//! - PDF page image and text extraction
//! - An upload boundary that validates files and wraps results in a response envelope

pub mod error;
pub mod models;
pub mod ocr;
pub mod passport;
pub mod pdf;
pub mod service;

pub use error::{InpassError, OcrError, PdfError, Result, ServiceError};
pub use models::config::InpassConfig;
pub use models::passport::{PassportField, PassportRecord};
pub use ocr::{OcrEngine, OcrResult, TextBox};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use passport::{extract, ExtractionResult, PassportExtractor, PassportParser};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use service::{ErrorResponse, ExtractResponse, ExtractionService, StatusResponse, Upload};
