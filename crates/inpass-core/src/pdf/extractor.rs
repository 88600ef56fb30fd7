//! PDF page image and text extraction using lopdf and pdf-extract.

use image::{DynamicImage, GrayImage, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// Maximum depth followed when walking up the page tree for resources.
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Every decodable image object in the document.
    fn document_images(&self) -> Vec<DynamicImage> {
        let Some(doc) = self.document.as_ref() else {
            return Vec::new();
        };

        let images: Vec<DynamicImage> = doc
            .objects
            .values()
            .filter_map(|obj| decode_image_object(obj))
            .collect();

        debug!("Found {} images in document", images.len());
        images
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Owner-password-only PDFs open with an empty user password.
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let has_text = self
            .extract_text()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);
        let has_images = !self.document_images().is_empty();

        let pdf_type = match (has_text, has_images) {
            (true, false) => PdfType::Text,
            (false, true) => PdfType::Image,
            (true, true) => PdfType::Hybrid,
            (false, false) => PdfType::Empty,
        };

        debug!("PDF analysis: has_text={}, has_images={} -> {:?}", has_text, has_images, pdf_type);
        pdf_type
    }

    fn extract_text(&self) -> Result<String> {
        self.document()?;
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_images(&self, page: u32) -> Result<Vec<DynamicImage>> {
        let doc = self.document()?;

        let pages = doc.get_pages();
        let page_id = pages.get(&page).ok_or(PdfError::InvalidPage(page))?;

        let Some(resources) = page_resources(doc, *page_id) else {
            return Ok(Vec::new());
        };

        let xobjects = match resources.get(b"XObject").and_then(|o| doc.dereference(o)) {
            Ok((_, Object::Dictionary(dict))) => dict,
            _ => return Ok(Vec::new()),
        };

        let images = xobjects
            .iter()
            .filter_map(|(_, obj_ref)| doc.dereference(obj_ref).ok())
            .filter_map(|(_, obj)| decode_image_object(obj))
            .collect();

        Ok(images)
    }

    /// If no page references an image XObject directly, every image object in
    /// the document is returned instead.
    fn page_images(&self, max_pages: usize) -> Result<Vec<DynamicImage>> {
        let doc = self.document()?;

        let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if max_pages > 0 {
            page_numbers.truncate(max_pages);
        }

        let mut images = Vec::new();
        for page in page_numbers {
            let page_images = self.extract_images(page)?;
            debug!("Page {}: {} images", page, page_images.len());
            images.extend(page_images);
        }

        if images.is_empty() {
            debug!("No page XObject images found, scanning all objects");
            images = self.document_images();
            if max_pages > 0 {
                images.truncate(max_pages);
            }
        }

        Ok(images)
    }
}

/// Resources of a page, inherited from the page tree if not set on the page.
fn page_resources(doc: &Document, page_id: ObjectId) -> Option<&Dictionary> {
    let mut node_id = page_id;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let node = doc.get_object(node_id).ok()?.as_dict().ok()?;

        if let Ok(resources) = node.get(b"Resources") {
            if let Ok((_, Object::Dictionary(dict))) = doc.dereference(resources) {
                return Some(dict);
            }
        }

        node_id = node.get(b"Parent").ok()?.as_reference().ok()?;
    }

    None
}

/// Decode an image XObject stream.
///
/// JPEG streams are decoded as-is; unfiltered or Flate-compressed 8-bit RGB
/// and grayscale samples are rebuilt into images. Other encodings are skipped.
fn decode_image_object(obj: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = obj else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
    let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;

    let filter = dict.get(b"Filter").ok().and_then(|f| match f {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
        _ => None,
    });

    match filter {
        Some(b"DCTDecode") => {
            trace!("Decoding {}x{} JPEG image", width, height);
            return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg).ok();
        }
        Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
            trace!("Skipping unsupported image filter {:?}", filter.map(String::from_utf8_lossy));
            return None;
        }
        _ => {}
    }

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);
    if bits != 8 {
        trace!("Skipping image with {} bits per component", bits);
        return None;
    }

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    // Dimensions come straight from the file.
    let pixels = (width as usize).checked_mul(height as usize)?;

    match color_space {
        b"DeviceRGB" | b"RGB" => {
            let samples = data.get(..pixels.checked_mul(3)?)?.to_vec();
            RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8)
        }
        b"DeviceGray" | b"G" => {
            let samples = data.get(..pixels)?.to_vec();
            GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8)
        }
        other => {
            trace!("Unsupported color space {}", String::from_utf8_lossy(other));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    fn image_stream(color_space: &str, width: i64, height: i64, data: Vec<u8>) -> Object {
        Object::Stream(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => color_space,
                "BitsPerComponent" => 8i64,
            },
            data,
        ))
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.page_images(0).is_err());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(matches!(extractor.load(b"not a pdf"), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_decode_raw_gray() {
        let obj = image_stream("DeviceGray", 3, 2, vec![0, 50, 100, 150, 200, 250]);
        let image = decode_image_object(&obj).unwrap();

        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.to_luma8().get_pixel(2, 1).0, [250]);
    }

    #[test]
    fn test_decode_raw_rgb_short_data() {
        let obj = image_stream("DeviceRGB", 2, 2, vec![0; 5]);
        assert!(decode_image_object(&obj).is_none());
    }

    #[test]
    fn test_decode_huge_dimensions() {
        let max = u32::MAX as i64;
        let obj = image_stream("DeviceRGB", max, max, vec![0; 3]);
        assert!(decode_image_object(&obj).is_none());

        let obj = image_stream("DeviceGray", max, max, vec![0; 3]);
        assert!(decode_image_object(&obj).is_none());
    }

    #[test]
    fn test_non_image_stream_skipped() {
        let obj = Object::Stream(Stream::new(dictionary! { "Subtype" => "Form" }, vec![]));
        assert!(decode_image_object(&obj).is_none());
    }
}
