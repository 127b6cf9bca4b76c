//! Vision (OCR) provider trait.

use crate::types::ocr::OcrExtraction;
use crate::Error;
use async_trait::async_trait;

/// Abstraction for extracting text from a photographed page of notes.
///
/// Implementations send the image to a multimodal model and return the
/// extracted text together with the language the model believes it saw,
/// in one call. The image must be reachable at a public (or pre-signed) URL.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Extract the text content of the image at image_url, along with an
    /// optional detected language code.
    async fn extract_text_and_language(&self, image_url: &str) -> Result<OcrExtraction, Error>;

    /// Return unique identifier for this provider (e.g. "openai").
    fn provider_id(&self) -> &str;
}
