//! Types for OCR extraction results.

use serde::{Deserialize, Serialize};

/// Result of extracting text from a photographed page of notes.
///
/// An empty `extracted_text` is a valid provider response (a photo with no
/// legible text); the workflow layer treats it as a user-input error and
/// refuses to create a meeting from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrExtraction {
    pub extracted_text: String,

    /// Short language code for the extracted text, when the model reports one
    #[serde(default)]
    pub detected_language: Option<String>,
}
