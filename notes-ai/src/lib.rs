//! Notes AI abstraction layer for translation, summarization, and OCR providers.
//!
//! This crate provides trait-based abstractions for meeting-notes AI workflows:
//! - Language providers that translate text and detect its source language
//! - Summarizers that distill translated notes into a structured summary
//! - Vision providers that extract text from photographed notes
//!
//! The design is provider-agnostic, enabling applications to swap between
//! a cloud-hosted model and a locally hosted one (OpenAI-compatible APIs,
//! Ollama, etc.) without changing application code.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::Error;
pub use types::ocr::OcrExtraction;
pub use types::summary::StructuredSummary;
