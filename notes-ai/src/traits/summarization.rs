//! Summarization provider trait.

use crate::types::summary::StructuredSummary;
use crate::Error;
use async_trait::async_trait;

/// Abstraction for LLM-powered structured summarization of meeting notes.
///
/// Implementations prompt a model for a JSON object with overview, action
/// items, key points and optional participants/decisions. A provider that
/// receives a malformed model response is expected to degrade rather than
/// fail: the raw text becomes the summary and the item lists stay empty.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Summarize content (already in the reader's target language) into a
    /// structured summary.
    async fn summarize(&self, content: &str) -> Result<StructuredSummary, Error>;

    /// Return unique identifier for this provider (e.g. "openai").
    fn provider_id(&self) -> &str;
}
