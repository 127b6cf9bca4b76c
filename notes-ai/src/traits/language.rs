//! Language provider trait.

use crate::Error;
use async_trait::async_trait;

/// Abstraction for LLM-backed translation and language detection.
///
/// Implementations call out to a hosted model (OpenAI-compatible cloud API,
/// local Ollama endpoint) to render text in a target language and to identify
/// the language of submitted notes. The trait enables swapping between a
/// cloud-hosted and a locally hosted model at configuration time, and lets a
/// decorator layer a one-shot fallback across two implementations.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Translate content into target_language.
    ///
    /// `source_language` is a hint (a short detected code such as "en"), not a
    /// requirement; implementations pass it through when present. Structural
    /// formatting of the input (line breaks, list markers) should be preserved
    /// as a quality expectation.
    async fn translate(
        &self,
        content: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> Result<String, Error>;

    /// Detect the language of content, returned as a short lowercase code
    /// (e.g. "en", "de").
    async fn detect_language(&self, content: &str) -> Result<String, Error>;

    /// Return unique identifier for this provider (e.g. "openai", "ollama").
    ///
    /// Used for logging, cost tracking, and provider selection.
    /// Must be lowercase, alphanumeric with underscores only.
    fn provider_id(&self) -> &str;

    /// Validate credentials/reachability with a lightweight test request.
    ///
    /// Returns false if credentials are invalid or the endpoint is unusable.
    async fn verify_credentials(&self) -> Result<bool, Error>;
}
