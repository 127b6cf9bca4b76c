//! HTTP clients for external collaborators: the remote AI providers and the
//! blob store. Each client is explicitly constructed at startup and injected
//! into the workflow; nothing here is lazily initialized or global.

pub mod blob_store;
pub mod fallback;
pub mod ollama;
pub mod openai;

use crate::error::Error;
use log::*;
use notes_ai::traits::language::Provider as _;
use notes_ai::traits::{language, summarization, vision};
use service::config::{AiProviderKind, Config};
use std::sync::Arc;

/// The AI capability handles the workflow runs against, resolved once from
/// configuration. Summarization and OCR always ride the cloud client; only
/// translate/detect is switchable between cloud and local.
pub struct AiProviders {
    pub language: Arc<dyn language::Provider>,
    pub summarizer: Arc<dyn summarization::Provider>,
    pub ocr: Arc<dyn vision::Provider>,
}

impl AiProviders {
    /// Startup probe of the active language provider. A failed probe is a
    /// warning, not a boot failure; requests surface their own errors.
    pub async fn verify_language_credentials(&self) -> Result<bool, notes_ai::Error> {
        self.language.verify_credentials().await
    }
}

/// Builds the provider set from configuration. Static selection: the choice
/// between cloud and local is made here, once, not per request. With local
/// inference and fallback enabled, the language handle is the fallback
/// decorator wrapping local-then-cloud.
pub fn build_providers(config: &Config) -> Result<AiProviders, Error> {
    let api_key = config
        .openai_api_key()
        .ok_or_else(|| Error::config("OPENAI_API_KEY must be set"))?;

    let cloud = Arc::new(openai::OpenAiClient::new(
        &api_key,
        config.openai_base_url(),
        config.openai_model(),
        config.openai_vision_model(),
    )?);

    let language: Arc<dyn language::Provider> = match config.ai_provider {
        AiProviderKind::Cloud => cloud.clone(),
        AiProviderKind::Local => {
            let local = Arc::new(ollama::OllamaClient::new(
                config.ollama_base_url(),
                config.ollama_model(),
            )?);
            if config.ai_fallback_enabled {
                info!("Local language provider with single-shot cloud fallback enabled");
                Arc::new(fallback::FallbackProvider::new(local, cloud.clone()))
            } else {
                local
            }
        }
    };

    Ok(AiProviders {
        language,
        summarizer: cloud.clone(),
        ocr: cloud,
    })
}

/// Builds the blob store client, if one is configured. Image submissions
/// require it; text submissions do not.
pub fn build_blob_store(config: &Config) -> Result<Option<blob_store::BlobStoreClient>, Error> {
    let Some(base_url) = config.blob_store_base_url() else {
        info!("No blob store configured; image submissions will be rejected");
        return Ok(None);
    };
    let public_url = config
        .blob_store_public_url()
        .unwrap_or_else(|| base_url.clone());

    Ok(Some(blob_store::BlobStoreClient::new(
        &base_url,
        &public_url,
        config.blob_store_bucket(),
        config.blob_store_api_key(),
    )?))
}

/// Instruction handed to a language model for a translation request.
pub(crate) fn translate_instruction(target_language: &str, source_language: Option<&str>) -> String {
    let mut instruction = format!(
        "Translate the following meeting notes into {target_language}. \
         Preserve the original line breaks and list formatting. \
         Return only the translated text with no commentary."
    );
    if let Some(source) = source_language {
        instruction.push_str(&format!(" The source language is {source}."));
    }
    instruction
}

/// Instruction handed to a language model for a detection request.
pub(crate) const DETECT_LANGUAGE_INSTRUCTION: &str =
    "Identify the language of the following text. \
     Reply with only its two-letter ISO 639-1 code, nothing else.";

/// Reduces a model's detection reply to a usable short code. Models
/// occasionally pad the code with whitespace, punctuation or prose; anything
/// that does not reduce to a short alphabetic token is rejected.
pub(crate) fn normalize_language_code(reply: &str) -> Result<String, notes_ai::Error> {
    let mut tokens = reply.split_whitespace();
    let first = tokens.next().unwrap_or("");
    if tokens.next().is_some() {
        return Err(notes_ai::Error::Deserialization(format!(
            "Unusable language detection reply: {reply:?}"
        )));
    }
    let code: String = first.chars().filter(|c| c.is_ascii_alphabetic()).collect();

    if (2..=3).contains(&code.len()) {
        Ok(code.to_lowercase())
    } else {
        Err(notes_ai::Error::Deserialization(format!(
            "Unusable language detection reply: {reply:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_instruction_includes_source_hint_when_present() {
        let instruction = translate_instruction("Spanish", Some("en"));
        assert!(instruction.contains("into Spanish"));
        assert!(instruction.contains("The source language is en."));

        let without_hint = translate_instruction("Spanish", None);
        assert!(!without_hint.contains("source language"));
    }

    #[test]
    fn normalize_language_code_accepts_padded_codes() {
        assert_eq!(normalize_language_code("EN").unwrap(), "en");
        assert_eq!(normalize_language_code("  de \n").unwrap(), "de");
        assert_eq!(normalize_language_code("\"fr\"").unwrap(), "fr");
    }

    #[test]
    fn normalize_language_code_rejects_prose() {
        assert!(normalize_language_code("The language is English").is_err());
        assert!(normalize_language_code("").is_err());
    }
}
