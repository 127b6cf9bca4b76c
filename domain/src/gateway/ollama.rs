//! Ollama client for locally hosted inference.
//!
//! The local implementation of the language capability: translate and
//! detect against an Ollama endpoint on the local network. Summarization
//! and OCR are not served locally; those stay on the cloud client.

use super::{normalize_language_code, translate_instruction, DETECT_LANGUAGE_INSTRUCTION};
use async_trait::async_trait;
use log::*;
use notes_ai::traits::language;
use notes_ai::Error;
use serde::{Deserialize, Serialize};

/// Request to Ollama's chat endpoint
#[derive(Debug, Serialize)]
pub struct OllamaChatRequest {
    pub model: String,
    pub messages: Vec<OllamaMessage>,
    /// Always false; the workflow consumes complete replies only
    pub stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaMessage {
    pub role: String,
    pub content: String,
}

/// Response from Ollama's chat endpoint
#[derive(Debug, Deserialize)]
pub struct OllamaChatResponse {
    pub message: OllamaMessage,
}

/// Client for a locally hosted Ollama endpoint
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a new client for the given endpoint and model. Local
    /// endpoints are unauthenticated.
    pub fn new(base_url: &str, model: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    async fn chat(&self, messages: Vec<OllamaMessage>) -> Result<String, Error> {
        let url = format!("{}/api/chat", self.base_url);

        let request = OllamaChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach local Ollama endpoint: {:?}", e);
                Error::Network(e.to_string())
            })?;

        if response.status().is_success() {
            let completion: OllamaChatResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse Ollama response: {:?}", e);
                Error::Deserialization("Invalid response from Ollama".to_string())
            })?;
            Ok(completion.message.content)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            error!("Ollama API: {}", error_text);
            Err(Error::Provider(error_text))
        }
    }
}

#[async_trait]
impl language::Provider for OllamaClient {
    async fn translate(
        &self,
        content: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> Result<String, Error> {
        debug!(
            "Translating {} chars into {target_language} on local model {}",
            content.len(),
            self.model
        );

        let messages = vec![
            OllamaMessage {
                role: "system".to_string(),
                content: translate_instruction(target_language, source_language),
            },
            OllamaMessage {
                role: "user".to_string(),
                content: content.to_string(),
            },
        ];

        let translated = self.chat(messages).await?;
        Ok(translated.trim().to_string())
    }

    async fn detect_language(&self, content: &str) -> Result<String, Error> {
        let messages = vec![
            OllamaMessage {
                role: "system".to_string(),
                content: DETECT_LANGUAGE_INSTRUCTION.to_string(),
            },
            OllamaMessage {
                role: "user".to_string(),
                content: content.to_string(),
            },
        ];

        let reply = self.chat(messages).await?;
        normalize_language_code(&reply)
    }

    fn provider_id(&self) -> &str {
        "ollama"
    }

    async fn verify_credentials(&self) -> Result<bool, Error> {
        // No credentials locally; a reachable endpoint is a usable one.
        let url = format!("{}/api/tags", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Failed to reach local Ollama endpoint: {:?}", e);
            Error::Network(e.to_string())
        })?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_ai::traits::language::Provider as _;

    fn chat_body(content: &str) -> String {
        serde_json::json!({
            "model": "llama-test",
            "message": {"role": "assistant", "content": content}
        })
        .to_string()
    }

    #[tokio::test]
    async fn translate_returns_the_local_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(chat_body("Hallo, dies ist eine Testnachricht."))
            .create_async()
            .await;

        let client = OllamaClient::new(&server.url(), "llama-test").unwrap();
        let translated = client
            .translate("Hello, this is a test message.", "German", Some("en"))
            .await
            .unwrap();

        assert_eq!(translated, "Hallo, dies ist eine Testnachricht.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn local_failure_surfaces_as_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body("model not loaded")
            .create_async()
            .await;

        let client = OllamaClient::new(&server.url(), "llama-test").unwrap();
        let result = client.translate("Hello", "German", None).await;

        assert!(matches!(result, Err(Error::Provider(text)) if text.contains("not loaded")));
    }

    #[tokio::test]
    async fn detect_language_normalizes_the_reply() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(chat_body(" de "))
            .create_async()
            .await;

        let client = OllamaClient::new(&server.url(), "llama-test").unwrap();
        let code = client.detect_language("Hallo zusammen").await.unwrap();

        assert_eq!(code, "de");
    }
}
