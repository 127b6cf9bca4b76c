//! OpenAI-compatible chat-completions client.
//!
//! This module provides the cloud implementation of every remote AI
//! capability the workflow needs: translation and language detection,
//! structured summarization, and OCR over note photos (via a multimodal
//! model). Any API speaking the OpenAI chat-completions dialect works here.

use super::{normalize_language_code, translate_instruction, DETECT_LANGUAGE_INSTRUCTION};
use async_trait::async_trait;
use log::*;
use notes_ai::traits::{language, summarization, vision};
use notes_ai::{Error, OcrExtraction, StructuredSummary};
use serde::{Deserialize, Serialize};

/// Request to the chat completions endpoint
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A single chat message; content is plain text or multimodal parts
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Response from the chat completions endpoint
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

const SUMMARIZE_PROMPT: &str = r#"Analyze the following meeting notes and produce a structured summary.

Return a JSON object with exactly this structure:
{
  "summary": "One-paragraph overview of the meeting",
  "action_items": ["A task someone committed to"],
  "key_points": ["An important point that was discussed"],
  "participants": ["A participant's name"],
  "decisions": ["A decision that was made"]
}

Guidelines:
- Keep each item to one concise sentence
- Omit "participants" and "decisions" entirely if none are identifiable
- Use empty arrays for "action_items" and "key_points" if nothing applies
- Return ONLY valid JSON, no markdown or explanation"#;

const OCR_PROMPT: &str = r#"Extract all legible text from this image of meeting notes.

Return a JSON object with exactly this structure:
{
  "extracted_text": "The text content, preserving line breaks",
  "detected_language": "two-letter ISO 639-1 code of the text, or null"
}

If the image contains no legible text, return an empty string for extracted_text.
Return ONLY valid JSON, no markdown or explanation."#;

fn system(content: impl Into<String>) -> ChatMessage {
    ChatMessage {
        role: "system".to_string(),
        content: MessageContent::Text(content.into()),
    }
}

fn user(content: impl Into<String>) -> ChatMessage {
    ChatMessage {
        role: "user".to_string(),
        content: MessageContent::Text(content.into()),
    }
}

/// Client for an OpenAI-compatible chat-completions API
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    vision_model: String,
}

impl OpenAiClient {
    /// Create a new client with the given API key, base URL and models
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: &str,
        vision_model: &str,
    ) -> Result<Self, Error> {
        let mut headers = reqwest::header::HeaderMap::new();

        let mut header_value =
            reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                warn!("Failed to create auth header: {:?}", e);
                Error::Configuration("Invalid API key format".to_string())
            })?;
        header_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, header_value);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            vision_model: vision_model.to_string(),
        })
    }

    /// Send one chat completion and return the first choice's text content
    async fn chat(&self, model: &str, messages: Vec<ChatMessage>) -> Result<String, Error> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages,
            temperature: Some(0.2),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach chat completions endpoint: {:?}", e);
                Error::Network(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse chat completions response: {:?}", e);
                Error::Deserialization("Invalid response from chat completions".to_string())
            })?;

            completion
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .filter(|content| !content.is_empty())
                .ok_or_else(|| {
                    Error::Deserialization("Chat completion contained no content".to_string())
                })
        } else if status.as_u16() == 429 {
            let retry_after_seconds = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok())
                .unwrap_or(1);
            Err(Error::RateLimited {
                retry_after_seconds,
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            error!("Chat completions API: {}", error_text);
            Err(Error::Provider(error_text))
        }
    }
}

#[async_trait]
impl language::Provider for OpenAiClient {
    async fn translate(
        &self,
        content: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> Result<String, Error> {
        debug!("Translating {} chars into {target_language}", content.len());

        let messages = vec![
            system(translate_instruction(target_language, source_language)),
            user(content),
        ];

        let translated = self.chat(&self.model, messages).await?;
        Ok(translated.trim().to_string())
    }

    async fn detect_language(&self, content: &str) -> Result<String, Error> {
        let messages = vec![system(DETECT_LANGUAGE_INSTRUCTION), user(content)];

        let reply = self.chat(&self.model, messages).await?;
        normalize_language_code(&reply)
    }

    fn provider_id(&self) -> &str {
        "openai"
    }

    async fn verify_credentials(&self) -> Result<bool, Error> {
        let url = format!("{}/models", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Failed to verify cloud API key: {:?}", e);
            Error::Network(e.to_string())
        })?;

        // 200 means a usable key; 401 means an invalid one.
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl summarization::Provider for OpenAiClient {
    async fn summarize(&self, content: &str) -> Result<StructuredSummary, Error> {
        let messages = vec![system(SUMMARIZE_PROMPT), user(content)];

        let reply = self.chat(&self.model, messages).await?;

        // A malformed structured response degrades gracefully: the raw text
        // becomes the summary and the item lists stay empty, rather than
        // failing the whole translate operation.
        match serde_json::from_str(&reply) {
            Ok(summary) => Ok(summary),
            Err(err) => {
                warn!(
                    "Failed to parse structured summary ({err}); degrading to raw text: {}",
                    reply
                );
                Ok(StructuredSummary::from_raw_text(reply))
            }
        }
    }

    fn provider_id(&self) -> &str {
        "openai"
    }
}

#[async_trait]
impl vision::Provider for OpenAiClient {
    async fn extract_text_and_language(&self, image_url: &str) -> Result<OcrExtraction, Error> {
        debug!("Running OCR over image at {image_url}");

        let messages = vec![ChatMessage {
            role: "user".to_string(),
            content: MessageContent::Parts(vec![
                ContentPart::Text {
                    text: OCR_PROMPT.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.to_string(),
                    },
                },
            ]),
        }];

        let reply = self.chat(&self.vision_model, messages).await?;

        serde_json::from_str(&reply).map_err(|e| {
            warn!(
                "Failed to parse OCR extraction response: {:?}, response: {}",
                e, reply
            );
            Error::Deserialization("Invalid JSON from OCR extraction".to_string())
        })
    }

    fn provider_id(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_ai::traits::language::Provider as _;
    use notes_ai::traits::summarization::Provider as _;
    use notes_ai::traits::vision::Provider as _;

    fn client(server: &mockito::ServerGuard) -> OpenAiClient {
        OpenAiClient::new("test-key", &server.url(), "gpt-test", "gpt-vision-test").unwrap()
    }

    fn completion_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    #[tokio::test]
    async fn translate_returns_the_completion_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(completion_body("Hola, este es un mensaje de prueba."))
            .create_async()
            .await;

        let translated = client(&server)
            .translate("Hello, this is a test message.", "Spanish", Some("en"))
            .await
            .unwrap();

        assert_eq!(translated, "Hola, este es un mensaje de prueba.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn provider_error_status_is_terminal() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("model overloaded")
            .create_async()
            .await;

        let result = client(&server)
            .translate("Hello", "Spanish", None)
            .await;

        assert!(matches!(result, Err(Error::Provider(text)) if text.contains("overloaded")));
    }

    #[tokio::test]
    async fn detect_language_normalizes_the_reply() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(completion_body("EN\n"))
            .create_async()
            .await;

        let code = client(&server).detect_language("Hello there").await.unwrap();

        assert_eq!(code, "en");
    }

    #[tokio::test]
    async fn summarize_parses_structured_json() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "summary": "Quarterly sync.",
            "action_items": ["Ship importer"],
            "key_points": ["Budget holds"],
            "participants": ["Ana"]
        })
        .to_string();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(completion_body(&body))
            .create_async()
            .await;

        let summary = client(&server).summarize("translated notes").await.unwrap();

        assert_eq!(summary.summary, "Quarterly sync.");
        assert_eq!(summary.action_items, vec!["Ship importer"]);
        assert_eq!(summary.participants.unwrap(), vec!["Ana"]);
    }

    #[tokio::test]
    async fn summarize_degrades_to_raw_text_on_malformed_json() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(completion_body("Here is your summary: everyone agreed."))
            .create_async()
            .await;

        let summary = client(&server).summarize("translated notes").await.unwrap();

        assert_eq!(summary.summary, "Here is your summary: everyone agreed.");
        assert!(summary.action_items.is_empty());
        assert!(summary.key_points.is_empty());
    }

    #[tokio::test]
    async fn ocr_parse_failure_is_terminal() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(completion_body("not json at all"))
            .create_async()
            .await;

        let result = client(&server)
            .extract_text_and_language("https://blobs.example.com/7/photo.png")
            .await;

        assert!(matches!(result, Err(Error::Deserialization(_))));
    }

    #[tokio::test]
    async fn ocr_returns_extracted_text_and_language() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "extracted_text": "Budget meeting notes",
            "detected_language": "en"
        })
        .to_string();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(completion_body(&body))
            .create_async()
            .await;

        let extraction = client(&server)
            .extract_text_and_language("https://blobs.example.com/7/photo.png")
            .await
            .unwrap();

        assert_eq!(extraction.extracted_text, "Budget meeting notes");
        assert_eq!(extraction.detected_language.as_deref(), Some("en"));
    }
}
