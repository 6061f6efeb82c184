//! Ollama client implementation

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;

use super::error::LlmError;
use super::ndjson::parse_ndjson_stream;
use super::provider::{Generator, TextStream};
use super::types::{ChatCompletion, ChatMessage, ChatPayload, GenerationOptions, WireOptions};

/// Model used when `OLLAMA_MODEL_NAME` is not configured
pub const DEFAULT_MODEL: &str = "llama2";

/// Client for a locally hosted Ollama server
pub struct OllamaClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL of the Ollama daemon (typically http://localhost:11434)
    base_url: String,
    /// Model to use, resolved once for the process lifetime
    model: String,
}

impl OllamaClient {
    /// Create a new Ollama client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the Ollama daemon
    /// * `model` - Configured model name; falls back to [`DEFAULT_MODEL`]
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, model: Option<String>) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            http_client,
            base_url,
            model,
        })
    }

    /// The resolved model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn show_url(&self) -> String {
        format!("{}/api/show", self.base_url)
    }

    /// Issue a chat request and fail on a non-success status
    async fn post_chat(
        &self,
        messages: &[ChatMessage],
        options: &GenerationOptions,
        stream: bool,
    ) -> Result<reqwest::Response, LlmError> {
        let payload = ChatPayload {
            model: &self.model,
            messages,
            stream,
            options: WireOptions::from(options),
        };

        let response = self
            .http_client
            .post(self.chat_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(LlmError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Generator for OllamaClient {
    async fn generate(
        &self,
        messages: Vec<ChatMessage>,
        options: GenerationOptions,
    ) -> Result<String, LlmError> {
        let response = self.post_chat(&messages, &options, false).await?;
        let completion: ChatCompletion = response.json().await?;

        if let Some(message) = completion.error {
            return Err(LlmError::ProviderError(message));
        }

        let message = completion.message.ok_or_else(|| {
            LlmError::SerializationError("chat response is missing a message".to_string())
        })?;

        Ok(message.content.trim().to_string())
    }

    async fn generate_stream(
        &self,
        messages: Vec<ChatMessage>,
        options: GenerationOptions,
    ) -> Result<TextStream, LlmError> {
        let response = self.post_chat(&messages, &options, true).await?;

        let byte_stream = response.bytes_stream();
        let frames = parse_ndjson_stream(Box::pin(byte_stream));

        // Reduce frames to their text fragments; the final done frame
        // carries no content and is dropped here.
        let text_stream = frames.filter_map(|result| async move {
            match result {
                Ok(frame) => match frame.message {
                    Some(message) if !message.content.is_empty() => Some(Ok(message.content)),
                    _ => None,
                },
                Err(e) => Some(Err(e)),
            }
        });

        Ok(Box::pin(text_stream))
    }

    async fn context_length(&self) -> u64 {
        let payload = serde_json::json!({ "model": self.model });

        let response = match self
            .http_client
            .post(self.show_url())
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(_) => return 0,
        };

        if !response.status().is_success() {
            return 0;
        }

        let metadata: serde_json::Value = match response.json().await {
            Ok(value) => value,
            Err(_) => return 0,
        };

        context_length_from_metadata(&metadata)
    }
}

/// Extract the context length from `/api/show` metadata
///
/// The key is architecture-prefixed (e.g. `llama.context_length`).
fn context_length_from_metadata(metadata: &serde_json::Value) -> u64 {
    metadata
        .get("model_info")
        .and_then(serde_json::Value::as_object)
        .and_then(|info| {
            info.iter()
                .find(|(key, _)| key.ends_with(".context_length"))
                .and_then(|(_, value)| value.as_u64())
        })
        .unwrap_or(0)
}
