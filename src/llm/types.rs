//! Core types for the Ollama client

use serde::{Deserialize, Serialize};

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Behavior-defining instructions
    System,
    /// Human input
    User,
    /// Model output
    Assistant,
}

/// A single role-tagged message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a new system message
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }

    /// Create a new user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}

/// Parameters for controlling text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Randomness (0.0-1.0, higher = more random)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationOptions {
    /// Create a new configuration with the specified max tokens
    pub fn new(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            temperature: None,
        }
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: 128,
            temperature: None,
        }
    }
}

/// Request body for Ollama's `/api/chat` endpoint
#[derive(Debug, Serialize)]
pub(crate) struct ChatPayload<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
    pub options: WireOptions,
}

/// Generation options under the names Ollama expects
#[derive(Debug, Serialize)]
pub(crate) struct WireOptions {
    pub num_predict: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl From<&GenerationOptions> for WireOptions {
    fn from(options: &GenerationOptions) -> Self {
        Self {
            num_predict: options.max_tokens,
            temperature: options.temperature,
        }
    }
}

/// Message inside a chat response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireMessage {
    #[allow(dead_code)]
    pub role: String,
    pub content: String,
}

/// One `/api/chat` response object: the complete response when not
/// streaming, or a single NDJSON frame when streaming
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatCompletion {
    #[serde(default)]
    pub message: Option<WireMessage>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_user_constructor() {
        let msg = ChatMessage::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_message_system_constructor() {
        let msg = ChatMessage::system("You are terse.");
        assert_eq!(msg.role, Role::System);
        assert_eq!(msg.content, "You are terse.");
    }

    #[test]
    fn test_message_assistant_constructor() {
        let msg = ChatMessage::assistant("Hi there");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Hi there");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_chat_message_round_trip() {
        let msg = ChatMessage::assistant("The weather is sunny.");
        let json = serde_json::to_string(&msg).unwrap();
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_options_default() {
        let options = GenerationOptions::default();
        assert_eq!(options.max_tokens, 128);
        assert!(options.temperature.is_none());
    }

    #[test]
    fn test_options_builder() {
        let options = GenerationOptions::new(256).with_temperature(0.7);
        assert_eq!(options.max_tokens, 256);
        assert_eq!(options.temperature, Some(0.7));
    }

    #[test]
    fn test_wire_options_mapping() {
        let options = GenerationOptions::new(64).with_temperature(0.2);
        let wire = WireOptions::from(&options);
        let json = serde_json::to_string(&wire).unwrap();
        assert!(json.contains("\"num_predict\":64"));
        assert!(json.contains("\"temperature\":0.2"));
    }

    #[test]
    fn test_wire_options_omits_unset_temperature() {
        let wire = WireOptions::from(&GenerationOptions::new(64));
        let json = serde_json::to_string(&wire).unwrap();
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_chat_payload_serialization() {
        let messages = vec![ChatMessage::user("hi")];
        let payload = ChatPayload {
            model: "llama2",
            messages: &messages,
            stream: false,
            options: WireOptions::from(&GenerationOptions::default()),
        };
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&payload).unwrap()).unwrap();
        assert_eq!(value["model"], "llama2");
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
        assert_eq!(value["options"]["num_predict"], 128);
    }

    #[test]
    fn test_chat_completion_deserialization() {
        let json = r#"{"model":"llama2","message":{"role":"assistant","content":"Hello!"},"done":true}"#;
        let completion: ChatCompletion = serde_json::from_str(json).unwrap();
        assert!(completion.done);
        assert_eq!(completion.message.unwrap().content, "Hello!");
        assert!(completion.error.is_none());
    }

    #[test]
    fn test_chat_completion_error_frame() {
        let json = r#"{"error":"model 'missing' not found"}"#;
        let completion: ChatCompletion = serde_json::from_str(json).unwrap();
        assert!(completion.message.is_none());
        assert_eq!(completion.error.as_deref(), Some("model 'missing' not found"));
    }
}
