//! Generator trait for generation backends

use async_trait::async_trait;
use futures::stream::Stream;
use std::pin::Pin;

use super::{
    error::LlmError,
    types::{ChatMessage, GenerationOptions},
};

/// A finite, one-shot stream of generated text fragments
///
/// Consuming it again requires a new `generate_stream` call.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + Sync>>;

/// Interface the route layer uses to talk to a generation backend
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a complete reply for the given conversation
    ///
    /// Backend failures are not retried; a transient failure is a hard
    /// failure for the request.
    async fn generate(
        &self,
        messages: Vec<ChatMessage>,
        options: GenerationOptions,
    ) -> Result<String, LlmError>;

    /// Generate a reply as a lazy sequence of text fragments
    async fn generate_stream(
        &self,
        messages: Vec<ChatMessage>,
        options: GenerationOptions,
    ) -> Result<TextStream, LlmError>;

    /// Maximum context length of the configured model
    ///
    /// Returns 0 when the backend cannot report it.
    async fn context_length(&self) -> u64;
}
