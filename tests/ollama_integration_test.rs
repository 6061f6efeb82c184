//! Integration tests against a live Ollama daemon
//!
//! Run with `cargo test -- --ignored`. Requires a running Ollama
//! server (`OLLAMA_URL`, default http://localhost:11434) with the
//! configured model pulled (`OLLAMA_MODEL_NAME`, default llama2).

use futures::StreamExt;

use ollama_chat::llm::{ChatMessage, GenerationOptions, Generator, OllamaClient};

fn client_from_env() -> OllamaClient {
    dotenvy::dotenv().ok();
    let url =
        std::env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".to_string());
    let model = std::env::var("OLLAMA_MODEL_NAME").ok();
    OllamaClient::new(url, model).expect("Failed to create Ollama client")
}

#[tokio::test]
#[ignore] // Run with --ignored flag since it requires a running Ollama daemon
async fn test_generate_returns_trimmed_text() {
    let client = client_from_env();

    let reply = client
        .generate(
            vec![ChatMessage::user("Say the word hello and nothing else.")],
            GenerationOptions::new(32).with_temperature(0.0),
        )
        .await
        .expect("Generation failed");

    assert!(!reply.is_empty());
    assert_eq!(reply, reply.trim());
}

#[tokio::test]
#[ignore] // Run with --ignored flag since it requires a running Ollama daemon
async fn test_generate_stream_yields_fragments() {
    let client = client_from_env();

    let mut stream = client
        .generate_stream(
            vec![ChatMessage::user("Count from 1 to 5.")],
            GenerationOptions::new(64),
        )
        .await
        .expect("Failed to open stream");

    let mut full = String::new();
    let mut fragments = 0;
    while let Some(item) = stream.next().await {
        full.push_str(&item.expect("Stream chunk failed"));
        fragments += 1;
    }

    assert!(fragments >= 1);
    assert!(!full.is_empty());
}

#[tokio::test]
#[ignore] // Run with --ignored flag since it requires a running Ollama daemon
async fn test_context_length_query() {
    let client = client_from_env();

    let length = client.context_length().await;

    // Metadata may be unavailable, in which case zero is reported
    // rather than an error
    assert!(length == 0 || length >= 512);
}

#[tokio::test]
#[ignore] // Run with --ignored flag since it requires a running Ollama daemon
async fn test_unknown_model_is_an_error() {
    dotenvy::dotenv().ok();
    let url =
        std::env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".to_string());
    let client = OllamaClient::new(url, Some("definitely-not-a-model".to_string()))
        .expect("Failed to create Ollama client");

    let result = client
        .generate(vec![ChatMessage::user("hi")], GenerationOptions::default())
        .await;

    assert!(result.is_err());
}
