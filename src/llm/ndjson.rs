//! Parser for Ollama's streamed chat responses
//!
//! When `stream` is true, Ollama replies with newline-delimited JSON:
//! one complete object per line, each carrying a `message.content`
//! fragment, until a final object with `done: true`.
//!
//! This parser:
//! 1. Buffers incoming bytes
//! 2. Scans for line boundaries
//! 3. Parses each complete line as a response frame
//! 4. Returns a stream of parsed frames

use bytes::Bytes;
use futures::stream::Stream;
use futures::StreamExt;
use std::pin::Pin;

use super::error::LlmError;
use super::types::ChatCompletion;

pub(crate) fn parse_ndjson_stream(
    byte_stream: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send + Sync>>,
) -> Pin<Box<dyn Stream<Item = Result<ChatCompletion, LlmError>> + Send + Sync>> {
    // Buffer to accumulate partial lines
    let mut buffer = String::new();

    let frame_stream = byte_stream.flat_map(move |chunk_result| {
        let chunk = match chunk_result {
            Ok(bytes) => bytes,
            Err(e) => {
                return futures::stream::iter(vec![Err(LlmError::StreamError(e.to_string()))]);
            }
        };

        // Convert bytes to string and append to buffer
        let text = match std::str::from_utf8(&chunk) {
            Ok(t) => t,
            Err(e) => {
                return futures::stream::iter(vec![Err(LlmError::StreamError(format!(
                    "Invalid UTF-8 in stream: {}",
                    e
                )))]);
            }
        };

        buffer.push_str(text);

        // Process complete lines
        let mut frames = Vec::new();
        while let Some(line_end) = buffer.find('\n') {
            let line = buffer[..line_end].to_string();
            buffer.drain(..=line_end);

            if let Some(parsed) = parse_line(&line) {
                frames.push(parsed);
            }
        }

        // Return all frames found in this chunk
        futures::stream::iter(frames)
    });

    Box::pin(frame_stream)
}

/// Parse a single NDJSON line into a response frame
fn parse_line(line: &str) -> Option<Result<ChatCompletion, LlmError>> {
    let line = line.trim();

    // Skip blank lines
    if line.is_empty() {
        return None;
    }

    match serde_json::from_str::<ChatCompletion>(line) {
        Ok(frame) => {
            // Ollama reports mid-stream failures as an error object
            if let Some(message) = frame.error.as_deref() {
                Some(Err(LlmError::ProviderError(message.to_string())))
            } else {
                Some(Ok(frame))
            }
        }
        Err(e) => Some(Err(LlmError::SerializationError(format!(
            "Failed to parse chat response frame: {}. Data: {}",
            e, line
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn test_parse_single_frame() {
        let data =
            b"{\"message\":{\"role\":\"assistant\",\"content\":\"Hello\"},\"done\":false}\n";
        let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from_static(data))]));

        let mut frames = parse_ndjson_stream(byte_stream);
        let result = frames.next().await;

        assert!(result.is_some());
        let frame = result.unwrap().unwrap();
        assert!(!frame.done);
        assert_eq!(frame.message.unwrap().content, "Hello");
    }

    #[tokio::test]
    async fn test_parse_multiple_frames() {
        let data = b"{\"message\":{\"role\":\"assistant\",\"content\":\"Hel\"},\"done\":false}\n{\"message\":{\"role\":\"assistant\",\"content\":\"lo\"},\"done\":false}\n{\"message\":{\"role\":\"assistant\",\"content\":\"\"},\"done\":true}\n";
        let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from_static(data))]));

        let frames: Vec<_> = parse_ndjson_stream(byte_stream).collect().await;
        assert_eq!(frames.len(), 3);

        let first = frames[0].as_ref().unwrap();
        assert_eq!(first.message.as_ref().unwrap().content, "Hel");

        let last = frames[2].as_ref().unwrap();
        assert!(last.done);
    }

    #[tokio::test]
    async fn test_parse_chunked_frame() {
        // Simulate a frame arriving split across chunks
        let chunk1 = b"{\"message\":{\"role\":\"assistant\",\"con";
        let chunk2 = b"tent\":\"Hello\"},\"done\":false}\n";

        let byte_stream = Box::pin(stream::iter(vec![
            Ok(Bytes::from_static(chunk1)),
            Ok(Bytes::from_static(chunk2)),
        ]));

        let mut frames = parse_ndjson_stream(byte_stream);
        let result = frames.next().await;

        assert!(result.is_some());
        let frame = result.unwrap().unwrap();
        assert_eq!(frame.message.unwrap().content, "Hello");
    }

    #[tokio::test]
    async fn test_parse_error_frame() {
        let data = b"{\"error\":\"model 'missing' not found\"}\n";
        let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from_static(data))]));

        let mut frames = parse_ndjson_stream(byte_stream);
        let result = frames.next().await.unwrap();

        match result {
            Err(LlmError::ProviderError(message)) => {
                assert!(message.contains("not found"));
            }
            other => panic!("Expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_invalid_json() {
        let data = b"{not json}\n";
        let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from_static(data))]));

        let mut frames = parse_ndjson_stream(byte_stream);
        let result = frames.next().await;

        assert!(result.is_some());
        assert!(result.unwrap().is_err());
    }

    #[tokio::test]
    async fn test_skips_blank_lines() {
        let data = b"\n\n{\"message\":{\"role\":\"assistant\",\"content\":\"hi\"},\"done\":true}\n";
        let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from_static(data))]));

        let frames: Vec<_> = parse_ndjson_stream(byte_stream).collect().await;
        assert_eq!(frames.len(), 1);
    }
}
