// POST /chat/stream handler

use std::sync::Arc;

use futures_util::stream::StreamExt;
use tracing::info;

use super::chat::chat_options;
use crate::history::{ChatHistory, SharedHistory};
use crate::llm::Generator;
use crate::models::ChatRequest;
use crate::reject::reject;
use crate::sse::{create_chunk_event, create_done_event, create_error_event};

pub async fn chat_stream_handler(
    request: ChatRequest,
    history: SharedHistory,
    generator: Arc<dyn Generator>,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(message_len = request.message.len(), "POST /chat/stream");

    // With a caller-supplied history the call is stateless and the
    // caller extends its own copy; otherwise the process-wide history
    // gains the assistant entry once the stream has completed.
    let (messages, shared) = match request.history {
        Some(entries) => {
            let mut local = ChatHistory::from_entries(entries);
            local.apply_system_prompt(&request.system_prompt);
            local.push_user(&request.message);
            (local.into_entries(), None)
        }
        None => {
            let mut guard = history.lock().await;
            guard.apply_system_prompt(&request.system_prompt);
            guard.push_user(&request.message);
            (guard.to_vec(), Some(history.clone()))
        }
    };

    let chunks = generator
        .generate_stream(messages, chat_options())
        .await
        .map_err(reject)?;

    let event_stream = async_stream::stream! {
        let mut chunks = chunks;
        let mut reply = String::new();
        let mut failed = false;

        while let Some(item) = chunks.next().await {
            match item {
                Ok(text) => {
                    reply.push_str(&text);
                    yield create_chunk_event(text);
                }
                Err(e) => {
                    // Headers are already out; report the failure in-band
                    yield create_error_event(e.to_string());
                    failed = true;
                    break;
                }
            }
        }

        if !failed {
            // The assistant entry is recorded only after every chunk
            // has been produced and concatenated
            if let Some(history) = shared {
                let mut guard = history.lock().await;
                guard.push_assistant(reply);
            }
            yield create_done_event();
        }
    };

    Ok(warp::sse::reply(
        warp::sse::keep_alive().stream(event_stream),
    ))
}
