// POST /chat handler

use std::sync::Arc;

use tracing::info;

use crate::history::{ChatHistory, SharedHistory};
use crate::llm::{GenerationOptions, Generator};
use crate::models::{ChatRequest, ChatResponse};
use crate::reject::reject;

/// Generation parameters for the chat routes
pub(crate) fn chat_options() -> GenerationOptions {
    GenerationOptions::new(128).with_temperature(0.7)
}

pub async fn chat_handler(
    request: ChatRequest,
    history: SharedHistory,
    generator: Arc<dyn Generator>,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(message_len = request.message.len(), "POST /chat");

    match request.history {
        Some(entries) => {
            // Stateless: the caller owns the history and resends it
            // each call
            let mut local = ChatHistory::from_entries(entries);
            local.apply_system_prompt(&request.system_prompt);
            local.push_user(&request.message);

            let response = generator
                .generate(local.to_vec(), chat_options())
                .await
                .map_err(reject)?;
            local.push_assistant(&response);

            Ok(warp::reply::json(&ChatResponse {
                response,
                history: local.into_entries(),
            }))
        }
        None => {
            // Process-wide history; the lock is released while the
            // backend generates
            let messages = {
                let mut shared = history.lock().await;
                shared.apply_system_prompt(&request.system_prompt);
                shared.push_user(&request.message);
                shared.to_vec()
            };

            let response = generator
                .generate(messages, chat_options())
                .await
                .map_err(reject)?;

            let snapshot = {
                let mut shared = history.lock().await;
                shared.push_assistant(&response);
                shared.to_vec()
            };

            Ok(warp::reply::json(&ChatResponse {
                response,
                history: snapshot,
            }))
        }
    }
}
