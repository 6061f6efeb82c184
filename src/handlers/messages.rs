// POST /messages and GET /sessions/{id}/messages handlers

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::llm::{ChatMessage, GenerationOptions, Generator};
use crate::models::{CreateMessageRequest, MessageResponse};
use crate::reject::{reject, ApiError};
use crate::store::{Sender, Store};

pub async fn create_message_handler(
    request: CreateMessageRequest,
    store: Store,
    generator: Arc<dyn Generator>,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(chat_session_id = %request.chat_session_id, "POST /messages");

    if store
        .get_session(request.chat_session_id)
        .await
        .map_err(reject)?
        .is_none()
    {
        return Err(warp::reject::custom(ApiError::NotFound(
            "Chat session not found".to_string(),
        )));
    }

    // 1. Store the incoming message
    store
        .create_message(request.chat_session_id, request.sender, &request.content)
        .await
        .map_err(reject)?;

    // 2. Call the model to generate a response
    let prompt = format!("User: {}\nAssistant:", request.content);
    let options = GenerationOptions::new(128).with_temperature(0.7);
    let assistant_content = generator
        .generate(vec![ChatMessage::user(prompt)], options)
        .await
        .map_err(reject)?;

    // 3. Store the assistant's response
    let assistant = store
        .create_message(
            request.chat_session_id,
            Sender::Assistant,
            &assistant_content,
        )
        .await
        .map_err(reject)?;

    // 4. Return the assistant's message
    Ok(warp::reply::json(&MessageResponse::from(assistant)))
}

pub async fn list_session_messages_handler(
    session_id: Uuid,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(%session_id, "GET /sessions/:id/messages");

    if store.get_session(session_id).await.map_err(reject)?.is_none() {
        return Err(warp::reject::custom(ApiError::NotFound(
            "Chat session not found".to_string(),
        )));
    }

    let messages = store
        .messages_for_session(session_id)
        .await
        .map_err(reject)?;
    let body: Vec<MessageResponse> = messages.into_iter().map(Into::into).collect();
    Ok(warp::reply::json(&body))
}
