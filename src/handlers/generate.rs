// POST /generate handler

use std::sync::Arc;

use tracing::info;

use crate::llm::{ChatMessage, GenerationOptions, Generator};
use crate::models::{ConversationResponse, GenerateRequest};
use crate::reject::reject;
use crate::store::Store;

pub async fn generate_handler(
    request: GenerateRequest,
    store: Store,
    generator: Arc<dyn Generator>,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(prompt_len = request.prompt.len(), "POST /generate");

    let options = GenerationOptions::new(request.max_tokens.unwrap_or(128))
        .with_temperature(request.temperature.unwrap_or(0.7));

    let response = generator
        .generate(vec![ChatMessage::user(&request.prompt)], options)
        .await
        .map_err(reject)?;

    let conversation = store
        .create_conversation(&request.prompt, &response)
        .await
        .map_err(reject)?;

    Ok(warp::reply::json(&ConversationResponse::from(conversation)))
}
