// GET /conversations/{id} and GET /conversations handlers

use tracing::info;
use uuid::Uuid;

use crate::models::{ConversationResponse, ListParams};
use crate::reject::{reject, ApiError};
use crate::store::Store;

pub async fn get_conversation_handler(
    id: Uuid,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(%id, "GET /conversations/:id");

    match store.get_conversation(id).await.map_err(reject)? {
        Some(conversation) => Ok(warp::reply::json(&ConversationResponse::from(conversation))),
        None => Err(warp::reject::custom(ApiError::NotFound(
            "Conversation not found".to_string(),
        ))),
    }
}

pub async fn list_conversations_handler(
    params: ListParams,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(skip = params.skip, limit = params.limit, "GET /conversations");

    let conversations = store
        .list_conversations(params.skip, params.limit)
        .await
        .map_err(reject)?;

    let body: Vec<ConversationResponse> =
        conversations.into_iter().map(Into::into).collect();
    Ok(warp::reply::json(&body))
}
