// POST /sessions and GET /users/{id}/sessions handlers

use tracing::info;
use uuid::Uuid;

use crate::models::{CreateSessionRequest, SessionResponse};
use crate::reject::{reject, ApiError};
use crate::store::Store;

pub async fn create_session_handler(
    request: CreateSessionRequest,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(user_id = %request.user_id, "POST /sessions");

    if store
        .get_user(request.user_id)
        .await
        .map_err(reject)?
        .is_none()
    {
        return Err(warp::reject::custom(ApiError::NotFound(
            "User not found".to_string(),
        )));
    }

    let session = store.create_session(request.user_id).await.map_err(reject)?;
    Ok(warp::reply::json(&SessionResponse::from(session)))
}

pub async fn list_user_sessions_handler(
    user_id: Uuid,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(%user_id, "GET /users/:id/sessions");

    if store.get_user(user_id).await.map_err(reject)?.is_none() {
        return Err(warp::reject::custom(ApiError::NotFound(
            "User not found".to_string(),
        )));
    }

    let sessions = store.sessions_for_user(user_id).await.map_err(reject)?;
    let body: Vec<SessionResponse> = sessions.into_iter().map(Into::into).collect();
    Ok(warp::reply::json(&body))
}
