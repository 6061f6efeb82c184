// POST /users and GET /users/{id} handlers

use tracing::info;
use uuid::Uuid;

use crate::models::{CreateUserRequest, UserResponse};
use crate::password;
use crate::reject::{reject, ApiError};
use crate::store::{self, Store};

pub async fn create_user_handler(
    request: CreateUserRequest,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(username = %request.username, "POST /users");

    let password_hash = password::hash_password(&request.password)
        .map_err(|e| warp::reject::custom(ApiError::Internal(e)))?;

    let user = match store
        .create_user(&request.username, &request.email, &password_hash)
        .await
    {
        Ok(user) => user,
        Err(store::Error::Conflict(_)) => {
            return Err(warp::reject::custom(ApiError::Conflict(
                "Username already registered".to_string(),
            )));
        }
        Err(other) => return Err(reject(other)),
    };

    Ok(warp::reply::json(&UserResponse::from(user)))
}

pub async fn get_user_handler(
    id: Uuid,
    store: Store,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(%id, "GET /users/:id");

    match store.get_user(id).await.map_err(reject)? {
        Some(user) => Ok(warp::reply::json(&UserResponse::from(user))),
        None => Err(warp::reject::custom(ApiError::NotFound(
            "User not found".to_string(),
        ))),
    }
}
