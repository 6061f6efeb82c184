// Typed rejections and their mapping to HTTP error responses

use std::convert::Infallible;

use warp::filters::body::BodyDeserializeError;
use warp::http::header::{HeaderValue, WWW_AUTHENTICATE};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::llm::LlmError;
use crate::models::ErrorResponse;
use crate::store;

/// Errors a handler can reject with
#[derive(Debug)]
pub enum ApiError {
    /// Referenced entity does not exist
    NotFound(String),
    /// Duplicate username or email
    Conflict(String),
    /// Missing or invalid bearer token
    Unauthorized,
    /// The generation backend failed
    Upstream(String),
    /// The store failed
    Database(String),
    /// Anything else that should surface as a 500
    Internal(String),
}

impl warp::reject::Reject for ApiError {}

impl From<store::Error> for ApiError {
    fn from(err: store::Error) -> Self {
        match err {
            store::Error::Conflict(msg) => ApiError::Conflict(msg),
            other => ApiError::Database(other.to_string()),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

/// Wrap an error into a warp rejection
pub fn reject(err: impl Into<ApiError>) -> Rejection {
    warp::reject::custom(err.into())
}

/// Convert rejections into JSON error responses
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let mut unauthorized = false;

    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(api_error) = err.find::<ApiError>() {
        match api_error {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized => {
                unauthorized = true;
                (StatusCode::UNAUTHORIZED, "Invalid or missing bearer token".to_string())
            }
            ApiError::Upstream(msg) => {
                tracing::error!(error = %msg, "generation backend failure");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Generation failed: {}", msg))
            }
            ApiError::Database(msg) => {
                tracing::error!(error = %msg, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        }
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid query string".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        tracing::error!(?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    let json = warp::reply::json(&ErrorResponse { error: message });
    let mut response = warp::reply::with_status(json, status).into_response();

    // Unauthorized responses carry the challenge header
    if unauthorized {
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }

    Ok(response)
}
