// Bearer-token authentication filter

use std::sync::Arc;

use warp::Filter;

use crate::reject::ApiError;

/// Require `Authorization: Bearer <token>` matching the configured
/// secret on every request passing through this filter
pub fn require_bearer(
    token: Arc<String>,
) -> impl Filter<Extract = (), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization")
        .and_then(move |header: Option<String>| {
            let token = token.clone();
            async move {
                match header
                    .as_deref()
                    .and_then(|value| value.strip_prefix("Bearer "))
                {
                    Some(presented) if presented == token.as_str() => Ok(()),
                    _ => Err(warp::reject::custom(ApiError::Unauthorized)),
                }
            }
        })
        .untuple_one()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> impl Filter<Extract = (&'static str,), Error = warp::Rejection> + Clone {
        require_bearer(Arc::new("secret".to_string())).map(|| "ok")
    }

    #[tokio::test]
    async fn test_accepts_valid_token() {
        let result = warp::test::request()
            .header("authorization", "Bearer secret")
            .filter(&filter())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_wrong_token() {
        let result = warp::test::request()
            .header("authorization", "Bearer wrong")
            .filter(&filter())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rejects_missing_header() {
        let result = warp::test::request().filter(&filter()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rejects_non_bearer_scheme() {
        let result = warp::test::request()
            .header("authorization", "Basic c2VjcmV0")
            .filter(&filter())
            .await;
        assert!(result.is_err());
    }
}
