use axum::http::{HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use http::StatusCode;
use thiserror::Error;

use crate::external::portfolio_store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("External error: {0}")]
    External(String),
    #[error("Not ready: {0}")]
    Unavailable(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Failures reaching or interpreting the chat-completion endpoint
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM features are disabled")]
    Disabled,
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("request timed out")]
    Timeout,
    #[error("rate limited by model provider")]
    RateLimited,
    #[error("API error: {0}")]
    ApiError(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Llm(LlmError::RateLimited) => {
                let mut headers = HeaderMap::new();
                headers.insert("Retry-After", HeaderValue::from_static("60"));
                (StatusCode::TOO_MANY_REQUESTS, headers, "Rate limited").into_response()
            }
            AppError::Llm(LlmError::Disabled) => {
                (StatusCode::SERVICE_UNAVAILABLE, "LLM features are disabled").into_response()
            }
            AppError::Llm(e) => (StatusCode::BAD_GATEWAY, e.to_string()).into_response(),
            AppError::Store(e) => (StatusCode::BAD_GATEWAY, e.to_string()).into_response(),
            AppError::External(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg).into_response(),
        }
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = AppError::NotFound("report".into()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = AppError::Validation("bad".into()).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let limited = AppError::Llm(LlmError::RateLimited).into_response();
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(limited.headers().get("Retry-After").unwrap(), "60");

        let store = AppError::Store(StoreError::Network("refused".into())).into_response();
        assert_eq!(store.status(), StatusCode::BAD_GATEWAY);

        let unloaded = AppError::Unavailable("holdings not loaded".into()).into_response();
        assert_eq!(unloaded.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
