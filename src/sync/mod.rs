pub mod event_api;
pub mod holiday_api;
pub mod leave_api;
pub mod sync_engine;
pub mod task_api;

pub use sync_engine::SyncEngine;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Per-source request lifecycle. While a source is `InFlight`, further
/// refresh attempts for it coalesce instead of issuing duplicate calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Done,
}

pub(crate) async fn ensure_success(
    response: reqwest::Response,
    context: &str,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();

    if status == 401 {
        tracing::error!("Authentication failed when fetching {}", context);
        return Err(ApiError::AuthenticationFailed);
    }
    if status == 404 {
        tracing::error!("Endpoint not found: {}", context);
        return Err(ApiError::NotFound(context.to_string()));
    }
    if status == 429 {
        tracing::warn!("Rate limit exceeded on {}", context);
        return Err(ApiError::RateLimited);
    }
    if !status.is_success() {
        let body = response.text().await?;
        tracing::error!(
            "Request for {} failed. Status: {}, Body: {}",
            context,
            status,
            body
        );
        return Err(ApiError::RequestError(format!("Status {}: {}", status, body)));
    }

    Ok(response)
}
