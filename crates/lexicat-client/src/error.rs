//! Client error taxonomy.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Failure talking to the backend. Validation failures never appear here —
/// validators return verdicts, not errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("request rejected by server validation")]
    Unprocessable,
    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },
}

impl ApiError {
    /// The message to surface to the user. A `422` body is treated as not
    /// directly displayable, so the caller's fixed fallback is shown; any
    /// other HTTP failure carries the backend-provided detail verbatim.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            ApiError::Status { detail, .. } => detail,
            _ => fallback,
        }
    }
}

/// Error body shape used by the backend: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Map a non-success response to the error taxonomy.
pub(crate) async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::UNPROCESSABLE_ENTITY => Err(ApiError::Unprocessable),
        _ => {
            let detail = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.detail)
                .unwrap_or_else(|_| status.to_string());
            Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }
}
