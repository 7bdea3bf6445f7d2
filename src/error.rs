// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::time::Duration;

use crate::message::ErrorBody;

/// Upstream error bodies end up in user-facing text, so only a prefix is kept.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Errors that reach the HTTP layer.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Json(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Internal(msg) => {
                tracing::error!("Unexpected failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Failures of an upstream text or speech provider.
///
/// These never leave the orchestrator; they are folded into a degraded
/// response instead.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response format: {0}")]
    Format(String),

    #[error("provider returned no {0}")]
    EmptyOutput(&'static str),

    #[error("timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
}

impl ProviderError {
    /// Turns a non-success response into a `Status` error, otherwise hands it back.
    pub async fn check(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::Status {
            status,
            body: truncate_body(&body),
        })
    }
}

fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
