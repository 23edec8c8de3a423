use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sitedesk_core::ValidationError;
use sitedesk_provider::ProviderError;
use sitedesk_store::StoreError;
use thiserror::Error;
use tracing::error;

/// Errors that can occur when running the sitedesk server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request is missing fields, has invalid values, or is not JSON.
    #[error("{0}")]
    BadRequest(String),

    /// The endpoint needs an integration that has no credential.
    #[error("{service} is not configured")]
    NotConfigured {
        service: &'static str,
        hint: &'static str,
    },

    /// The email provider rejected the message.
    #[error("email provider rejected the request ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The content store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Anything else. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),

    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for ServerError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ProviderError> for ServerError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected { status, message } => Self::Upstream { status, message },
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            Self::NotConfigured { service, hint } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "error": format!("{service} is not configured"),
                    "hint": hint,
                }),
            ),
            Self::Upstream { status, message } => (
                StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                serde_json::json!({
                    "error": "Failed to send email",
                    "details": message,
                }),
            ),
            Self::Store(e) => {
                let message = if e.is_conflict() {
                    "Content changed while saving; reload and try again"
                } else {
                    "Failed to save content"
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": message, "details": e.to_string() }),
                )
            }
            Self::Internal(detail) => {
                error!(error = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "Internal server error" }),
                )
            }
            Self::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": msg }),
            ),
            Self::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": e.to_string() }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
