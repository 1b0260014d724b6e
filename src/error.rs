use axum::extract::multipart::MultipartError;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tokio::task::JoinError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum WheelError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    #[error("Invalid cookie secret: {0}")]
    CookieKey(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Blocking task failed: {0}")]
    Join(#[from] JoinError),

    /// Rejected upload before any content was read.
    #[error("{0}")]
    Validation(String),

    /// Spreadsheet or CSV content could not be read; the message goes back to the caller verbatim.
    #[error("{0}")]
    Parse(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),
}

impl WheelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn parse(err: impl ToString) -> Self {
        Self::Parse(err.to_string())
    }
}

impl IntoResponse for WheelError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            WheelError::Validation(msg) | WheelError::Parse(msg) => (StatusCode::BAD_REQUEST, msg),
            WheelError::Multipart(err) => (err.status(), err.body_text()),
            err @ (WheelError::Database(_)
            | WheelError::Io(_)
            | WheelError::Config(_)
            | WheelError::CookieKey(_)
            | WheelError::PasswordHash(_)
            | WheelError::Join(_)) => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };
        (status, Json(ApiErrorResponse { error: message })).into_response()
    }
}

/// `{"error": "..."}`, the shape every failing JSON endpoint returns.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}
