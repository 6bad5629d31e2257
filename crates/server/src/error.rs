use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::catalog::view::Notice;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
}

#[derive(Clone, Debug, Error)]
pub enum ValidationError {
    #[error("input value is invalid: `{value}`, reason: {reason}")]
    InvalidInput { value: String, reason: String },
    #[error("limit exceeded for {subject}, allowed {limit} {unit}(s), got {attempted}")]
    LimitExceeded {
        subject: String,
        unit: String,
        attempted: usize,
        limit: usize,
    },
    #[error("a category must be selected before uploading")]
    MissingCategory,
    #[error("requested object doesn't exist")]
    NotFound,
}

/// Failures of the two external collaborators: the metadata store and the blob store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("blob io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("object `{bucket}/{key}` not found")]
    ObjectNotFound { bucket: String, key: String },
    #[error("invalid object key `{0}`")]
    InvalidKey(String),
    #[error("stored data is inconsistent: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ObjectNotFound { .. } | Self::Sqlx(sqlx::Error::RowNotFound)
        )
    }
}

impl RequestError {
    /// Attaches the user-facing notice the failed operation should show.
    pub fn with_notice(self, notice: Notice) -> NoticedError {
        NoticedError {
            error: self,
            notice,
        }
    }

    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            Self::Validation(e @ ValidationError::NotFound) => (StatusCode::NOT_FOUND, e.to_string()),
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Store(e) if e.is_not_found() => (StatusCode::NOT_FOUND, "not found".into()),
            Self::Store(e @ StoreError::InvalidKey(_)) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Store(e) => {
                error!("received internal error for user request: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".into(),
                )
            }
            Self::Multipart(e) => (e.status(), e.body_text()),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        let error = json!({ "error": error }).to_string();
        (status, error).into_response()
    }
}

#[derive(Debug)]
pub struct NoticedError {
    pub error: RequestError,
    pub notice: Notice,
}

impl IntoResponse for NoticedError {
    fn into_response(self) -> Response {
        let (status, error) = self.error.status_and_message();
        let error = json!({ "error": error, "notice": self.notice }).to_string();
        (status, error).into_response()
    }
}
