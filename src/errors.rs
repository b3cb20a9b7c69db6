//! Unified error type for the data-access layer and the HTTP surface.
//!
//! Store failures are classified once, when a [`sea_orm::DbErr`] is converted,
//! so that constraint violations surface as [`Error::Integrity`] and everything
//! else as [`Error::Database`]. The HTTP translation never exposes store details.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Integrity constraint violated: {message}")]
    Integrity { message: String },

    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Integrity { .. } => StatusCode::CONFLICT,
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(
                SqlErr::UniqueConstraintViolation(message)
                | SqlErr::ForeignKeyConstraintViolation(message),
            ) => Self::Integrity { message },
            _ => Self::Database(err),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Validation { message } => {
                tracing::warn!("Validation failed: {}", message);
                message.clone()
            }
            Self::NotFound { .. } => {
                tracing::info!("Resource not found: {}", self);
                self.to_string()
            }
            Self::Integrity { message } => {
                tracing::warn!("Integrity error: {}", message);
                "Database integrity error".to_string()
            }
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => {
                tracing::error!("Unexpected error: {}", self);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
