use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of ledger operations.
///
/// Every variant except `Db` is a deterministic validation outcome.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Player '{0}' already exists")]
    DuplicateName(String),
    #[error("Player name required")]
    InvalidName,
    #[error("Points cannot be 0")]
    InvalidDelta,
    #[error("Pot count must be at least 1, got {0}")]
    InvalidCount(i64),
    #[error("Adding {0} points would overflow the running total")]
    TotalOverflow(i64),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(_) => AppError::NotFound(err.to_string()),
            LedgerError::DuplicateName(_) => AppError::Conflict(err.to_string()),
            LedgerError::InvalidName
            | LedgerError::InvalidDelta
            | LedgerError::InvalidCount(_)
            | LedgerError::TotalOverflow(_) => {
                AppError::BadRequest(err.to_string())
            }
            LedgerError::Db(e) => {
                tracing::error!(error = %e, "Database failure");
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Admin access required".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
