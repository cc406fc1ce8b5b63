//! Error types for the lending catalog

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Postgres SQLSTATE codes the catalog reacts to
mod sqlstate {
    pub const UNIQUE_VIOLATION: &str = "23505";
    pub const FOREIGN_KEY_VIOLATION: &str = "23503";
    pub const CHECK_VIOLATION: &str = "23514";
    pub const NOT_NULL_VIOLATION: &str = "23502";
    pub const SERIALIZATION_FAILURE: &str = "40001";
    pub const DEADLOCK_DETECTED: &str = "40P01";
}

/// Numeric error codes returned in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    DbFailure = 3,
    NoSuchData = 20,
    Duplicate = 8,
    BadValue = 18,
    TransactionConflict = 22,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The targeted book or person does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A person with the same full name already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A field or id failed its length/range/required rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// The transaction could not commit
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl AppError {
    pub fn book_not_found(id: i32) -> Self {
        AppError::NotFound(format!("Book with id {} not found", id))
    }

    pub fn person_not_found(id: i32) -> Self {
        AppError::NotFound(format!("Person with id {} not found", id))
    }

    /// True when the whole operation can be re-run as-is (serialization
    /// conflict or deadlock). Nothing has been applied in that case.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Database(sqlx::Error::Database(db)) => {
                is_transient(db.code().as_deref())
            }
            _ => false,
        }
    }
}

fn is_transient(code: Option<&str>) -> bool {
    matches!(
        code,
        Some(sqlstate::SERIALIZATION_FAILURE) | Some(sqlstate::DEADLOCK_DETECTED)
    )
}

/// Which taxonomy bucket a constraint violation falls into
#[derive(Debug, PartialEq, Eq)]
enum Violation {
    Unique,
    MissingReference,
    BadValue,
}

fn classify(code: Option<&str>) -> Option<Violation> {
    match code? {
        sqlstate::UNIQUE_VIOLATION => Some(Violation::Unique),
        sqlstate::FOREIGN_KEY_VIOLATION => Some(Violation::MissingReference),
        sqlstate::CHECK_VIOLATION | sqlstate::NOT_NULL_VIOLATION => Some(Violation::BadValue),
        _ => None,
    }
}

fn describe_unique(constraint: Option<&str>) -> String {
    match constraint {
        Some("person_full_name_key") => "Person with this name already exists".to_string(),
        Some(name) => format!("Unique constraint {} violated", name),
        None => "Unique constraint violated".to_string(),
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            match classify(db.code().as_deref()) {
                Some(Violation::Unique) => {
                    return AppError::Conflict(describe_unique(db.constraint()));
                }
                Some(Violation::MissingReference) => {
                    return AppError::NotFound("Referenced person does not exist".to_string());
                }
                Some(Violation::BadValue) => {
                    return AppError::Validation(db.message().to_string());
                }
                None => {}
            }
        }
        AppError::Database(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retryable = self.is_retryable();
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::Database(e) if retryable => {
                tracing::warn!("Transaction conflict: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::TransactionConflict,
                    "Concurrent update, retry the request".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
