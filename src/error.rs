use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors surfaced to API and page clients as `{"error": message}`.
///
/// Internal and storage failures echo their message to the caller; the
/// service assumes trusted operators.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Parse(String),
    NotFound(String),
    DisallowedHost(String),
    Internal(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {msg}"),
            AppError::Parse(msg) => write!(f, "Parse Error: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::DisallowedHost(host) => write!(f, "Disallowed Host: {host}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            AppError::Database(err) => write!(f, "Database Error: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Parse(_) | AppError::DisallowedHost(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Validation(msg) | AppError::Parse(msg) | AppError::NotFound(msg) => msg,
            AppError::DisallowedHost(host) => {
                tracing::warn!(%host, "Rejected request for disallowed host");
                "Invalid host".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                msg
            }
            AppError::Database(err) => {
                tracing::error!("Database error: {err}");
                err.to_string()
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Internal(format!("Template error: {err}"))
    }
}
