use axum::{
    response::{IntoResponse, Response, Json},
    http::StatusCode,
};
use serde_json::json;
use crate::errors::AppError;

// The IntoResponse trait implementation converts AppError into a well-formed HTTP response.
// Every variant ends up as a status code plus a JSON {"message": ...} body;
// internal failures are logged here and reported without backend detail.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg),

            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),

            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),

            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),

            AppError::NoTasksToAssign => (
                StatusCode::BAD_REQUEST,
                "No tasks found to assign!".to_string(),
            ),

            // Store errors are internal server errors; the redis detail
            // stays in the log
            AppError::Store(e) => {
                tracing::error!("Store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }

            AppError::Hash(e) => {
                tracing::error!("Password hashing error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }

            AppError::Token(e) => {
                tracing::error!("Token signing error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
