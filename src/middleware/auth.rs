use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::services::AppState;

// User id resolved from a verified token, attached to the request for the
// handlers downstream.
#[derive(Debug, Clone)]
pub struct Caller(pub String);

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path();

    // Public surface: banner, register/login, and the shared read view
    if path == "/"
        || path == "/api/user/register"
        || path == "/api/user/login"
        || path.starts_with("/taskshare/shared/")
    {
        return next.run(req).await;
    }

    let header = match req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        Some(value) => value,
        None => {
            return AppError::Unauthenticated("User is not logged in!!!".to_string())
                .into_response();
        }
    };

    // Clients send either the bare token or a Bearer-prefixed one
    let token = header.strip_prefix("Bearer ").unwrap_or(header);

    match state.tokens.verify(token) {
        Some(user_id) => {
            req.extensions_mut().insert(Caller(user_id));
            next.run(req).await
        }
        None => {
            tracing::warn!("Rejected request with invalid token on {}", path);
            AppError::Unauthenticated("invalid token".to_string()).into_response()
        }
    }
}
