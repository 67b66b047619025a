use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::header::CONTENT_LENGTH;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use super::web::ApiError;
use super::AppState;

pub const TOKEN_HEADER: &str = "TOKEN";

/// Rejects requests whose `TOKEN` header is absent or differs from the
/// configured secret.
pub async fn authenticate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if token.is_empty() {
        warn!(path = %request.uri().path(), "Request without token");
        return ApiError::Unauthorized("token not found".into()).into_response();
    }
    if token != &*state.token {
        warn!(path = %request.uri().path(), "Request with invalid token");
        return ApiError::Unauthorized("invalid token".into()).into_response();
    }
    next.run(request).await
}

/// Logs method, path, status, response size and elapsed time of each request.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start_time = Instant::now();

    let response = next.run(request).await;

    let size = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(0);

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        size,
        elapsed = ?start_time.elapsed(),
        "Request handled"
    );
    response
}
