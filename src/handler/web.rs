use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ProductError;

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Failure envelope: `{"status": 404, "code": "Not Found", "message": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub code: String,
    pub message: String,
}

pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(DataResponse { data })).into_response()
}

pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        status: status.as_u16(),
        code: status.canonical_reason().unwrap_or("Unknown").to_string(),
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

/// Everything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Product(ProductError),
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        ApiError::Product(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Product(err) => match err {
                ProductError::NotFound(_) | ProductError::NoProductsFound => StatusCode::NOT_FOUND,
                ProductError::Validation(_)
                | ProductError::StockUnavailable(_)
                | ProductError::NotPublished(_) => StatusCode::BAD_REQUEST,
                ProductError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                ProductError::ActorCommunicationError(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::Unauthorized(msg) => msg,
            ApiError::Product(err) => err.to_string(),
        };
        failure(status, message)
    }
}
