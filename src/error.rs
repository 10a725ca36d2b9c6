use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("no couriers available")]
    NoCourierAvailable,

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DispatchError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            DispatchError::Unauthorized(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            DispatchError::NoCourierAvailable => (
                StatusCode::CONFLICT,
                "no couriers available".to_string(),
            ),
            DispatchError::InvalidStatus(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DispatchError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DispatchError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
