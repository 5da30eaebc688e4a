pub mod crud;
pub mod health;

use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use serde_json::{json, Value};

/// Confirmation body returned by every successful mutation
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// JSON 404 for paths no route matches
pub async fn fallback() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "The requested URL was not found on the server." })),
    )
}

/// JSON 405 for known paths hit with an unsupported method
pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "The method is not allowed for the requested URL." })),
    )
}
