//! Bridges `DukaError` into axum responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use duka_core::error::DukaError;

/// Wrapper so handlers can return `Result<_, AppError>` and use `?` on any
/// service call. Every error becomes `{"error": "..."}` with the status
/// taken from [`DukaError::http_status`].
pub struct AppError(pub DukaError);

impl From<DukaError> for AppError {
    fn from(err: DukaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(target: "duka.http", error = %self.0, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}
