use axum::{Extension, Json};
use duka_core::error::DukaError;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::middleware::jwt::JwtConfig;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/admin/login. Compares against the single configured admin
/// credential pair and returns a bearer token on success.
pub async fn login(
    Extension(state): Extension<AppState>,
    Extension(jwt): Extension<JwtConfig>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    if req.username != state.admin_user || req.password != state.admin_pass {
        tracing::warn!(target: "duka.auth", username = %req.username, "login rejected");
        return Err(DukaError::Unauthorized("invalid credentials".into()).into());
    }
    let token = jwt.issue(&req.username)?;
    tracing::info!(target: "duka.auth", username = %req.username, "admin logged in");
    Ok(Json(json!({ "token": token, "message": "login successful" })))
}
