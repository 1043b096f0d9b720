use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn health(Extension(state): Extension<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "status": "ok",
        "uptime": state.started.elapsed().as_secs(),
        "environment": state.environment,
    }))
}
