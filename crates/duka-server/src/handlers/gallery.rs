use axum::extract::Path;
use axum::{Extension, Json};
use chrono::Utc;
use duka_core::error::DukaError;
use duka_core::types::{GalleryEntry, NewGalleryEntry};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/gallery. Public.
pub async fn list(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<GalleryEntry>>, AppError> {
    Ok(Json(state.gallery.list().await?))
}

/// POST /api/gallery (admin).
pub async fn create(
    Extension(state): Extension<AppState>,
    Json(req): Json<NewGalleryEntry>,
) -> Result<Json<Value>, AppError> {
    if req.url.trim().is_empty() {
        return Err(DukaError::InvalidInput("gallery url is required".into()).into());
    }
    let entry = GalleryEntry {
        id: Uuid::new_v4(),
        url: req.url.trim().to_string(),
        caption: req.caption,
        created_at: Utc::now(),
    };
    state.gallery.insert(&entry).await?;
    Ok(Json(json!({ "success": true, "entry": entry })))
}

/// DELETE /api/gallery/:id (admin).
pub async fn remove(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.gallery.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}
