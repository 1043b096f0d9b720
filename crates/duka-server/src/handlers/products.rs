use axum::extract::Path;
use axum::{Extension, Json};
use duka_core::types::{NewProduct, Product};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/products. Public; the storefront renders the catalog from this.
pub async fn list(Extension(state): Extension<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.catalog.list_products().await?))
}

/// POST /api/products (admin).
pub async fn create(
    Extension(state): Extension<AppState>,
    Json(req): Json<NewProduct>,
) -> Result<Json<Value>, AppError> {
    let product = state.catalog.create_product(req).await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

/// DELETE /api/products/:id (admin).
pub async fn remove(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.catalog.delete_product(id).await?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    /// Units to add to the current stock. Missing means 0, which makes the
    /// request a pure cost-price update.
    #[serde(default)]
    pub add_qty: i64,
    /// New unit cost. Omitted or 0 keeps the recorded cost.
    pub cost_price: Option<i64>,
}

/// PATCH /api/products/:id/restock (admin).
pub async fn restock(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RestockRequest>,
) -> Result<Json<Value>, AppError> {
    let product = state
        .catalog
        .adjust_stock(id, req.add_qty, req.cost_price)
        .await?;
    Ok(Json(json!({ "success": true, "product": product })))
}
