use axum::extract::Path;
use axum::{Extension, Json};
use duka_core::error::DukaError;
use duka_core::types::{Order, OrderStatus, PlaceOrder};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::jwt::Claims;
use crate::state::AppState;

/// POST /api/orders. Public; the storefront checkout posts here.
pub async fn place(
    Extension(state): Extension<AppState>,
    Json(req): Json<PlaceOrder>,
) -> Result<Json<Value>, AppError> {
    let order = state.orders.place_order(req).await?;
    Ok(Json(json!({ "success": true, "order": order })))
}

/// GET /api/orders/track/:order_number. Public; customers paste the number
/// they were given at checkout.
pub async fn track(
    Extension(state): Extension<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.track(&order_number).await?))
}

/// GET /api/orders (admin).
pub async fn list(Extension(state): Extension<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.orders.list().await?))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// PATCH /api/orders/:id/status (admin).
pub async fn set_status(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let status: OrderStatus = req
        .status
        .parse()
        .map_err(|_| DukaError::InvalidInput(format!("unknown status {:?}", req.status)))?;
    let order = state.orders.set_status(id, status).await?;
    tracing::info!(
        target: "duka.orders",
        admin = %claims.sub,
        order_number = %order.order_number,
        status = %order.status,
        "order status updated"
    );
    Ok(Json(json!({ "success": true, "order": order })))
}
