//! Core domain types for the duka backend.
//! Pure value types: no sqlx, no axum, no HTTP shapes beyond the chat wire
//! structs the assistant returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment method stamped on every order. There is no payment gateway:
/// customers pay when the order arrives.
pub const PAYMENT_AFTER_DELIVERY: &str = "After Delivery";

// ── Products ──────────────────────────────────────────────────

/// A catalog product.
///
/// `stock` is signed on purpose: decrements are unchecked and concurrent
/// order placements may drive it negative (see
/// `CatalogService::adjust_stock`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Normalized to lowercase at creation.
    pub brand: String,
    /// Unit selling price in whole TZS.
    pub price: i64,
    /// Unit cost price in whole TZS; mutated only by restock.
    pub cost_price: i64,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a product. Everything numeric defaults to zero.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub caption: Option<String>,
    pub brand: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub cost_price: i64,
    #[serde(default)]
    pub stock: i64,
    pub image_url: Option<String>,
}

// ── Orders ────────────────────────────────────────────────────

/// Order lifecycle status.
///
/// The intended machine is `pending → {confirmed, cancelled}`,
/// `confirmed → {delivered, cancelled}`, with `delivered` and `cancelled`
/// terminal. [`OrderStatus::can_transition`] encodes that table;
/// `OrderService::set_status` deliberately does not enforce it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether `next` is a legal move from `self` under the intended
    /// state machine. Staying in place is not a transition.
    pub fn can_transition(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Delivered)
                | (Confirmed, Cancelled)
        )
    }

    /// Terminal states have no legal outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Point-in-time product snapshot embedded in an order at placement.
/// Never re-resolved against the live product: if the product is renamed
/// or re-priced later, historical orders keep what the customer saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub name: String,
    pub brand: String,
    pub price: i64,
    pub quantity: i64,
}

/// Customer details captured free-text at placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub region: String,
    pub address: String,
    pub requested_date: String,
}

/// A customer order. `order_number` is the caller-supplied human-readable
/// identifier, unique across all orders; `id` is the store key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub item: OrderItem,
    pub customer: CustomerDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for the public order-placement call.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrder {
    pub order_number: String,
    pub product_id: Uuid,
    /// Units ordered; defaults to 1 when omitted.
    pub quantity: Option<i64>,
    pub customer: CustomerDetails,
    pub notes: Option<String>,
}

// ── Gallery ───────────────────────────────────────────────────

/// A gallery photo. Plain storage, no invariants beyond having a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub id: Uuid,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGalleryEntry {
    pub url: String,
    pub caption: Option<String>,
}

// ── Chat wire types ───────────────────────────────────────────

/// Role of a conversation turn as sent by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the customer conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Image suggestion attached to an assistant reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub name: String,
    pub price: i64,
}

/// The assistant's answer. `reply` is never empty; failures degrade to a
/// fixed fallback string rather than an error.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub images: Vec<ProductImage>,
}
