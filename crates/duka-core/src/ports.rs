//! Storage and upstream port traits for the duka backend.
//! Implemented by the in-memory store and by duka-store-pg; services
//! depend only on these traits.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DukaError;
use crate::types::{ChatTurn, GalleryEntry, Order, Product};

pub type Result<T> = std::result::Result<T, DukaError>;

/// Storage operations for the product catalog.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, newest first.
    async fn list(&self) -> Result<Vec<Product>>;

    /// Load a product by ID. `NotFound` if absent.
    async fn find_by_id(&self, id: Uuid) -> Result<Product>;

    /// Insert a new product.
    async fn insert(&self, product: &Product) -> Result<()>;

    /// Overwrite an existing product in full. `NotFound` if absent.
    async fn update(&self, product: &Product) -> Result<()>;

    /// Remove a product. `NotFound` if absent.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Storage operations for orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders, newest first.
    async fn list(&self) -> Result<Vec<Order>>;

    /// Load an order by store key. `NotFound` if absent.
    async fn find_by_id(&self, id: Uuid) -> Result<Order>;

    /// Load an order by its human-readable number. `NotFound` if absent.
    async fn find_by_number(&self, order_number: &str) -> Result<Order>;

    /// Insert a new order. `DuplicateKey` when the order number is taken.
    async fn insert(&self, order: &Order) -> Result<()>;

    /// Overwrite an existing order in full. `NotFound` if absent.
    async fn update(&self, order: &Order) -> Result<()>;
}

/// Storage operations for the shop photo gallery.
#[async_trait]
pub trait GalleryStore: Send + Sync {
    /// All entries, newest first.
    async fn list(&self) -> Result<Vec<GalleryEntry>>;

    /// Insert a new entry.
    async fn insert(&self, entry: &GalleryEntry) -> Result<()>;

    /// Remove an entry. `NotFound` if absent.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Chat-completion upstream.
///
/// `complete` returns `Ok(None)` when the upstream answered but produced no
/// usable text; transport and protocol failures are `Err`. The dialogue
/// handler treats both the same way (fallback reply), so implementations
/// should not retry internally.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system: &str, turns: &[ChatTurn]) -> Result<Option<String>>;
}
