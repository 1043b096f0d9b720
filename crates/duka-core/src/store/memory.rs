//! In-memory store backends.
//!
//! Keyed hash maps behind `tokio::sync::RwLock`. Used when the server runs
//! without a database and by every unit and HTTP test. No lock is held
//! across an await, and no backend validates anything beyond its own keys:
//! cross-record rules (stock math, status transitions) live in the services.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::DukaError;
use crate::ports::{GalleryStore, OrderStore, ProductStore, Result};
use crate::types::{GalleryEntry, Order, Product};

// ── Products ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryProductStore {
    inner: RwLock<HashMap<Uuid, Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>> {
        let store = self.inner.read().await;
        let mut products: Vec<_> = store.values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Product> {
        let store = self.inner.read().await;
        store
            .get(&id)
            .cloned()
            .ok_or_else(|| DukaError::NotFound(format!("product {id}")))
    }

    async fn insert(&self, product: &Product) -> Result<()> {
        let mut store = self.inner.write().await;
        store.insert(product.id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<()> {
        let mut store = self.inner.write().await;
        match store.get_mut(&product.id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(())
            }
            None => Err(DukaError::NotFound(format!("product {}", product.id))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut store = self.inner.write().await;
        store
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DukaError::NotFound(format!("product {id}")))
    }
}

// ── Orders ────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryOrderStore {
    inner: RwLock<HashMap<Uuid, Order>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn list(&self) -> Result<Vec<Order>> {
        let store = self.inner.read().await;
        let mut orders: Vec<_> = store.values().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Order> {
        let store = self.inner.read().await;
        store
            .get(&id)
            .cloned()
            .ok_or_else(|| DukaError::NotFound(format!("order {id}")))
    }

    async fn find_by_number(&self, order_number: &str) -> Result<Order> {
        let store = self.inner.read().await;
        store
            .values()
            .find(|o| o.order_number == order_number)
            .cloned()
            .ok_or_else(|| DukaError::NotFound(format!("order {order_number}")))
    }

    async fn insert(&self, order: &Order) -> Result<()> {
        let mut store = self.inner.write().await;
        if store.values().any(|o| o.order_number == order.order_number) {
            return Err(DukaError::DuplicateKey(format!(
                "order_number {}",
                order.order_number
            )));
        }
        store.insert(order.id, order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<()> {
        let mut store = self.inner.write().await;
        match store.get_mut(&order.id) {
            Some(slot) => {
                *slot = order.clone();
                Ok(())
            }
            None => Err(DukaError::NotFound(format!("order {}", order.id))),
        }
    }
}

// ── Gallery ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryGalleryStore {
    inner: RwLock<HashMap<Uuid, GalleryEntry>>,
}

impl MemoryGalleryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GalleryStore for MemoryGalleryStore {
    async fn list(&self) -> Result<Vec<GalleryEntry>> {
        let store = self.inner.read().await;
        let mut entries: Vec<_> = store.values().cloned().collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn insert(&self, entry: &GalleryEntry) -> Result<()> {
        let mut store = self.inner.write().await;
        store.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut store = self.inner.write().await;
        store
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DukaError::NotFound(format!("gallery entry {id}")))
    }
}
