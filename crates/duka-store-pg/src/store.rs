//! Postgres adapters for the product, order, and gallery stores.
//!
//! Each collection is one table holding the record as a JSONB document,
//! keyed by id, with `order_number` lifted into a UNIQUE column so the
//! store can enforce order-number uniqueness.

use anyhow::anyhow;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use duka_core::error::DukaError;
use duka_core::ports::{GalleryStore, OrderStore, ProductStore, Result};
use duka_core::types::{GalleryEntry, Order, Product};

const SCHEMA_SQL: &str = include_str!("../schema.sql");

/// Connect a pool against a database URL.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|e| DukaError::Internal(anyhow!(e)))
}

/// Create the duka schema and tables if they do not exist. Idempotent.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .map_err(|e| anyhow!(e))?;
    tracing::info!(target: "duka.store", "database schema ensured");
    Ok(())
}

fn encode_doc<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| DukaError::Internal(anyhow!(e)))
}

fn decode_doc<T: DeserializeOwned>(doc: serde_json::Value) -> Result<T> {
    serde_json::from_value(doc).map_err(|e| DukaError::Internal(anyhow!(e)))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

// ── PgProductStore ────────────────────────────────────────────

pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> Result<Vec<Product>> {
        let docs = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT doc FROM duka.products ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        docs.into_iter().map(decode_doc).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Product> {
        let doc = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT doc FROM duka.products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        match doc {
            Some(doc) => decode_doc(doc),
            None => Err(DukaError::NotFound(format!("product {id}"))),
        }
    }

    async fn insert(&self, product: &Product) -> Result<()> {
        sqlx::query("INSERT INTO duka.products (id, doc, created_at) VALUES ($1, $2, $3)")
            .bind(product.id)
            .bind(encode_doc(product)?)
            .bind(product.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<()> {
        let result = sqlx::query("UPDATE duka.products SET doc = $2 WHERE id = $1")
            .bind(product.id)
            .bind(encode_doc(product)?)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        if result.rows_affected() == 0 {
            return Err(DukaError::NotFound(format!("product {}", product.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM duka.products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        if result.rows_affected() == 0 {
            return Err(DukaError::NotFound(format!("product {id}")));
        }
        Ok(())
    }
}

// ── PgOrderStore ──────────────────────────────────────────────

pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn list(&self) -> Result<Vec<Order>> {
        let docs = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT doc FROM duka.orders ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        docs.into_iter().map(decode_doc).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Order> {
        let doc =
            sqlx::query_scalar::<_, serde_json::Value>("SELECT doc FROM duka.orders WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| anyhow!(e))?;
        match doc {
            Some(doc) => decode_doc(doc),
            None => Err(DukaError::NotFound(format!("order {id}"))),
        }
    }

    async fn find_by_number(&self, order_number: &str) -> Result<Order> {
        let doc = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT doc FROM duka.orders WHERE order_number = $1",
        )
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        match doc {
            Some(doc) => decode_doc(doc),
            None => Err(DukaError::NotFound(format!("order {order_number}"))),
        }
    }

    async fn insert(&self, order: &Order) -> Result<()> {
        let doc = encode_doc(order)?;
        sqlx::query(
            "INSERT INTO duka.orders (id, order_number, doc, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(order.id)
        .bind(&order.order_number)
        .bind(doc)
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DukaError::DuplicateKey(format!("order_number {}", order.order_number))
            } else {
                DukaError::Internal(anyhow!(e))
            }
        })?;
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<()> {
        let result = sqlx::query("UPDATE duka.orders SET doc = $2 WHERE id = $1")
            .bind(order.id)
            .bind(encode_doc(order)?)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        if result.rows_affected() == 0 {
            return Err(DukaError::NotFound(format!("order {}", order.id)));
        }
        Ok(())
    }
}

// ── PgGalleryStore ────────────────────────────────────────────

pub struct PgGalleryStore {
    pool: PgPool,
}

impl PgGalleryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GalleryStore for PgGalleryStore {
    async fn list(&self) -> Result<Vec<GalleryEntry>> {
        let docs = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT doc FROM duka.gallery ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        docs.into_iter().map(decode_doc).collect()
    }

    async fn insert(&self, entry: &GalleryEntry) -> Result<()> {
        sqlx::query("INSERT INTO duka.gallery (id, doc, created_at) VALUES ($1, $2, $3)")
            .bind(entry.id)
            .bind(encode_doc(entry)?)
            .bind(entry.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM duka.gallery WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        if result.rows_affected() == 0 {
            return Err(DukaError::NotFound(format!("gallery entry {id}")));
        }
        Ok(())
    }
}
