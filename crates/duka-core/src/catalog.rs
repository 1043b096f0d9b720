//! Product catalog service: creation, deletion, listing, and the stock
//! adjustment used by both restock and order placement.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::DukaError;
use crate::ports::{ProductStore, Result};
use crate::types::{NewProduct, Product};

pub struct CatalogService {
    products: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.products.list().await
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product> {
        self.products.find_by_id(id).await
    }

    /// Create a product. Brand is normalized to lowercase; name and brand
    /// must be non-empty.
    pub async fn create_product(&self, new: NewProduct) -> Result<Product> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(DukaError::InvalidInput("product name is required".into()));
        }
        let brand = new.brand.trim().to_lowercase();
        if brand.is_empty() {
            return Err(DukaError::InvalidInput("product brand is required".into()));
        }

        let product = Product {
            id: Uuid::new_v4(),
            name,
            caption: new.caption,
            brand,
            price: new.price,
            cost_price: new.cost_price,
            stock: new.stock,
            image_url: new.image_url,
            created_at: Utc::now(),
        };
        self.products.insert(&product).await?;
        tracing::info!(
            target: "duka.catalog",
            product_id = %product.id,
            name = %product.name,
            stock = product.stock,
            "product created"
        );
        Ok(product)
    }

    /// Hard delete. `NotFound` if the product does not exist.
    pub async fn delete_product(&self, id: Uuid) -> Result<()> {
        self.products.delete(id).await?;
        tracing::info!(target: "duka.catalog", product_id = %id, "product deleted");
        Ok(())
    }

    /// Apply a signed stock delta and optionally replace the cost price.
    ///
    /// This is a find-then-update over the store with no lock held in
    /// between, so two concurrent adjustments can both read the same
    /// starting stock and one delta is lost. The resulting stock is
    /// accepted even when negative. Callers rely on the permissiveness;
    /// do not add clamping or a stock-sufficiency check here.
    ///
    /// A cost price of `Some(0)` means "not supplied" and leaves the
    /// stored cost untouched.
    pub async fn adjust_stock(
        &self,
        product_id: Uuid,
        delta_qty: i64,
        new_cost_price: Option<i64>,
    ) -> Result<Product> {
        let mut product = self.products.find_by_id(product_id).await?;
        product.stock += delta_qty;
        if let Some(cost) = new_cost_price {
            if cost != 0 {
                product.cost_price = cost;
            }
        }
        if product.stock < 0 {
            tracing::warn!(
                target: "duka.catalog",
                product_id = %product.id,
                stock = product.stock,
                "stock is negative after adjustment"
            );
        }
        self.products.update(&product).await?;
        Ok(product)
    }
}
