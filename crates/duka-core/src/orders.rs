//! Order placement, tracking, and lifecycle status writes.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::catalog::CatalogService;
use crate::error::DukaError;
use crate::ports::{OrderStore, Result};
use crate::types::{Order, OrderItem, OrderStatus, PlaceOrder, PAYMENT_AFTER_DELIVERY};

pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    catalog: Arc<CatalogService>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderStore>, catalog: Arc<CatalogService>) -> Self {
        Self { orders, catalog }
    }

    /// Place an order and decrement the referenced product's stock.
    ///
    /// The insert and the decrement are two independent store writes with
    /// no transaction spanning them. A duplicate order number rejects the
    /// insert and the decrement is never attempted; a decrement failure
    /// after a successful insert leaves the order recorded and the stock
    /// unadjusted, and the error is returned to the caller.
    pub async fn place_order(&self, req: PlaceOrder) -> Result<Order> {
        let order_number = req.order_number.trim().to_string();
        if order_number.is_empty() {
            return Err(DukaError::InvalidInput("order_number is required".into()));
        }
        let quantity = req.quantity.unwrap_or(1).max(1);

        // Snapshot the product as it is right now. Historical orders keep
        // these values even if the product is later renamed or re-priced.
        let product = self.catalog.get_product(req.product_id).await?;

        let order = Order {
            id: Uuid::new_v4(),
            order_number,
            item: OrderItem {
                product_id: product.id,
                name: product.name.clone(),
                brand: product.brand.clone(),
                price: product.price,
                quantity,
            },
            customer: req.customer,
            notes: req.notes,
            payment_method: PAYMENT_AFTER_DELIVERY.to_string(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        self.orders.insert(&order).await?;

        if let Err(e) = self.catalog.adjust_stock(product.id, -quantity, None).await {
            tracing::warn!(
                target: "duka.orders",
                order_id = %order.id,
                order_number = %order.order_number,
                error = %e,
                "order recorded but stock decrement failed"
            );
            return Err(e);
        }

        tracing::info!(
            target: "duka.orders",
            order_id = %order.id,
            order_number = %order.order_number,
            product_id = %product.id,
            quantity,
            "order placed"
        );
        Ok(order)
    }

    /// Write a new status verbatim.
    ///
    /// Moves outside the intended state machine, including moves out of
    /// terminal states, are applied anyway and logged at warn. Callers
    /// rely on this permissiveness; rejecting illegal moves is a behavior
    /// change, not a fix.
    pub async fn set_status(&self, order_id: Uuid, new_status: OrderStatus) -> Result<Order> {
        let mut order = self.orders.find_by_id(order_id).await?;
        if order.status != new_status && !order.status.can_transition(new_status) {
            tracing::warn!(
                target: "duka.orders",
                order_id = %order.id,
                from = %order.status,
                to = %new_status,
                "status transition outside the intended machine"
            );
        }
        order.status = new_status;
        self.orders.update(&order).await?;
        Ok(order)
    }

    /// Public order tracking by human-readable order number.
    pub async fn track(&self, order_number: &str) -> Result<Order> {
        self.orders.find_by_number(order_number).await
    }

    /// All orders, newest first.
    pub async fn list(&self) -> Result<Vec<Order>> {
        self.orders.list().await
    }
}
