//! Shared application state injected into every handler via `Extension`.

use std::sync::Arc;
use std::time::Instant;

use duka_core::assistant::DialogueHandler;
use duka_core::catalog::CatalogService;
use duka_core::orders::OrderService;
use duka_core::ports::{CompletionClient, GalleryStore, OrderStore, ProductStore};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub orders: Arc<OrderService>,
    pub gallery: Arc<dyn GalleryStore>,
    pub assistant: Arc<DialogueHandler>,
    pub admin_user: String,
    pub admin_pass: String,
    pub environment: String,
    pub started: Instant,
}

impl AppState {
    /// Wires the services over whatever store implementations the caller
    /// picked (in-memory or Postgres; both satisfy the same traits).
    pub fn new(
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
        gallery: Arc<dyn GalleryStore>,
        completion: Arc<dyn CompletionClient>,
        admin_user: String,
        admin_pass: String,
        environment: String,
    ) -> Self {
        let catalog = Arc::new(CatalogService::new(products));
        let order_service = Arc::new(OrderService::new(orders, catalog.clone()));
        let assistant = Arc::new(DialogueHandler::new(catalog.clone(), completion));
        Self {
            catalog,
            orders: order_service,
            gallery,
            assistant,
            admin_user,
            admin_pass,
            environment,
            started: Instant::now(),
        }
    }
}
