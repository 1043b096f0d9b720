//! Route table and middleware stack.

use axum::middleware as axum_mw;
use axum::routing::{delete, get, patch, post};
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::jwt::{jwt_auth, JwtConfig};
use crate::state::AppState;

/// Builds the full application router.
///
/// Admin routes live on a separate `Router` so the JWT middleware wraps
/// only them; `merge` keeps each side's layers intact even where a public
/// and a protected method share a path (e.g. GET vs POST /api/products).
pub fn build_router(state: AppState, jwt_config: JwtConfig) -> Router {
    let protected = Router::new()
        .route("/api/products", post(handlers::products::create))
        .route("/api/products/:id", delete(handlers::products::remove))
        .route("/api/products/:id/restock", patch(handlers::products::restock))
        .route("/api/orders", get(handlers::orders::list))
        .route("/api/orders/:id/status", patch(handlers::orders::set_status))
        .route("/api/gallery", post(handlers::gallery::create))
        .route("/api/gallery/:id", delete(handlers::gallery::remove))
        .layer(axum_mw::from_fn(jwt_auth))
        .layer(Extension(jwt_config.clone()));

    let public = Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/admin/login", post(handlers::auth::login))
        .route("/api/products", get(handlers::products::list))
        .route("/api/orders", post(handlers::orders::place))
        .route(
            "/api/orders/track/:order_number",
            get(handlers::orders::track),
        )
        .route("/api/gallery", get(handlers::gallery::list))
        .route("/api/chat", post(handlers::chat::chat))
        .layer(Extension(jwt_config));

    public.merge(protected).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(Extension(state)),
    )
}
