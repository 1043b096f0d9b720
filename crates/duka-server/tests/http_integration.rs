//! HTTP-level integration tests for the duka API.
//!
//! These tests prove the deployed HTTP contract: JWT authentication on the
//! admin surface, the public storefront endpoints, and the chat fallback
//! behavior. The app is built over the in-memory store with a scripted
//! completion client, so no database or network is required.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use duka_core::assistant::FALLBACK_REPLY;
use duka_core::error::DukaError;
use duka_core::ports::CompletionClient;
use duka_core::store::{MemoryGalleryStore, MemoryOrderStore, MemoryProductStore};
use duka_core::types::ChatTurn;
use duka_server::middleware::jwt::JwtConfig;
use duka_server::router::build_router;
use duka_server::state::AppState;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use tower::ServiceExt;

// ── Test app builder ───────────────────────────────────────────

const TEST_JWT_SECRET: &[u8] = b"test-secret-for-http-tests";
const TEST_ADMIN_USER: &str = "admin";
const TEST_ADMIN_PASS: &str = "duka2024";

/// What the scripted completion client answers with.
#[derive(Clone, Copy)]
enum Script {
    Text(&'static str),
    Fail,
}

struct StubCompletion {
    script: Script,
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(
        &self,
        _system: &str,
        _turns: &[ChatTurn],
    ) -> duka_core::ports::Result<Option<String>> {
        match self.script {
            Script::Text(text) => Ok(Some(text.to_string())),
            Script::Fail => Err(DukaError::Upstream("connection refused".into())),
        }
    }
}

fn build_test_app(script: Script) -> axum::Router {
    let state = AppState::new(
        Arc::new(MemoryProductStore::default()),
        Arc::new(MemoryOrderStore::default()),
        Arc::new(MemoryGalleryStore::default()),
        Arc::new(StubCompletion { script }),
        TEST_ADMIN_USER.to_string(),
        TEST_ADMIN_PASS.to_string(),
        "test".to_string(),
    );
    let jwt_config = JwtConfig::from_secret(TEST_JWT_SECRET);
    build_router(state, jwt_config)
}

// ── Request helpers ────────────────────────────────────────────

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(
        |_| serde_json::json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
    )
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed(mut req: Request<Body>, token: &str) -> Request<Body> {
    req.headers_mut().insert(
        "authorization",
        format!("Bearer {token}").parse().unwrap(),
    );
    req
}

async fn login(app: &axum::Router) -> String {
    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/admin/login",
            &serde_json::json!({ "username": TEST_ADMIN_USER, "password": TEST_ADMIN_PASS }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    body["token"].as_str().expect("login returns token").to_string()
}

/// Creates a product through the admin endpoint and returns the stored
/// product JSON (with the server-assigned id).
async fn create_product(
    app: &axum::Router,
    token: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let resp = app
        .clone()
        .oneshot(authed(post_json("/api/products", &body), token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await["product"].clone()
}

fn sample_customer() -> serde_json::Value {
    serde_json::json!({
        "name": "Asha Juma",
        "phone": "+255700000001",
        "region": "Dar es Salaam",
        "address": "Kariakoo, Mtaa wa Congo",
        "requested_date": "2024-06-01",
    })
}

// ── Health and auth ────────────────────────────────────────────

#[tokio::test]
async fn health_needs_no_auth() {
    let app = build_test_app(Script::Text("ok"));
    let resp = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "test");
    assert!(body["uptime"].is_u64());
}

#[tokio::test]
async fn login_returns_a_token() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = build_test_app(Script::Text("ok"));
    let resp = app
        .oneshot(post_json(
            "/api/admin/login",
            &serde_json::json!({ "username": "admin", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "unauthorized: invalid credentials");
}

#[tokio::test]
async fn admin_routes_require_a_token() {
    let app = build_test_app(Script::Text("ok"));
    let resp = app
        .oneshot(post_json(
            "/api/products",
            &serde_json::json!({ "name": "X200", "brand": "Acme" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = build_test_app(Script::Text("ok"));
    let resp = app
        .oneshot(authed(
            post_json(
                "/api/products",
                &serde_json::json!({ "name": "X200", "brand": "Acme" }),
            ),
            "not-a-jwt",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Invalid token");
}

// ── Products ───────────────────────────────────────────────────

#[tokio::test]
async fn created_product_appears_in_the_public_catalog() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;

    let product = create_product(
        &app,
        &token,
        serde_json::json!({
            "name": "X200 Pro",
            "brand": "Acme",
            "price": 1_250_000,
            "cost_price": 900_000,
            "stock": 4,
        }),
    )
    .await;
    // Brand is normalized at creation.
    assert_eq!(product["brand"], "acme");

    // The catalog is public.
    let resp = app.oneshot(get("/api/products")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "X200 Pro");
    assert_eq!(listed[0]["stock"], 4);
}

#[tokio::test]
async fn blank_product_name_is_rejected() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;
    let resp = app
        .oneshot(authed(
            post_json(
                "/api/products",
                &serde_json::json!({ "name": "   ", "brand": "Acme" }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "invalid input: product name is required");
}

#[tokio::test]
async fn restock_adds_stock_and_replaces_cost_price() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;
    let product = create_product(
        &app,
        &token,
        serde_json::json!({
            "name": "Redmi 9", "brand": "Xiaomi", "price": 320_000,
            "cost_price": 150_000, "stock": 4,
        }),
    )
    .await;
    let id = product["id"].as_str().unwrap();

    let resp = app
        .clone()
        .oneshot(authed(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/products/{id}/restock"))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "add_qty": 10, "cost_price": 200_000 }).to_string(),
                ))
                .unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["product"]["stock"], 14);
    assert_eq!(body["product"]["cost_price"], 200_000);

    // An empty restock body is a no-op: add_qty defaults to 0 and the
    // omitted cost price keeps the recorded one.
    let resp = app
        .oneshot(authed(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/products/{id}/restock"))
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["product"]["stock"], 14);
    assert_eq!(body["product"]["cost_price"], 200_000);
}

#[tokio::test]
async fn deleted_product_leaves_the_catalog() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;
    let product = create_product(
        &app,
        &token,
        serde_json::json!({ "name": "Nokia 105", "brand": "Nokia", "price": 35_000 }),
    )
    .await;
    let id = product["id"].as_str().unwrap();

    let resp = app
        .clone()
        .oneshot(authed(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/products/{id}"))
                .body(Body::empty())
                .unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(get("/api/products")).await.unwrap();
    let body = body_json(resp).await;
    assert!(body.as_array().unwrap().is_empty());
}

// ── Orders ─────────────────────────────────────────────────────

#[tokio::test]
async fn placing_an_order_decrements_stock() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;
    let product = create_product(
        &app,
        &token,
        serde_json::json!({ "name": "X200 Pro", "brand": "Acme", "price": 1_250_000, "stock": 5 }),
    )
    .await;

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/orders",
            &serde_json::json!({
                "order_number": "ORD-1",
                "product_id": product["id"],
                "quantity": 2,
                "customer": sample_customer(),
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["payment_method"], "After Delivery");
    assert_eq!(body["order"]["item"]["quantity"], 2);
    assert_eq!(body["order"]["item"]["price"], 1_250_000);

    let resp = app.oneshot(get("/api/products")).await.unwrap();
    let listed = body_json(resp).await;
    assert_eq!(listed[0]["stock"], 3);
}

#[tokio::test]
async fn duplicate_order_number_conflicts_without_double_decrement() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;
    let product = create_product(
        &app,
        &token,
        serde_json::json!({ "name": "X200 Pro", "brand": "Acme", "price": 1_250_000, "stock": 5 }),
    )
    .await;

    let place = serde_json::json!({
        "order_number": "ORD-1",
        "product_id": product["id"],
        "quantity": 2,
        "customer": sample_customer(),
    });
    let resp = app.clone().oneshot(post_json("/api/orders", &place)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.clone().oneshot(post_json("/api/orders", &place)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "duplicate key: order_number ORD-1");

    // The rejected duplicate must not have touched stock again.
    let resp = app.oneshot(get("/api/products")).await.unwrap();
    let listed = body_json(resp).await;
    assert_eq!(listed[0]["stock"], 3);
}

#[tokio::test]
async fn order_for_unknown_product_is_404() {
    let app = build_test_app(Script::Text("ok"));
    let resp = app
        .oneshot(post_json(
            "/api/orders",
            &serde_json::json!({
                "order_number": "ORD-9",
                "product_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "customer": sample_customer(),
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn omitted_quantity_defaults_to_one() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;
    let product = create_product(
        &app,
        &token,
        serde_json::json!({ "name": "Oraimo Buds", "brand": "Oraimo", "price": 45_000, "stock": 5 }),
    )
    .await;

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/orders",
            &serde_json::json!({
                "order_number": "ORD-2",
                "product_id": product["id"],
                "customer": sample_customer(),
            }),
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["order"]["item"]["quantity"], 1);

    let resp = app.oneshot(get("/api/products")).await.unwrap();
    let listed = body_json(resp).await;
    assert_eq!(listed[0]["stock"], 4);
}

#[tokio::test]
async fn customers_track_orders_by_number() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;
    let product = create_product(
        &app,
        &token,
        serde_json::json!({ "name": "X200 Pro", "brand": "Acme", "price": 1_250_000, "stock": 5 }),
    )
    .await;
    app.clone()
        .oneshot(post_json(
            "/api/orders",
            &serde_json::json!({
                "order_number": "ORD-1",
                "product_id": product["id"],
                "customer": sample_customer(),
            }),
        ))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(get("/api/orders/track/ORD-1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["order_number"], "ORD-1");
    assert_eq!(body["status"], "pending");

    let resp = app.oneshot(get("/api/orders/track/ORD-404")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_listing_is_admin_only() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;

    // Same path, different method: placing is public, listing is not.
    let resp = app.clone().oneshot(get("/api/orders")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .oneshot(authed(get("/api/orders"), &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn status_update_walks_the_order_lifecycle() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;
    let product = create_product(
        &app,
        &token,
        serde_json::json!({ "name": "X200 Pro", "brand": "Acme", "price": 1_250_000, "stock": 5 }),
    )
    .await;
    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/orders",
            &serde_json::json!({
                "order_number": "ORD-1",
                "product_id": product["id"],
                "customer": sample_customer(),
            }),
        ))
        .await
        .unwrap();
    let order = body_json(resp).await["order"].clone();
    let id = order["id"].as_str().unwrap();

    for status in ["confirmed", "delivered"] {
        let resp = app
            .clone()
            .oneshot(authed(
                Request::builder()
                    .method("PATCH")
                    .uri(format!("/api/orders/{id}/status"))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({ "status": status }).to_string(),
                    ))
                    .unwrap(),
                &token,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["order"]["status"], status);
    }

    // The write sticks.
    let resp = app.oneshot(get("/api/orders/track/ORD-1")).await.unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["status"], "delivered");
}

#[tokio::test]
async fn unknown_status_string_is_rejected() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;
    let resp = app
        .oneshot(authed(
            Request::builder()
                .method("PATCH")
                .uri("/api/orders/67e55044-10b1-426f-9247-bb680e5fe0c8/status")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "status": "shipped" }).to_string(),
                ))
                .unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "invalid input: unknown status \"shipped\"");
}

// ── Chat ───────────────────────────────────────────────────────

#[tokio::test]
async fn chat_relays_the_completion_text() {
    let app = build_test_app(Script::Text("Karibu! Tunazo X200 Pro."));
    let resp = app
        .oneshot(post_json(
            "/api/chat",
            &serde_json::json!({ "messages": [{ "role": "user", "content": "habari" }] }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["reply"], "Karibu! Tunazo X200 Pro.");
    assert!(body["images"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn chat_serves_the_fallback_when_completion_fails() {
    let app = build_test_app(Script::Fail);
    let resp = app
        .oneshot(post_json(
            "/api/chat",
            &serde_json::json!({ "messages": [{ "role": "user", "content": "habari" }] }),
        ))
        .await
        .unwrap();
    // Chat never propagates upstream failure to the storefront.
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["reply"], FALLBACK_REPLY);
}

#[tokio::test]
async fn chat_attaches_images_for_picture_requests() {
    let app = build_test_app(Script::Text("Hii hapa picha yake."));
    let token = login(&app).await;
    create_product(
        &app,
        &token,
        serde_json::json!({
            "name": "X200 Pro", "brand": "Acme", "price": 1_250_000,
            "stock": 4, "image_url": "https://cdn.example/x200.jpg",
        }),
    )
    .await;

    let resp = app
        .oneshot(post_json(
            "/api/chat",
            &serde_json::json!({
                "messages": [{ "role": "user", "content": "naomba picha ya x200" }]
            }),
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["reply"], "Hii hapa picha yake.");
    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["url"], "https://cdn.example/x200.jpg");
    assert_eq!(images[0]["name"], "X200 Pro");
    assert_eq!(images[0]["price"], 1_250_000);
}

#[tokio::test]
async fn chat_answers_even_without_a_body() {
    let app = build_test_app(Script::Text("Karibu!"));
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["reply"], "Karibu!");

    // Malformed JSON gets the same treatment as a missing body.
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// ── Gallery ────────────────────────────────────────────────────

#[tokio::test]
async fn gallery_round_trip() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;

    let resp = app
        .clone()
        .oneshot(authed(
            post_json(
                "/api/gallery",
                &serde_json::json!({
                    "url": "https://cdn.example/shopfront.jpg",
                    "caption": "Duka letu Kariakoo",
                }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let entry = body_json(resp).await["entry"].clone();
    let id = entry["id"].as_str().unwrap();

    // Listing is public.
    let resp = app.clone().oneshot(get("/api/gallery")).await.unwrap();
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["caption"], "Duka letu Kariakoo");

    let resp = app
        .clone()
        .oneshot(authed(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/gallery/{id}"))
                .body(Body::empty())
                .unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Deleting again is a 404, not a silent success.
    let resp = app
        .oneshot(authed(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/gallery/{id}"))
                .body(Body::empty())
                .unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gallery_url_is_required() {
    let app = build_test_app(Script::Text("ok"));
    let token = login(&app).await;
    let resp = app
        .oneshot(authed(
            post_json("/api/gallery", &serde_json::json!({ "url": "  " })),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "invalid input: gallery url is required");
}
