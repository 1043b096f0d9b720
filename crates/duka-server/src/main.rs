use std::sync::Arc;

use duka_core::store::{MemoryGalleryStore, MemoryOrderStore, MemoryProductStore};
use duka_server::completion::OpenAiClient;
use duka_server::config::{Config, StoreBackend};
use duka_server::keepalive;
use duka_server::middleware::jwt::JwtConfig;
use duka_server::router::build_router;
use duka_server::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,duka_server=debug".into()),
        )
        .init();
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    let completion = Arc::new(OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
    ));

    let state = match config.store {
        StoreBackend::Postgres => {
            let pool = duka_store_pg::connect(&config.database_url).await?;
            duka_store_pg::ensure_schema(&pool).await?;
            AppState::new(
                Arc::new(duka_store_pg::PgProductStore::new(pool.clone())),
                Arc::new(duka_store_pg::PgOrderStore::new(pool.clone())),
                Arc::new(duka_store_pg::PgGalleryStore::new(pool)),
                completion,
                config.admin_user.clone(),
                config.admin_pass.clone(),
                config.environment.clone(),
            )
        }
        StoreBackend::Memory => {
            tracing::info!(target: "duka.server", "using in-memory store; data is lost on restart");
            AppState::new(
                Arc::new(MemoryProductStore::default()),
                Arc::new(MemoryOrderStore::default()),
                Arc::new(MemoryGalleryStore::default()),
                completion,
                config.admin_user.clone(),
                config.admin_pass.clone(),
                config.environment.clone(),
            )
        }
    };

    tokio::spawn(keepalive::run(config.self_url.clone()));

    let jwt_config = JwtConfig::from_secret(config.jwt_secret.as_bytes());
    let app = build_router(state, jwt_config);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(target: "duka.server", %addr, environment = %config.environment, "duka server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
