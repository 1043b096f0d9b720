//! Environment configuration.
//!
//! Every value has a hardcoded development fallback; real deployments must
//! override them. `.env` files are honored via `dotenvy` before this is
//! read (see `main.rs`).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// DUKA_STORE: `memory` (default) or `postgres`.
    pub store: StoreBackend,
    /// DATABASE_URL: used only when the store backend is postgres.
    pub database_url: String,
    /// DUKA_JWT_SECRET: HMAC secret for admin bearer tokens.
    pub jwt_secret: String,
    /// DUKA_ADMIN_USER / DUKA_ADMIN_PASS: the single admin credential pair.
    pub admin_user: String,
    pub admin_pass: String,
    /// PORT: HTTP listen port.
    pub port: u16,
    /// OPENAI_API_KEY: empty by default, which makes completion calls fail
    /// and the assistant serve its fallback reply.
    pub openai_api_key: String,
    /// OPENAI_BASE_URL / OPENAI_MODEL: completion endpoint and model.
    pub openai_base_url: String,
    pub openai_model: String,
    /// DUKA_SELF_URL: base URL the keep-alive pinger calls back on.
    pub self_url: String,
    /// DUKA_ENV: environment label reported by /api/health.
    pub environment: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        let port = env_or("PORT", "5000").parse::<u16>().unwrap_or(5000);
        let store = match env_or("DUKA_STORE", "memory").to_lowercase().as_str() {
            "postgres" | "pg" => StoreBackend::Postgres,
            _ => StoreBackend::Memory,
        };
        Self {
            store,
            database_url: env_or("DATABASE_URL", "postgresql://localhost:5432/duka"),
            jwt_secret: env_or("DUKA_JWT_SECRET", "duka-dev-secret-change-me"),
            admin_user: env_or("DUKA_ADMIN_USER", "admin"),
            admin_pass: env_or("DUKA_ADMIN_PASS", "duka2024"),
            port,
            openai_api_key: env_or("OPENAI_API_KEY", ""),
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            self_url: env_or("DUKA_SELF_URL", &format!("http://127.0.0.1:{port}")),
            environment: env_or("DUKA_ENV", "development"),
        }
    }
}
