//! PostgreSQL implementations of the duka-core port traits.
//!
//! Each adapter is a newtype wrapping `PgPool`. All SQL is runtime-checked
//! (`sqlx::query`, not `sqlx::query!`) to avoid a compile-time database
//! requirement.

mod store;

pub use store::{connect, ensure_schema, PgGalleryStore, PgOrderStore, PgProductStore};
