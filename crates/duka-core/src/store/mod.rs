//! Store backends. The in-memory backend is the default and the one the
//! test suites run against; the Postgres backend lives in duka-store-pg.

pub mod memory;

pub use memory::{MemoryGalleryStore, MemoryOrderStore, MemoryProductStore};
