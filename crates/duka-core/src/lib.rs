//! duka-core: domain types, storage ports, and the services behind the
//! duka store backend. Catalog stock adjustment, order lifecycle, and the
//! catalog-grounded assistant live here.
//!
//! No HTTP and no SQL in this crate: handlers live in `duka-server`,
//! persistence behind the port traits in [`ports`].

pub mod assistant;
pub mod catalog;
pub mod context;
pub mod error;
pub mod orders;
pub mod ports;
pub mod store;
pub mod types;
