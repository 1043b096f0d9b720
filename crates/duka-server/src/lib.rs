//! duka-server library surface: router, state, middleware, and handlers.
//! Split from the binary so the HTTP integration tests can build the
//! router in-process and drive it with `tower::ServiceExt::oneshot`.

pub mod completion;
pub mod config;
pub mod error;
pub mod handlers;
pub mod keepalive;
pub mod middleware;
pub mod router;
pub mod state;
