pub mod auth;
pub mod chat;
pub mod gallery;
pub mod health;
pub mod orders;
pub mod products;
