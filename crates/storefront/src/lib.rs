//! Sunglasses storefront library.
//!
//! In-memory catalog and per-user carts behind a JSON HTTP API. The binary
//! in `main.rs` wires this up with configuration, logging and Sentry; tests
//! build the router directly with [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use routes::app;
pub use state::AppState;
pub use store::Store;
