//! # loresmith-api
//!
//! HTTP API layer for LoreSmith built on Axum.
//!
//! Provides all REST endpoints, middleware (CORS, compression, tracing,
//! request logging), extractors, DTOs, and the error → HTTP status
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
