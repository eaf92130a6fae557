//! Research API server.
//!
//! This crate provides:
//! - The `POST /api/research` endpoint over the research pipeline
//! - Error-to-status mapping for the pipeline's failure taxonomy
//! - CORS and request-trace middleware

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, SharedState};
pub use routes::{create_router, create_router_with_middleware};
