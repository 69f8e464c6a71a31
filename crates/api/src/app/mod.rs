//! HTTP API application wiring (Axum router + registry wiring).
//!
//! If you're new to Rust, this folder is structured like:
//! - `services.rs`: store wiring and shared application state
//! - `resources.rs`: capability-set handler trait + registration table
//! - `routes/`: HTTP handlers (registry dispatch, admin surface, probes)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

pub mod dto;
pub mod errors;
pub mod resources;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The registration table is constructed exactly once here and shared
/// read-only with every request. A duplicate registration is a configuration
/// error and aborts startup.
pub fn build_app() -> Router {
    let services = Arc::new(services::build_services());
    let table = resources::build_table(services.clone())
        .expect("resource registration table is misconfigured");

    // Static mounts first; everything else goes through the registry.
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/admin", routes::admin::router())
        .fallback(routes::dispatch)
        .layer(Extension(services))
        .layer(Extension(Arc::new(table)))
}
