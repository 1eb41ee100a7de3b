//! quicknotes - minimal note-taking web application
//!
//! Library exports for the binary and the integration tests.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod mappers;
pub mod models;
pub mod services;
pub mod state;
pub mod views;

pub use config::config;
pub use error::{Error, Result};
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
