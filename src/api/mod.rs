//! HTTP routes for quicknotes.
//!
//! Route structure:
//! - / - Note list
//! - /notes/* - Note forms and form submissions

pub mod flash;
mod notes;

use axum::Router;

use crate::AppState;

/// Build the complete router.
pub fn routes() -> Router<AppState> {
    Router::new().merge(notes::routes())
}
