//! Common test utilities and helpers.

#![allow(dead_code)]

use axum_test::TestServer;
use quicknotes::db::{self, DbPool};
use quicknotes::models::Note;
use quicknotes::services::NoteService;
use quicknotes::AppState;

/// Set up a fresh in-memory database with the schema applied.
pub async fn setup_test_db() -> DbPool {
    let pool = db::init_pool(":memory:")
        .await
        .expect("Failed to init pool");
    db::initialize_schema(&pool)
        .await
        .expect("Failed to initialize schema");
    pool
}

/// Note service over a fresh database.
pub async fn setup_service() -> NoteService {
    NoteService::new(setup_test_db().await)
}

/// Test server over a fresh database, plus the pool behind it.
pub async fn build_test_app() -> (TestServer, DbPool) {
    let pool = setup_test_db().await;
    let state = AppState::from_pool(pool.clone()).expect("Failed to build state");
    let server = TestServer::new(quicknotes::app(state)).expect("Failed to create test server");
    (server, pool)
}

/// Insert a note through the service and return it.
pub async fn create_note(service: &NoteService, body: &str) -> Note {
    service
        .upsert(Note::new(body))
        .await
        .expect("Failed to create note")
}
