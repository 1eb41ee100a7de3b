//! Database integration tests for the note gateway.
//!
//! Each test runs against its own in-memory SQLite database.

mod common;

use std::time::Duration;

use chrono::Utc;
use futures::TryStreamExt;
use quicknotes::db;
use quicknotes::models::NoteRecord;
use quicknotes::Result;
use uuid::Uuid;

use common::setup_test_db;

fn unsaved(body: &str) -> NoteRecord {
    NoteRecord {
        body: Some(body.to_string()),
        ..Default::default()
    }
}

async fn insert(pool: &db::DbPool, body: &str) -> Result<NoteRecord> {
    let mut conn = pool.acquire().await?;
    db::save_note(&mut conn, unsaved(body)).await
}

// ============================================================================
// Save
// ============================================================================

#[tokio::test]
async fn test_save_new_assigns_id_and_timestamps() -> Result<()> {
    let pool = setup_test_db().await;

    let before = Utc::now();
    let saved = insert(&pool, "Test note content").await?;
    let after = Utc::now();

    assert!(saved.id.is_some());
    assert_eq!(saved.body.as_deref(), Some("Test note content"));

    let created = saved.created_at.expect("created_at assigned");
    let updated = saved.updated_at.expect("updated_at assigned");
    assert!(created >= before && created <= after);
    assert_eq!(created, updated);

    Ok(())
}

#[tokio::test]
async fn test_save_existing_refreshes_updated_at_only() -> Result<()> {
    let pool = setup_test_db().await;
    let saved = insert(&pool, "Original content").await?;

    tokio::time::sleep(Duration::from_millis(10)).await;

    let mut changed = saved.clone();
    changed.body = Some("Updated content".to_string());
    let mut conn = pool.acquire().await?;
    let updated = db::save_note(&mut conn, changed).await?;

    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.body.as_deref(), Some("Updated content"));
    assert_eq!(updated.created_at, saved.created_at);
    assert!(updated.updated_at > saved.updated_at);

    Ok(())
}

#[tokio::test]
async fn test_save_ignores_caller_timestamps() -> Result<()> {
    let pool = setup_test_db().await;
    let saved = insert(&pool, "Original").await?;

    let mut forged = saved.clone();
    forged.created_at = Some(Utc::now() + chrono::Duration::days(365));
    forged.updated_at = Some(Utc::now() - chrono::Duration::days(365));
    let mut conn = pool.acquire().await?;
    let updated = db::save_note(&mut conn, forged).await?;

    assert_eq!(updated.created_at, saved.created_at);
    assert!(updated.updated_at >= saved.updated_at);

    Ok(())
}

#[tokio::test]
async fn test_save_with_unknown_id_inserts_under_new_id() -> Result<()> {
    let pool = setup_test_db().await;
    let stale = Uuid::new_v4();

    let mut conn = pool.acquire().await?;
    let saved = db::save_note(
        &mut conn,
        NoteRecord {
            id: Some(stale),
            body: Some("Orphan".to_string()),
            ..Default::default()
        },
    )
    .await?;
    drop(conn);

    assert!(saved.id.is_some());
    assert_ne!(saved.id, Some(stale));
    assert!(!db::note_exists(&pool, stale).await?);
    assert_eq!(db::count_notes(&pool).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_save_with_null_body_is_constraint_violation() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let err = db::save_note(&mut conn, NoteRecord::default())
        .await
        .expect_err("null body must be rejected");

    assert!(err.is_constraint_violation(), "unexpected error: {err}");
}

// ============================================================================
// Lookup
// ============================================================================

#[tokio::test]
async fn test_find_by_id_existing() -> Result<()> {
    let pool = setup_test_db().await;
    let saved = insert(&pool, "Findable note").await?;

    let found = db::find_note_by_id(&pool, saved.id.unwrap()).await?;

    assert_eq!(found, Some(saved));

    Ok(())
}

#[tokio::test]
async fn test_find_by_id_missing() -> Result<()> {
    let pool = setup_test_db().await;
    assert!(db::find_note_by_id(&pool, Uuid::new_v4()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_lock_note_by_id_returns_row_unchanged() -> Result<()> {
    let pool = setup_test_db().await;
    let saved = insert(&pool, "Locked note").await?;

    let mut tx = pool.begin().await?;
    let locked = db::lock_note_by_id(&mut *tx, saved.id.unwrap()).await?;
    let missing = db::lock_note_by_id(&mut *tx, Uuid::new_v4()).await?;
    tx.commit().await?;

    assert_eq!(locked, Some(saved.clone()));
    assert!(missing.is_none());
    assert_eq!(db::find_note_by_id(&pool, saved.id.unwrap()).await?, Some(saved));
    assert_eq!(db::count_notes(&pool).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_find_all_in_insertion_order() -> Result<()> {
    let pool = setup_test_db().await;
    for body in ["First note", "Second note", "Third note"] {
        insert(&pool, body).await?;
    }

    let all = db::find_all_notes(&pool).await?;
    let bodies: Vec<_> = all.iter().filter_map(|n| n.body.as_deref()).collect();

    assert_eq!(bodies, vec!["First note", "Second note", "Third note"]);

    Ok(())
}

// ============================================================================
// Delete / count / exists
// ============================================================================

#[tokio::test]
async fn test_delete_existing() -> Result<()> {
    let pool = setup_test_db().await;
    let id = insert(&pool, "Doomed").await?.id.unwrap();

    assert!(db::note_exists(&pool, id).await?);
    db::delete_note_by_id(&pool, id).await?;
    assert!(!db::note_exists(&pool, id).await?);
    assert!(db::find_note_by_id(&pool, id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_delete_missing_is_ok() -> Result<()> {
    let pool = setup_test_db().await;
    insert(&pool, "Bystander").await?;

    db::delete_note_by_id(&pool, Uuid::new_v4()).await?;

    assert_eq!(db::count_notes(&pool).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_count() -> Result<()> {
    let pool = setup_test_db().await;
    assert_eq!(db::count_notes(&pool).await?, 0);

    insert(&pool, "One").await?;
    insert(&pool, "Two").await?;

    assert_eq!(db::count_notes(&pool).await?, 2);

    Ok(())
}

// ============================================================================
// Streaming
// ============================================================================

#[tokio::test]
async fn test_stream_notes() -> Result<()> {
    let pool = setup_test_db().await;
    for body in ["Stream note 1", "Stream note 2", "Stream note 3"] {
        insert(&pool, body).await?;
    }

    let mut tx = pool.begin().await?;
    let bodies: Vec<String> = db::stream_notes(&mut *tx)
        .map_ok(|n| n.body.unwrap_or_default())
        .try_collect()
        .await?;
    tx.commit().await?;

    assert_eq!(bodies, vec!["Stream note 1", "Stream note 2", "Stream note 3"]);

    Ok(())
}

#[tokio::test]
async fn test_stream_notes_empty() -> Result<()> {
    let pool = setup_test_db().await;

    let records: Vec<NoteRecord> = db::stream_notes(&pool).try_collect().await?;

    assert!(records.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_stream_notes_large_dataset() -> Result<()> {
    let pool = setup_test_db().await;
    let expected = 500;

    let mut tx = pool.begin().await?;
    for i in 0..expected {
        db::save_note(&mut *tx, unsaved(&format!("Bulk note {}", i))).await?;
    }
    tx.commit().await?;

    let mut tx = pool.begin().await?;
    let count = db::stream_notes(&mut *tx)
        .try_fold(0usize, |acc, _| async move { Ok::<_, quicknotes::Error>(acc + 1) })
        .await?;
    tx.commit().await?;

    assert_eq!(count, expected);

    Ok(())
}
