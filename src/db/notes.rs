//! Note database queries.
//!
//! The only code that writes to the `notes` table. Identifiers and both
//! timestamps are assigned here and nowhere else.
//!
//! Every query takes any SQLite executor, so the same function runs against
//! the pool or inside a caller's transaction (`&mut *tx`).

use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use sqlx::{SqliteConnection, SqliteExecutor};
use tracing::debug;
use uuid::Uuid;

use crate::models::{new_id, now, NoteRecord};
use crate::{Error, Result};

// ============================================================================
// Queries
// ============================================================================

/// Get a note by ID.
pub async fn find_note_by_id<'e>(
    executor: impl SqliteExecutor<'e>,
    id: Uuid,
) -> Result<Option<NoteRecord>> {
    let record = sqlx::query_as::<_, NoteRecord>("SELECT * FROM notes WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(record)
}

/// Get a note by ID and take the database write lock.
///
/// The no-op `UPDATE` makes this the transaction's first write, so SQLite
/// grants the write lock here (waiting out `busy_timeout` if needed) instead
/// of failing a later read-to-write upgrade with `SQLITE_BUSY`. Rows are left
/// untouched whether or not one matches.
pub async fn lock_note_by_id(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<Option<NoteRecord>> {
    let record =
        sqlx::query_as::<_, NoteRecord>("UPDATE notes SET body = body WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(record)
}

/// List all notes in insertion order.
pub async fn find_all_notes<'e>(executor: impl SqliteExecutor<'e>) -> Result<Vec<NoteRecord>> {
    let records = sqlx::query_as::<_, NoteRecord>("SELECT * FROM notes ORDER BY rowid ASC")
        .fetch_all(executor)
        .await?;

    Ok(records)
}

/// Stream all notes in insertion order.
///
/// The stream holds a cursor on the executor; run it inside a transaction
/// when other statements may interleave with the read.
pub fn stream_notes<'e, E>(executor: E) -> BoxStream<'e, Result<NoteRecord>>
where
    E: SqliteExecutor<'e> + 'e,
{
    sqlx::query_as::<_, NoteRecord>("SELECT * FROM notes ORDER BY rowid ASC")
        .fetch(executor)
        .map_err(Error::from)
        .boxed()
}

/// Persist a note.
///
/// A record without an id is inserted with a fresh id. A record with an id
/// updates the matching row in place (body and `updated_at` only); when no
/// row matches, it is inserted under a fresh id instead.
pub async fn save_note(conn: &mut SqliteConnection, record: NoteRecord) -> Result<NoteRecord> {
    let Some(id) = record.id else {
        return insert_note(conn, record.body).await;
    };

    let updated = sqlx::query_as::<_, NoteRecord>(
        r#"
        UPDATE notes
        SET body = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&record.body)
    .bind(now())
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match updated {
        Some(updated) => {
            debug!(%id, "Updated note");
            Ok(updated)
        }
        None => {
            debug!(%id, "No note with this id, inserting a new one");
            insert_note(conn, record.body).await
        }
    }
}

async fn insert_note(conn: &mut SqliteConnection, body: Option<String>) -> Result<NoteRecord> {
    let id = new_id();
    let timestamp = now();

    let record = sqlx::query_as::<_, NoteRecord>(
        r#"
        INSERT INTO notes (id, body, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&body)
    .bind(timestamp)
    .bind(timestamp)
    .fetch_one(&mut *conn)
    .await?;

    debug!(%id, "Inserted note");

    Ok(record)
}

/// Delete a note. Deleting a missing note is not an error.
pub async fn delete_note_by_id<'e>(executor: impl SqliteExecutor<'e>, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM notes WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    debug!(%id, deleted = result.rows_affected(), "Delete note");

    Ok(())
}

/// Count all notes.
pub async fn count_notes<'e>(executor: impl SqliteExecutor<'e>) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
        .fetch_one(executor)
        .await?;

    Ok(count)
}

/// Check whether a note with this id exists.
pub async fn note_exists<'e>(executor: impl SqliteExecutor<'e>, id: Uuid) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM notes WHERE id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(exists)
}
