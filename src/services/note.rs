//! Note service.
//!
//! Owns the create-or-update decision for notes and the transaction
//! boundary around it.

use futures::TryStreamExt;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::{self, DbPool};
use crate::error::{Error, Result};
use crate::mappers::{apply_note_to_record, note_to_record, record_to_note};
use crate::models::Note;

/// Service for managing notes.
#[derive(Clone)]
pub struct NoteService {
    db: DbPool,
}

impl NoteService {
    /// Create a new note service.
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// List all notes in insertion order.
    ///
    /// Rows are streamed inside a read transaction so the cursor stays valid
    /// for the whole listing.
    pub async fn get_all(&self) -> Result<Vec<Note>> {
        let mut tx = self.db.begin().await?;

        let notes = {
            let mut rows = db::stream_notes(&mut *tx);
            let mut notes = Vec::new();
            while let Some(record) = rows.try_next().await? {
                notes.push(record_to_note(&record));
            }
            notes
        };

        tx.commit().await?;

        debug!(count = notes.len(), "Listed notes");

        Ok(notes)
    }

    /// Get a note by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>> {
        let record = db::find_note_by_id(&self.db, id).await?;
        Ok(record.as_ref().map(record_to_note))
    }

    /// Get a note by ID, failing with [`Error::NotFound`] when it is missing.
    pub async fn get(&self, id: Uuid) -> Result<Note> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Note {}", id)))
    }

    /// Create or update a note.
    ///
    /// Without an id, or with an id that matches no stored note, a new note
    /// is created and the database assigns its id. With the id of a stored
    /// note, only that note's body is replaced.
    ///
    /// The lookup holds the write lock, so a concurrent delete or update of
    /// the same note lands either wholly before or wholly after this one.
    pub async fn upsert(&self, note: Note) -> Result<Note> {
        let mut tx = self.db.begin().await?;

        let record = match note.id {
            Some(id) => match db::lock_note_by_id(&mut *tx, id).await? {
                Some(mut existing) => {
                    apply_note_to_record(Some(&note), &mut existing);
                    existing
                }
                None => {
                    debug!(%id, "Unknown note id, creating a new note");
                    note_to_record(&note)
                }
            },
            None => note_to_record(&note),
        };

        let saved = db::save_note(&mut *tx, record).await?;
        tx.commit().await?;

        let saved = record_to_note(&saved);
        if let Some(id) = saved.id {
            info!(%id, "Saved note");
        }

        Ok(saved)
    }

    /// Delete a note. Succeeds whether or not the note exists.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        db::delete_note_by_id(&self.db, id).await?;
        info!(%id, "Deleted note");
        Ok(())
    }

    /// Number of stored notes.
    pub async fn count(&self) -> Result<i64> {
        db::count_notes(&self.db).await
    }

    /// Whether a note with this id is stored.
    pub async fn exists_by_id(&self, id: Uuid) -> Result<bool> {
        db::note_exists(&self.db, id).await
    }
}
