//! Conversions between [`NoteRecord`], [`Note`] and [`NoteForm`].
//!
//! All functions are pure. Server-managed fields follow fixed rules:
//! timestamps never flow into a record, and an in-place update only ever
//! touches the body.

use crate::models::{Note, NoteForm, NoteRecord};

/// Copy a persisted record into the transfer shape, field for field.
pub fn record_to_note(record: &NoteRecord) -> Note {
    Note {
        id: record.id,
        body: record.body.clone(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

/// Build an unsaved record from a note. Timestamps are left for the gateway.
pub fn note_to_record(note: &Note) -> NoteRecord {
    NoteRecord {
        id: note.id,
        body: note.body.clone(),
        created_at: None,
        updated_at: None,
    }
}

/// Copy the body of `note` onto an existing record.
///
/// The record's id and timestamps are never taken from the note. A `None`
/// note leaves the record unchanged.
pub fn apply_note_to_record(note: Option<&Note>, record: &mut NoteRecord) {
    if let Some(note) = note {
        record.body = note.body.clone();
    }
}

/// Editable projection of a note: id and body, no timestamps.
pub fn note_to_form(note: &Note) -> NoteForm {
    NoteForm {
        id: note.id,
        body: note.body.clone(),
    }
}

/// Build a note from a submitted form. Timestamps stay absent.
pub fn form_to_note(form: NoteForm) -> Note {
    Note {
        id: form.id,
        body: form.body,
        created_at: None,
        updated_at: None,
    }
}
