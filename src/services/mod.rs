//! Service layer for quicknotes.
//!
//! Contains the business logic between the web controller and the
//! persistence gateway:
//! - Note (listing, lookup, upsert and delete of notes)

mod note;

pub use note::NoteService;
