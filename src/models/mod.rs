//! Data models for quicknotes.
//!
//! The persisted record, the public transfer shape and the edit form.

mod note;

pub use note::*;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new note identifier
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
