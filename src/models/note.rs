//! Note models: persisted record, transfer shape and edit form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A note as passed between the service and the presentation layer.
///
/// `id` is absent until the note has been persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<Uuid>,
    pub body: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// A not-yet-persisted note with the given body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Default::default()
        }
    }
}

/// Note row in the `notes` table.
///
/// Records returned by the gateway always carry `id`, `created_at` and
/// `updated_at`; those fields are only ever assigned by `db::notes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct NoteRecord {
    pub id: Option<Uuid>,
    pub body: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Editable projection of a note, bound from and rendered into HTML forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Browsers submit `id=` for an empty hidden input.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Uuid::parse_str(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
