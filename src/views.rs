//! Server-side HTML rendering.
//!
//! Templates are compiled into the binary and loaded into a single [`Tera`]
//! instance at startup.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::{Context, Tera};

use crate::api::flash::Flash;
use crate::models::{Note, NoteForm};
use crate::Result;

pub const LIST_TEMPLATE: &str = "notes/list.html";
pub const FORM_TEMPLATE: &str = "notes/form.html";

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    (LIST_TEMPLATE, include_str!("../templates/notes/list.html")),
    (FORM_TEMPLATE, include_str!("../templates/notes/form.html")),
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Compiled page templates.
#[derive(Clone, Debug)]
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Compile all templates.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to parse.
    pub fn build() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    pub fn render<S: Serialize>(&self, template: &str, data: &S) -> Result<String> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(template, &context)?)
    }

    /// Render the note list page.
    pub fn note_list(&self, notes: &[Note], flash: Option<&Flash>) -> Result<String> {
        self.render(
            LIST_TEMPLATE,
            &ListPage {
                notes: notes.iter().map(NoteRow::from).collect(),
                flash,
            },
        )
    }

    /// Render the create/edit form page.
    pub fn note_form(&self, form: &NoteForm, is_edit: bool, flash: Option<&Flash>) -> Result<String> {
        self.render(
            FORM_TEMPLATE,
            &FormPage {
                form: FormFields {
                    id: form.id.map(|id| id.to_string()),
                    body: form.body.clone().unwrap_or_default(),
                },
                is_edit,
                flash,
            },
        )
    }
}

#[derive(Serialize)]
struct ListPage<'a> {
    notes: Vec<NoteRow>,
    flash: Option<&'a Flash>,
}

#[derive(Serialize)]
struct NoteRow {
    id: String,
    body: String,
    created_at: String,
    updated_at: String,
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.map(|id| id.to_string()).unwrap_or_default(),
            body: note.body.clone().unwrap_or_default(),
            created_at: format_timestamp(note.created_at),
            updated_at: format_timestamp(note.updated_at),
        }
    }
}

#[derive(Serialize)]
struct FormPage<'a> {
    form: FormFields,
    is_edit: bool,
    flash: Option<&'a Flash>,
}

#[derive(Serialize)]
struct FormFields {
    id: Option<String>,
    body: String,
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}
