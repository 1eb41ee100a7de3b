//! Notes Routes
//!
//! Server-rendered pages for browsing and editing notes.
//!
//! Routes:
//! - GET / - List all notes
//! - GET /notes/new - Empty note form
//! - GET /notes/:id/edit - Edit form for an existing note
//! - POST /notes - Create or update a note
//! - POST /notes/:id/delete - Delete a note
//!
//! Write handlers never fail the request: the outcome is reported as a flash
//! message and the browser is redirected to the list.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::CookieJar;
use tracing::warn;
use uuid::Uuid;

use super::flash::{self, Flash};
use crate::mappers::{form_to_note, note_to_form};
use crate::models::NoteForm;
use crate::{AppState, Error, Result};

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notes))
        .route("/notes", post(save_note))
        .route("/notes/new", get(new_note_form))
        .route("/notes/:id/edit", get(edit_note_form))
        .route("/notes/:id/delete", post(delete_note))
}

/// List all notes.
///
/// GET /
#[axum::debug_handler]
async fn list_notes(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>)> {
    let notes = state.notes.get_all().await?;
    let (jar, flash) = flash::take(jar);
    let page = state.views.note_list(&notes, flash.as_ref())?;
    Ok((jar, Html(page)))
}

/// Show an empty note form.
///
/// GET /notes/new
#[axum::debug_handler]
async fn new_note_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>)> {
    let (jar, flash) = flash::take(jar);
    let page = state
        .views
        .note_form(&NoteForm::default(), false, flash.as_ref())?;
    Ok((jar, Html(page)))
}

/// Show the edit form for a note, or go back to the list if it is gone.
///
/// GET /notes/:id/edit
#[axum::debug_handler]
async fn edit_note_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<(CookieJar, Response)> {
    let note = match state.notes.get(id).await {
        Ok(note) => note,
        Err(Error::NotFound(_)) => {
            let jar = flash::set(jar, Flash::error("Note not found"));
            return Ok((jar, Redirect::to("/").into_response()));
        }
        Err(e) => return Err(e),
    };

    let (jar, flash) = flash::take(jar);
    let page = state
        .views
        .note_form(&note_to_form(&note), true, flash.as_ref())?;
    Ok((jar, Html(page).into_response()))
}

/// Create or update a note from the submitted form.
///
/// POST /notes
#[axum::debug_handler]
async fn save_note(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<NoteForm>,
) -> (CookieJar, Redirect) {
    let action = if form.id.is_none() { "created" } else { "updated" };

    let message = match state.notes.upsert(form_to_note(form)).await {
        Ok(_) => Flash::success(format!("Note {} successfully", action)),
        Err(e) => {
            warn!(error = %e, "Failed to save note");
            Flash::error(format!("Error saving note: {}", e))
        }
    };

    (flash::set(jar, message), Redirect::to("/"))
}

/// Delete a note.
///
/// POST /notes/:id/delete
#[axum::debug_handler]
async fn delete_note(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> (CookieJar, Redirect) {
    let message = match state.notes.delete_by_id(id).await {
        Ok(()) => Flash::success("Note deleted successfully"),
        Err(e) => {
            warn!(%id, error = %e, "Failed to delete note");
            Flash::error(format!("Error deleting note: {}", e))
        }
    };

    (flash::set(jar, message), Redirect::to("/"))
}
