//! Browser-facing todo handlers.
//!
//! This module provides the HTML listing page and the form-driven
//! mutations behind it:
//!
//! - `GET /todos` - Render the listing page
//! - `POST /submittodoitem` - Create a todo from the add form
//! - `POST /todos/{id}/toggle` - Flip completion
//! - `POST /todos/{id}/delete` - Remove a todo
//!
//! Every mutation follows the POST/redirect/GET shape: the outcome is
//! stored as a one-shot flash in a signed cookie and the browser is
//! redirected back to `/todos`, where the next render consumes it.
//! Mutations therefore never surface an error status to the browser;
//! failure is a flash banner, not a 5xx.

use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use crate::api::extract::ClientIp;
use crate::api::flash::{Flash, set_flash, take_flash};
use crate::api::state::AppState;
use crate::api::views::{TodosPage, render_page};
use crate::domain::NewTodo;

/// Target of every post-mutation redirect.
const REDIRECT_TARGET: &str = "/todos";

/// Fields of the add form.
///
/// Both fields default to empty so a missing field reads as a blank
/// submission instead of a 422.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTodoForm {
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub item_description: String,
}

/// GET /todos - Render the listing page.
///
/// Consumes any pending flash so the banner shows exactly once.
pub async fn todos_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Response) {
    let (jar, flash) = take_flash(jar);
    let todos = state.repository().list().await;
    let page = TodosPage::new(flash, &todos, state.database_name());

    (jar, render_page(page))
}

/// POST /submittodoitem - Create a todo from the add form.
///
/// Blank name or description rejects the submission without touching
/// the store.
///
/// # Response
///
/// - `303 See Other` - Always, back to `/todos` with a flash set
pub async fn submit_todo(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ClientIp(ip_address): ClientIp,
    Form(form): Form<NewTodoForm>,
) -> (SignedCookieJar, Redirect) {
    let flash = if form.item_name.is_empty() || form.item_description.is_empty() {
        Flash::error("Both item name and description are required!")
    } else {
        let created = state
            .repository()
            .create(NewTodo {
                name: form.item_name,
                description: form.item_description,
                ip_address,
            })
            .await;

        if created {
            Flash::success("Todo item added successfully!")
        } else {
            Flash::error("Failed to add todo item. Database may be unavailable.")
        }
    };

    (set_flash(jar, &flash), Redirect::to(REDIRECT_TARGET))
}

/// POST /todos/{id}/toggle - Flip completion of a todo.
///
/// The flash wording follows the state the todo ended up in.
///
/// # Response
///
/// - `303 See Other` - Always, back to `/todos` with a flash set
pub async fn toggle_todo(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<String>,
) -> (SignedCookieJar, Redirect) {
    let flash = match state.repository().toggle(&id).await {
        Some(todo) if todo.completed => Flash::success("Todo marked as completed!"),
        Some(_) => Flash::success("Todo marked as incomplete!"),
        None => Flash::error("Failed to update todo. It may have been deleted."),
    };

    (set_flash(jar, &flash), Redirect::to(REDIRECT_TARGET))
}

/// POST /todos/{id}/delete - Remove a todo.
///
/// # Response
///
/// - `303 See Other` - Always, back to `/todos` with a flash set
pub async fn delete_todo(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<String>,
) -> (SignedCookieJar, Redirect) {
    let flash = if state.repository().delete(&id).await {
        Flash::success("Todo item deleted successfully!")
    } else {
        Flash::error("Failed to delete todo. It may have already been removed.")
    };

    (set_flash(jar, &flash), Redirect::to(REDIRECT_TARGET))
}
