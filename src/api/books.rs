//! Book (catalog entry) endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::FieldMessage,
    models::{
        author::Author,
        book::{Book, BookForm, BookListRow},
        book_instance::BookInstance,
    },
    services::{DeleteOutcome, Submission},
    AppState,
};

/// Book detail view: the book (author and genres attached) plus its copies
#[derive(Serialize, ToSchema)]
pub struct BookDetailView {
    pub book: Book,
    pub book_instances: Vec<BookInstance>,
}

/// A genre option in the book form, flagged when the submission selected it
#[derive(Serialize, ToSchema)]
pub struct GenreChoice {
    pub id: Uuid,
    pub name: String,
    pub checked: bool,
}

/// Sanitized field values for form redisplay
#[derive(Serialize, ToSchema)]
pub struct BookFormValues {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

/// Book form view: reference data, submitted values and field messages
#[derive(Serialize, ToSchema)]
pub struct BookFormView {
    pub authors: Vec<Author>,
    pub genres: Vec<GenreChoice>,
    pub book: Option<BookFormValues>,
    pub errors: Vec<FieldMessage>,
}

/// Delete confirmation view: the book plus the copies that block deletion
#[derive(Serialize, ToSchema)]
pub struct BookDeleteView {
    pub book: Book,
    pub book_instances: Vec<BookInstance>,
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Books sorted by title", body = [BookListRow])
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<BookListRow>>> {
    let books = state.services.catalog.book_list().await?;
    Ok(Json(books))
}

/// Get book details with author, genres and copies
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetailView),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookDetailView>> {
    let view = state.services.catalog.book_detail(id).await?;
    Ok(Json(view))
}

/// Book create form with author and genre reference data
#[utoipa::path(
    get,
    path = "/books/create",
    tag = "books",
    responses(
        (status = 200, description = "Empty book form", body = BookFormView)
    )
)]
pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Json<BookFormView>> {
    let view = state.services.catalog.book_form().await?;
    Ok(Json(view))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books/create",
    tag = "books",
    request_body = BookForm,
    responses(
        (status = 303, description = "Redirect to the created book"),
        (status = 200, description = "Form re-rendered with field messages", body = BookFormView)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(form): Json<BookForm>,
) -> AppResult<Response> {
    match state.services.catalog.create_book(form).await? {
        Submission::Accepted(id) => Ok(Redirect::to(&format!("/books/{}", id)).into_response()),
        Submission::Rejected(view) => Ok(Json(view).into_response()),
    }
}

/// Book update form, prefilled
#[utoipa::path(
    get,
    path = "/books/{id}/update",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Prefilled book form", body = BookFormView),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookFormView>> {
    let view = state.services.catalog.book_update_form(id).await?;
    Ok(Json(view))
}

/// Update a book
#[utoipa::path(
    post,
    path = "/books/{id}/update",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body = BookForm,
    responses(
        (status = 303, description = "Redirect to the updated book"),
        (status = 200, description = "Form re-rendered with field messages", body = BookFormView),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<BookForm>,
) -> AppResult<Response> {
    match state.services.catalog.update_book(id, form).await? {
        Submission::Accepted(id) => Ok(Redirect::to(&format!("/books/{}", id)).into_response()),
        Submission::Rejected(view) => Ok(Json(view).into_response()),
    }
}

/// Book delete confirmation
#[utoipa::path(
    get,
    path = "/books/{id}/delete",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Confirmation view with dependent copies", body = BookDeleteView),
        (status = 303, description = "Redirect to the book list when already gone")
    )
)]
pub async fn delete_book_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.catalog.book_delete_view(id).await? {
        Some(view) => Ok(Json(view).into_response()),
        None => Ok(Redirect::to("/books").into_response()),
    }
}

/// Delete a book. Refused while copies still reference it.
#[utoipa::path(
    post,
    path = "/books/{id}/delete",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Deleted (or already gone); redirect to the book list"),
        (status = 200, description = "Blocked: dependent copies remain", body = BookDeleteView)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.catalog.delete_book(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::AlreadyGone => {
            Ok(Redirect::to("/books").into_response())
        }
        DeleteOutcome::Blocked(view) => Ok(Json(view).into_response()),
    }
}
