//! Author endpoints

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
        author::{Author, AuthorForm, AuthorInput},
        book::BookSummary,
    },
    services::{DeleteOutcome, Submission},
    AppState,
};

/// Author detail view: the author plus their books
#[derive(Serialize, ToSchema)]
pub struct AuthorDetailView {
    pub author: Author,
    pub author_books: Vec<BookSummary>,
}

/// Sanitized field values for form redisplay
#[derive(Serialize, ToSchema)]
pub struct AuthorFormValues {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
}

impl AuthorFormValues {
    pub fn from_input(input: &AuthorInput) -> Self {
        Self {
            first_name: input.first_name.clone(),
            family_name: input.family_name.clone(),
            date_of_birth: input.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()),
            date_of_death: input.date_of_death.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }

    pub fn from_author(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()),
            date_of_death: author.date_of_death.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Author form view: submitted values plus collected field messages
#[derive(Serialize, ToSchema)]
pub struct AuthorFormView {
    pub author: Option<AuthorFormValues>,
    pub errors: Vec<FieldMessage>,
}

/// Delete confirmation view: the author plus the books that block deletion
#[derive(Serialize, ToSchema)]
pub struct AuthorDeleteView {
    pub author: Author,
    pub author_books: Vec<BookSummary>,
}

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Authors sorted by family name", body = [Author])
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list_authors().await?;
    Ok(Json(authors))
}

/// Get author details with their books
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorDetailView),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AuthorDetailView>> {
    let view = state.services.authors.author_detail(id).await?;
    Ok(Json(view))
}

/// Author create form
#[utoipa::path(
    get,
    path = "/authors/create",
    tag = "authors",
    responses(
        (status = 200, description = "Empty author form", body = AuthorFormView)
    )
)]
pub async fn create_author_form() -> Json<AuthorFormView> {
    Json(AuthorFormView {
        author: None,
        errors: Vec::new(),
    })
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors/create",
    tag = "authors",
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Redirect to the created author"),
        (status = 200, description = "Form re-rendered with field messages", body = AuthorFormView)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(form): Json<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create_author(form).await? {
        Submission::Accepted(id) => Ok(Redirect::to(&format!("/authors/{}", id)).into_response()),
        Submission::Rejected(view) => Ok(Json(view).into_response()),
    }
}

/// Author update form, prefilled
#[utoipa::path(
    get,
    path = "/authors/{id}/update",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Prefilled author form", body = AuthorFormView),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AuthorFormView>> {
    let view = state.services.authors.update_form(id).await?;
    Ok(Json(view))
}

/// Update an author
#[utoipa::path(
    post,
    path = "/authors/{id}/update",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Redirect to the updated author"),
        (status = 200, description = "Form re-rendered with field messages", body = AuthorFormView),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.update_author(id, form).await? {
        Submission::Accepted(id) => Ok(Redirect::to(&format!("/authors/{}", id)).into_response()),
        Submission::Rejected(view) => Ok(Json(view).into_response()),
    }
}

/// Author delete confirmation
#[utoipa::path(
    get,
    path = "/authors/{id}/delete",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Confirmation view with dependent books", body = AuthorDeleteView),
        (status = 303, description = "Redirect to the author list when already gone")
    )
)]
pub async fn delete_author_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.authors.delete_view(id).await? {
        Some(view) => Ok(Json(view).into_response()),
        None => Ok(Redirect::to("/authors").into_response()),
    }
}

/// Delete an author. Refused while books still reference them.
#[utoipa::path(
    post,
    path = "/authors/{id}/delete",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 303, description = "Deleted (or already gone); redirect to the author list"),
        (status = 200, description = "Blocked: dependent books remain", body = AuthorDeleteView)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.authors.delete_author(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::AlreadyGone => {
            Ok(Redirect::to("/authors").into_response())
        }
        DeleteOutcome::Blocked(view) => Ok(Json(view).into_response()),
    }
}
