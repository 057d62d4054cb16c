//! Genre endpoints

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
    models::{book::BookSummary, genre::{Genre, GenreForm}},
    services::{DeleteOutcome, Submission},
    AppState,
};

/// Genre detail view: the genre plus the books referencing it
#[derive(Serialize, ToSchema)]
pub struct GenreDetailView {
    pub genre: Genre,
    pub genre_books: Vec<BookSummary>,
}

/// Sanitized field values for form redisplay
#[derive(Serialize, ToSchema)]
pub struct GenreFormValues {
    pub name: String,
}

/// Genre form view: submitted values plus collected field messages
#[derive(Serialize, ToSchema)]
pub struct GenreFormView {
    pub genre: Option<GenreFormValues>,
    pub errors: Vec<FieldMessage>,
}

/// Delete confirmation view: the genre plus the books that block deletion
#[derive(Serialize, ToSchema)]
pub struct GenreDeleteView {
    pub genre: Genre,
    pub genre_books: Vec<BookSummary>,
}

/// List all genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genres sorted by name", body = [Genre])
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.genres.list_genres().await?;
    Ok(Json(genres))
}

/// Get genre details with the books referencing it
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre details", body = GenreDetailView),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<GenreDetailView>> {
    let view = state.services.genres.genre_detail(id).await?;
    Ok(Json(view))
}

/// Genre create form
#[utoipa::path(
    get,
    path = "/genres/create",
    tag = "genres",
    responses(
        (status = 200, description = "Empty genre form", body = GenreFormView)
    )
)]
pub async fn create_genre_form() -> Json<GenreFormView> {
    Json(GenreFormView {
        genre: None,
        errors: Vec::new(),
    })
}

/// Create a genre. When a genre with the exact same name already exists,
/// the response redirects there instead of inserting a duplicate.
#[utoipa::path(
    post,
    path = "/genres/create",
    tag = "genres",
    request_body = GenreForm,
    responses(
        (status = 303, description = "Redirect to the created (or matching existing) genre"),
        (status = 200, description = "Form re-rendered with field messages", body = GenreFormView)
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Json(form): Json<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.create_genre(form).await? {
        Submission::Accepted(id) => Ok(Redirect::to(&format!("/genres/{}", id)).into_response()),
        Submission::Rejected(view) => Ok(Json(view).into_response()),
    }
}

/// Genre update form, prefilled
#[utoipa::path(
    get,
    path = "/genres/{id}/update",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Prefilled genre form", body = GenreFormView),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<GenreFormView>> {
    let view = state.services.genres.update_form(id).await?;
    Ok(Json(view))
}

/// Update a genre
#[utoipa::path(
    post,
    path = "/genres/{id}/update",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    request_body = GenreForm,
    responses(
        (status = 303, description = "Redirect to the updated genre"),
        (status = 200, description = "Form re-rendered with field messages", body = GenreFormView),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.update_genre(id, form).await? {
        Submission::Accepted(id) => Ok(Redirect::to(&format!("/genres/{}", id)).into_response()),
        Submission::Rejected(view) => Ok(Json(view).into_response()),
    }
}

/// Genre delete confirmation
#[utoipa::path(
    get,
    path = "/genres/{id}/delete",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Confirmation view with dependent books", body = GenreDeleteView),
        (status = 303, description = "Redirect to the genre list when already gone")
    )
)]
pub async fn delete_genre_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.genres.delete_view(id).await? {
        Some(view) => Ok(Json(view).into_response()),
        None => Ok(Redirect::to("/genres").into_response()),
    }
}

/// Delete a genre. Refused while books still reference it.
#[utoipa::path(
    post,
    path = "/genres/{id}/delete",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 303, description = "Deleted (or already gone); redirect to the genre list"),
        (status = 200, description = "Blocked: dependent books remain", body = GenreDeleteView)
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.genres.delete_genre(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::AlreadyGone => {
            Ok(Redirect::to("/genres").into_response())
        }
        DeleteOutcome::Blocked(view) => Ok(Json(view).into_response()),
    }
}
