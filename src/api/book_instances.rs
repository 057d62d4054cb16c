//! BookInstance (physical copy) endpoints

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
        book::BookTitle,
        book_instance::{BookInstance, BookInstanceForm, InstanceListRow},
    },
    services::{DeleteOutcome, Submission},
    AppState,
};

/// Sanitized field values for form redisplay
#[derive(Serialize, ToSchema)]
pub struct InstanceFormValues {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<String>,
}

/// Copy form view: the book selection list, submitted values and messages
#[derive(Serialize, ToSchema)]
pub struct InstanceFormView {
    pub book_list: Vec<BookTitle>,
    pub selected_book: Option<Uuid>,
    pub bookinstance: Option<InstanceFormValues>,
    pub errors: Vec<FieldMessage>,
}

/// Delete confirmation view for a copy
#[derive(Serialize, ToSchema)]
pub struct InstanceDeleteView {
    pub book_instance: BookInstance,
}

/// List all copies
#[utoipa::path(
    get,
    path = "/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "All copies with their book titles", body = [InstanceListRow])
    )
)]
pub async fn list_instances(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<InstanceListRow>>> {
    let instances = state.services.catalog.instance_list().await?;
    Ok(Json(instances))
}

/// Get copy details with its book
#[utoipa::path(
    get,
    path = "/bookinstances/{id}",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy details", body = BookInstance),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.catalog.instance_detail(id).await?;
    Ok(Json(instance))
}

/// Copy create form with the book selection list
#[utoipa::path(
    get,
    path = "/bookinstances/create",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Empty copy form", body = InstanceFormView)
    )
)]
pub async fn create_instance_form(
    State(state): State<AppState>,
) -> AppResult<Json<InstanceFormView>> {
    let view = state.services.catalog.instance_form().await?;
    Ok(Json(view))
}

/// Create a copy
#[utoipa::path(
    post,
    path = "/bookinstances/create",
    tag = "bookinstances",
    request_body = BookInstanceForm,
    responses(
        (status = 303, description = "Redirect to the created copy"),
        (status = 200, description = "Form re-rendered with field messages", body = InstanceFormView)
    )
)]
pub async fn create_instance(
    State(state): State<AppState>,
    Json(form): Json<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.catalog.create_instance(form).await? {
        Submission::Accepted(id) => {
            Ok(Redirect::to(&format!("/bookinstances/{}", id)).into_response())
        }
        Submission::Rejected(view) => Ok(Json(view).into_response()),
    }
}

/// Copy update form, prefilled
#[utoipa::path(
    get,
    path = "/bookinstances/{id}/update",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Prefilled copy form", body = InstanceFormView),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_instance_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<InstanceFormView>> {
    let view = state.services.catalog.instance_update_form(id).await?;
    Ok(Json(view))
}

/// Update a copy
#[utoipa::path(
    post,
    path = "/bookinstances/{id}/update",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Copy ID")),
    request_body = BookInstanceForm,
    responses(
        (status = 303, description = "Redirect to the updated copy"),
        (status = 200, description = "Form re-rendered with field messages", body = InstanceFormView),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.catalog.update_instance(id, form).await? {
        Submission::Accepted(id) => {
            Ok(Redirect::to(&format!("/bookinstances/{}", id)).into_response())
        }
        Submission::Rejected(view) => Ok(Json(view).into_response()),
    }
}

/// Copy delete confirmation
#[utoipa::path(
    get,
    path = "/bookinstances/{id}/delete",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Confirmation view", body = InstanceDeleteView),
        (status = 303, description = "Redirect to the copy list when already gone")
    )
)]
pub async fn delete_instance_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.catalog.instance_delete_view(id).await? {
        Some(view) => Ok(Json(view).into_response()),
        None => Ok(Redirect::to("/bookinstances").into_response()),
    }
}

/// Delete a copy
#[utoipa::path(
    post,
    path = "/bookinstances/{id}/delete",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Copy ID")),
    responses(
        (status = 303, description = "Deleted (or already gone); redirect to the copy list")
    )
)]
pub async fn delete_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.catalog.delete_instance(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::AlreadyGone => {
            Ok(Redirect::to("/bookinstances").into_response())
        }
        DeleteOutcome::Blocked(view) => Ok(Json(view).into_response()),
    }
}
