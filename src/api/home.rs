//! Landing page endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

/// Catalog-wide record counts
#[derive(Serialize, ToSchema)]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

/// Landing page view. When a count fails, `data` is absent and `error`
/// carries the reason instead of failing the page.
#[derive(Serialize, ToSchema)]
pub struct HomeView {
    pub data: Option<CatalogCounts>,
    pub error: Option<String>,
}

/// Landing page with catalog-wide counts
#[utoipa::path(
    get,
    path = "/",
    tag = "home",
    responses(
        (status = 200, description = "Record counts, possibly degraded", body = HomeView)
    )
)]
pub async fn index(State(state): State<AppState>) -> Json<HomeView> {
    Json(state.services.stats.landing_counts().await)
}
