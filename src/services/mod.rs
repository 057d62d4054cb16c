//! Business logic services

pub mod authors;
pub mod catalog;
pub mod genres;
pub mod stats;

use uuid::Uuid;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub catalog: catalog::CatalogService,
    pub genres: genres::GenresService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}

/// Outcome of a validated create/update submission: either the identifier of
/// the written record (the redirect target) or the form view to re-render
/// with its field messages.
pub enum Submission<V> {
    Accepted(Uuid),
    Rejected(V),
}

/// Outcome of a delete request after the dependent re-check
pub enum DeleteOutcome<V> {
    /// No dependents remained; the record is gone
    Deleted,
    /// Dependents still reference the record; carries the confirmation view
    Blocked(V),
    /// The identifier no longer resolves; treated as already deleted
    AlreadyGone,
}
