//! Catalog-wide counts for the landing page

use crate::{
    api::home::{CatalogCounts, HomeView},
    models::book_instance::InstanceStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Count every record kind concurrently. A failed count degrades the
    /// view: the error is carried instead of failing the page.
    pub async fn landing_counts(&self) -> HomeView {
        let (books, instances, available, authors, genres) = tokio::join!(
            self.repository.books.count(),
            self.repository.book_instances.count(),
            self.repository
                .book_instances
                .count_by_status(InstanceStatus::Available),
            self.repository.authors.count(),
            self.repository.genres.count(),
        );

        match (books, instances, available, authors, genres) {
            (
                Ok(book_count),
                Ok(book_instance_count),
                Ok(book_instance_available_count),
                Ok(author_count),
                Ok(genre_count),
            ) => HomeView {
                data: Some(CatalogCounts {
                    book_count,
                    book_instance_count,
                    book_instance_available_count,
                    author_count,
                    genre_count,
                }),
                error: None,
            },
            (books, instances, available, authors, genres) => {
                let error = [
                    books.err(),
                    instances.err(),
                    available.err(),
                    authors.err(),
                    genres.err(),
                ]
                .into_iter()
                .flatten()
                .next()
                .map(|e| e.to_string());
                tracing::warn!("Landing page count failed: {:?}", error);
                HomeView { data: None, error }
            }
        }
    }
}
