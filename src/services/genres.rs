//! Genre management service

use uuid::Uuid;

use crate::{
    api::genres::{GenreDeleteView, GenreDetailView, GenreFormValues, GenreFormView},
    error::AppResult,
    forms::{self, FieldMessage},
    models::genre::{Genre, GenreForm, GENRE_RULES},
    repository::Repository,
    services::{DeleteOutcome, Submission},
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all genres sorted by name
    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    /// Genre detail: the genre and the books referencing it, fetched concurrently
    pub async fn genre_detail(&self, id: Uuid) -> AppResult<GenreDetailView> {
        let (genre, genre_books) = tokio::try_join!(
            self.repository.genres.get(id),
            self.repository.books.find_by_genre(id),
        )?;
        Ok(GenreDetailView { genre, genre_books })
    }

    /// Validate and persist a new genre. An existing genre with the exact
    /// same name wins: the submission resolves to it instead of a duplicate.
    pub async fn create_genre(&self, form: GenreForm) -> AppResult<Submission<GenreFormView>> {
        let (name, errors) = validate(&form);
        if !errors.is_empty() {
            return Ok(Submission::Rejected(GenreFormView {
                genre: Some(GenreFormValues { name }),
                errors,
            }));
        }
        if let Some(existing) = self.repository.genres.find_by_name(&name).await? {
            return Ok(Submission::Accepted(existing.id));
        }
        let genre = self.repository.genres.create(&name).await?;
        Ok(Submission::Accepted(genre.id))
    }

    /// Update form prefilled from the existing record; 404 when unresolved
    pub async fn update_form(&self, id: Uuid) -> AppResult<GenreFormView> {
        let genre = self.repository.genres.get(id).await?;
        Ok(GenreFormView {
            genre: Some(GenreFormValues { name: genre.name }),
            errors: Vec::new(),
        })
    }

    /// Validate and persist an update, keeping the identifier
    pub async fn update_genre(
        &self,
        id: Uuid,
        form: GenreForm,
    ) -> AppResult<Submission<GenreFormView>> {
        let (name, errors) = validate(&form);
        if !errors.is_empty() {
            return Ok(Submission::Rejected(GenreFormView {
                genre: Some(GenreFormValues { name }),
                errors,
            }));
        }
        let genre = self.repository.genres.update(id, &name).await?;
        Ok(Submission::Accepted(genre.id))
    }

    /// Delete confirmation data; None when the genre no longer exists
    pub async fn delete_view(&self, id: Uuid) -> AppResult<Option<GenreDeleteView>> {
        let (genre, genre_books) = tokio::try_join!(
            self.repository.genres.find(id),
            self.repository.books.find_by_genre(id),
        )?;
        Ok(genre.map(|genre| GenreDeleteView { genre, genre_books }))
    }

    /// Delete the genre unless books still reference it
    pub async fn delete_genre(&self, id: Uuid) -> AppResult<DeleteOutcome<GenreDeleteView>> {
        let (genre, genre_books) = tokio::try_join!(
            self.repository.genres.find(id),
            self.repository.books.find_by_genre(id),
        )?;
        let Some(genre) = genre else {
            return Ok(DeleteOutcome::AlreadyGone);
        };
        if !genre_books.is_empty() {
            return Ok(DeleteOutcome::Blocked(GenreDeleteView { genre, genre_books }));
        }
        self.repository.genres.delete(id).await?;
        Ok(DeleteOutcome::Deleted)
    }
}

/// Run the genre rule table and return the sanitized name
fn validate(form: &GenreForm) -> (String, Vec<FieldMessage>) {
    let name = forms::text(&form.name);
    let errors = forms::check_fields(GENRE_RULES, &[("name", name)]);
    (forms::escape(name), errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_required() {
        let (_, errors) = validate(&GenreForm { name: None });
        assert_eq!(errors, vec![FieldMessage::new("name", "Genre name required")]);
    }

    #[test]
    fn short_name_is_rejected() {
        let (_, errors) = validate(&GenreForm {
            name: Some("SF".to_string()),
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Genre name must contain at least 3 characters");
    }

    #[test]
    fn valid_name_is_trimmed_and_escaped() {
        let (name, errors) = validate(&GenreForm {
            name: Some("  Sword & Sorcery ".to_string()),
        });
        assert!(errors.is_empty());
        assert_eq!(name, "Sword &amp; Sorcery");
    }
}
