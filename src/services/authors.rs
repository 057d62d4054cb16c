//! Author management service

use uuid::Uuid;

use crate::{
    api::authors::{AuthorDeleteView, AuthorDetailView, AuthorFormValues, AuthorFormView},
    error::AppResult,
    forms::{self, FieldMessage},
    models::author::{Author, AuthorForm, AuthorInput, AUTHOR_RULES},
    repository::Repository,
    services::{DeleteOutcome, Submission},
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all authors sorted by family name
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Author detail: the author and their books, fetched concurrently
    pub async fn author_detail(&self, id: Uuid) -> AppResult<AuthorDetailView> {
        let (author, author_books) = tokio::try_join!(
            self.repository.authors.get(id),
            self.repository.books.find_by_author(id),
        )?;
        Ok(AuthorDetailView {
            author,
            author_books,
        })
    }

    /// Validate and persist a new author
    pub async fn create_author(
        &self,
        form: AuthorForm,
    ) -> AppResult<Submission<AuthorFormView>> {
        let (input, errors) = validate(&form);
        if !errors.is_empty() {
            return Ok(Submission::Rejected(AuthorFormView {
                author: Some(AuthorFormValues::from_input(&input)),
                errors,
            }));
        }
        let author = self.repository.authors.create(&input).await?;
        Ok(Submission::Accepted(author.id))
    }

    /// Update form prefilled from the existing record; 404 when unresolved
    pub async fn update_form(&self, id: Uuid) -> AppResult<AuthorFormView> {
        let author = self.repository.authors.get(id).await?;
        Ok(AuthorFormView {
            author: Some(AuthorFormValues::from_author(&author)),
            errors: Vec::new(),
        })
    }

    /// Validate and persist an update, keeping the identifier
    pub async fn update_author(
        &self,
        id: Uuid,
        form: AuthorForm,
    ) -> AppResult<Submission<AuthorFormView>> {
        let (input, errors) = validate(&form);
        if !errors.is_empty() {
            return Ok(Submission::Rejected(AuthorFormView {
                author: Some(AuthorFormValues::from_input(&input)),
                errors,
            }));
        }
        let author = self.repository.authors.update(id, &input).await?;
        Ok(Submission::Accepted(author.id))
    }

    /// Delete confirmation data; None when the author no longer exists
    pub async fn delete_view(&self, id: Uuid) -> AppResult<Option<AuthorDeleteView>> {
        let (author, author_books) = tokio::try_join!(
            self.repository.authors.find(id),
            self.repository.books.find_by_author(id),
        )?;
        Ok(author.map(|author| AuthorDeleteView {
            author,
            author_books,
        }))
    }

    /// Delete the author unless books still reference them
    pub async fn delete_author(&self, id: Uuid) -> AppResult<DeleteOutcome<AuthorDeleteView>> {
        let (author, author_books) = tokio::try_join!(
            self.repository.authors.find(id),
            self.repository.books.find_by_author(id),
        )?;
        let Some(author) = author else {
            return Ok(DeleteOutcome::AlreadyGone);
        };
        if !author_books.is_empty() {
            return Ok(DeleteOutcome::Blocked(AuthorDeleteView {
                author,
                author_books,
            }));
        }
        self.repository.authors.delete(id).await?;
        Ok(DeleteOutcome::Deleted)
    }
}

/// Run the author rule table and assemble sanitized input
fn validate(form: &AuthorForm) -> (AuthorInput, Vec<FieldMessage>) {
    let first_name = forms::text(&form.first_name);
    let family_name = forms::text(&form.family_name);

    let mut errors = forms::check_fields(
        AUTHOR_RULES,
        &[("first_name", first_name), ("family_name", family_name)],
    );

    let date_of_birth = forms::parse_optional_date(&form.date_of_birth).unwrap_or_else(|_| {
        errors.push(FieldMessage::new("date_of_birth", "Invalid date of birth"));
        None
    });
    let date_of_death = forms::parse_optional_date(&form.date_of_death).unwrap_or_else(|_| {
        errors.push(FieldMessage::new("date_of_death", "Invalid date of death"));
        None
    });

    let input = AuthorInput {
        first_name: forms::escape(first_name),
        family_name: forms::escape(family_name),
        date_of_birth,
        date_of_death,
    };
    (input, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_first_name_keeps_family_name_for_redisplay() {
        let form = AuthorForm {
            first_name: Some(String::new()),
            family_name: Some("Doe".to_string()),
            ..Default::default()
        };
        let (input, errors) = validate(&form);
        assert_eq!(errors, vec![FieldMessage::new("first_name", "First name must be specified")]);
        assert_eq!(input.family_name, "Doe");
    }

    #[test]
    fn valid_form_sanitizes_and_parses_dates() {
        let form = AuthorForm {
            first_name: Some(" Jorge ".to_string()),
            family_name: Some("Borges".to_string()),
            date_of_birth: Some("1899-08-24".to_string()),
            date_of_death: Some(String::new()),
        };
        let (input, errors) = validate(&form);
        assert!(errors.is_empty());
        assert_eq!(input.first_name, "Jorge");
        assert_eq!(
            input.date_of_birth,
            chrono::NaiveDate::from_ymd_opt(1899, 8, 24)
        );
        assert_eq!(input.date_of_death, None);
    }

    #[test]
    fn malformed_date_is_a_field_message() {
        let form = AuthorForm {
            first_name: Some("Jane".to_string()),
            family_name: Some("Doe".to_string()),
            date_of_birth: Some("24/08/1899".to_string()),
            ..Default::default()
        };
        let (_, errors) = validate(&form);
        assert_eq!(errors, vec![FieldMessage::new("date_of_birth", "Invalid date of birth")]);
    }
}
