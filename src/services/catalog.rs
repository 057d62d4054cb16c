//! Catalog service: books and their physical copies

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    api::books::{BookDeleteView, BookDetailView, BookFormValues, BookFormView, GenreChoice},
    api::book_instances::{InstanceDeleteView, InstanceFormValues, InstanceFormView},
    error::AppResult,
    forms::{self, FieldMessage},
    models::{
        book::{BookForm, BookInput, BookListRow, BOOK_RULES},
        book_instance::{
            BookInstance, BookInstanceForm, BookInstanceInput, InstanceListRow, InstanceStatus,
            BOOK_INSTANCE_RULES,
        },
    },
    repository::Repository,
    services::{DeleteOutcome, Submission},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// List all books sorted by title
    pub async fn book_list(&self) -> AppResult<Vec<BookListRow>> {
        self.repository.books.list().await
    }

    /// Book detail: the book and its copies fetched concurrently, then the
    /// author and genre references resolved and attached. Dangling references
    /// attach as null.
    pub async fn book_detail(&self, id: Uuid) -> AppResult<BookDetailView> {
        let (mut book, book_instances) = tokio::try_join!(
            self.repository.books.get(id),
            self.repository.book_instances.find_by_book(id),
        )?;
        let (author, genres) = tokio::try_join!(
            self.repository.authors.find(book.author_id),
            self.repository.genres.by_ids(&book.genre_ids),
        )?;
        book.author = author;
        book.genres = genres;
        Ok(BookDetailView {
            book,
            book_instances,
        })
    }

    /// Empty book form with its reference data
    pub async fn book_form(&self) -> AppResult<BookFormView> {
        self.book_form_view(None, &[], Vec::new()).await
    }

    /// Validate and persist a new book
    pub async fn create_book(&self, form: BookForm) -> AppResult<Submission<BookFormView>> {
        let v = validate_book(&form);
        if let (true, Some(author_id)) = (v.errors.is_empty(), v.author_id) {
            let input = BookInput {
                title: v.values.title.clone(),
                summary: v.values.summary.clone(),
                isbn: v.values.isbn.clone(),
                author_id,
                genre_ids: v.genre_ids,
            };
            let book = self.repository.books.create(&input).await?;
            return Ok(Submission::Accepted(book.id));
        }
        let view = self
            .book_form_view(Some(v.values), &v.genre_ids, v.errors)
            .await?;
        Ok(Submission::Rejected(view))
    }

    /// Update form prefilled from the existing record; 404 when unresolved
    pub async fn book_update_form(&self, id: Uuid) -> AppResult<BookFormView> {
        let (book, authors, genres) = tokio::try_join!(
            self.repository.books.get(id),
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;
        let values = BookFormValues {
            title: book.title.clone(),
            author: book.author_id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre_ids.iter().map(ToString::to_string).collect(),
        };
        let genres = genres
            .into_iter()
            .map(|g| GenreChoice {
                checked: book.genre_ids.contains(&g.id),
                id: g.id,
                name: g.name,
            })
            .collect();
        Ok(BookFormView {
            authors,
            genres,
            book: Some(values),
            errors: Vec::new(),
        })
    }

    /// Validate and persist an update, keeping the identifier
    pub async fn update_book(
        &self,
        id: Uuid,
        form: BookForm,
    ) -> AppResult<Submission<BookFormView>> {
        let v = validate_book(&form);
        if let (true, Some(author_id)) = (v.errors.is_empty(), v.author_id) {
            let input = BookInput {
                title: v.values.title.clone(),
                summary: v.values.summary.clone(),
                isbn: v.values.isbn.clone(),
                author_id,
                genre_ids: v.genre_ids,
            };
            let book = self.repository.books.update(id, &input).await?;
            return Ok(Submission::Accepted(book.id));
        }
        let view = self
            .book_form_view(Some(v.values), &v.genre_ids, v.errors)
            .await?;
        Ok(Submission::Rejected(view))
    }

    /// Delete confirmation data; None when the book no longer exists
    pub async fn book_delete_view(&self, id: Uuid) -> AppResult<Option<BookDeleteView>> {
        let (book, book_instances) = tokio::try_join!(
            self.repository.books.find(id),
            self.repository.book_instances.find_by_book(id),
        )?;
        Ok(book.map(|book| BookDeleteView {
            book,
            book_instances,
        }))
    }

    /// Delete the book unless copies still reference it
    pub async fn delete_book(&self, id: Uuid) -> AppResult<DeleteOutcome<BookDeleteView>> {
        let (book, book_instances) = tokio::try_join!(
            self.repository.books.find(id),
            self.repository.book_instances.find_by_book(id),
        )?;
        let Some(book) = book else {
            return Ok(DeleteOutcome::AlreadyGone);
        };
        if !book_instances.is_empty() {
            return Ok(DeleteOutcome::Blocked(BookDeleteView {
                book,
                book_instances,
            }));
        }
        self.repository.books.delete(id).await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Reference data is always re-fetched before the form renders,
    /// validation outcome or not
    async fn book_form_view(
        &self,
        book: Option<BookFormValues>,
        selected_genres: &[Uuid],
        errors: Vec<FieldMessage>,
    ) -> AppResult<BookFormView> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;
        let genres = genres
            .into_iter()
            .map(|g| GenreChoice {
                checked: selected_genres.contains(&g.id),
                id: g.id,
                name: g.name,
            })
            .collect();
        Ok(BookFormView {
            authors,
            genres,
            book,
            errors,
        })
    }

    // =========================================================================
    // Book instances
    // =========================================================================

    /// List all copies with their book titles
    pub async fn instance_list(&self) -> AppResult<Vec<InstanceListRow>> {
        self.repository.book_instances.list().await
    }

    /// Copy detail with the book reference resolved (null when dangling)
    pub async fn instance_detail(&self, id: Uuid) -> AppResult<BookInstance> {
        let mut instance = self.repository.book_instances.get(id).await?;
        instance.book = self.repository.books.find(instance.book_id).await?;
        Ok(instance)
    }

    /// Empty copy form with the book selection list
    pub async fn instance_form(&self) -> AppResult<InstanceFormView> {
        let book_list = self.repository.books.titles().await?;
        Ok(InstanceFormView {
            book_list,
            selected_book: None,
            bookinstance: None,
            errors: Vec::new(),
        })
    }

    /// Validate and persist a new copy
    pub async fn create_instance(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<Submission<InstanceFormView>> {
        let v = validate_instance(&form);
        if let (true, Some(book_id)) = (v.errors.is_empty(), v.book_id) {
            let input = BookInstanceInput {
                book_id,
                imprint: v.values.imprint.clone(),
                status: v.status,
                due_back: v.due_back,
            };
            let instance = self.repository.book_instances.create(&input).await?;
            return Ok(Submission::Accepted(instance.id));
        }
        let book_list = self.repository.books.titles().await?;
        Ok(Submission::Rejected(InstanceFormView {
            book_list,
            selected_book: v.book_id,
            bookinstance: Some(v.values),
            errors: v.errors,
        }))
    }

    /// Update form prefilled from the existing record; 404 when unresolved
    pub async fn instance_update_form(&self, id: Uuid) -> AppResult<InstanceFormView> {
        let (instance, book_list) = tokio::try_join!(
            self.repository.book_instances.get(id),
            self.repository.books.titles(),
        )?;
        let values = InstanceFormValues {
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.clone(),
            due_back: Some(instance.due_back.format("%Y-%m-%d").to_string()),
        };
        Ok(InstanceFormView {
            book_list,
            selected_book: Some(instance.book_id),
            bookinstance: Some(values),
            errors: Vec::new(),
        })
    }

    /// Validate and persist an update, keeping the identifier
    pub async fn update_instance(
        &self,
        id: Uuid,
        form: BookInstanceForm,
    ) -> AppResult<Submission<InstanceFormView>> {
        let v = validate_instance(&form);
        if let (true, Some(book_id)) = (v.errors.is_empty(), v.book_id) {
            let input = BookInstanceInput {
                book_id,
                imprint: v.values.imprint.clone(),
                status: v.status,
                due_back: v.due_back,
            };
            let instance = self.repository.book_instances.update(id, &input).await?;
            return Ok(Submission::Accepted(instance.id));
        }
        let book_list = self.repository.books.titles().await?;
        Ok(Submission::Rejected(InstanceFormView {
            book_list,
            selected_book: v.book_id,
            bookinstance: Some(v.values),
            errors: v.errors,
        }))
    }

    /// Delete confirmation data; None when the copy no longer exists
    pub async fn instance_delete_view(&self, id: Uuid) -> AppResult<Option<InstanceDeleteView>> {
        let instance = self.repository.book_instances.find(id).await?;
        Ok(instance.map(|book_instance| InstanceDeleteView { book_instance }))
    }

    /// Delete a copy. Copies have no dependents, so an existing record
    /// always deletes.
    pub async fn delete_instance(&self, id: Uuid) -> AppResult<DeleteOutcome<InstanceDeleteView>> {
        let Some(_) = self.repository.book_instances.find(id).await? else {
            return Ok(DeleteOutcome::AlreadyGone);
        };
        self.repository.book_instances.delete(id).await?;
        Ok(DeleteOutcome::Deleted)
    }
}

struct BookValidation {
    values: BookFormValues,
    author_id: Option<Uuid>,
    genre_ids: Vec<Uuid>,
    errors: Vec<FieldMessage>,
}

/// Run the book rule table, normalize the genre selection and parse references
fn validate_book(form: &BookForm) -> BookValidation {
    let title = forms::text(&form.title);
    let author = forms::text(&form.author);
    let summary = forms::text(&form.summary);
    let isbn = forms::text(&form.isbn);
    let genre_raw: Vec<String> = forms::normalize_multi(form.genre.clone())
        .iter()
        .map(|g| g.trim().to_string())
        .collect();

    let mut errors = forms::check_fields(
        BOOK_RULES,
        &[
            ("title", title),
            ("author", author),
            ("summary", summary),
            ("isbn", isbn),
        ],
    );

    let author_id = if author.is_empty() {
        None
    } else {
        match Uuid::parse_str(author) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldMessage::new("author", "Invalid author reference"));
                None
            }
        }
    };

    let mut genre_ids = Vec::with_capacity(genre_raw.len());
    for raw in &genre_raw {
        if raw.is_empty() {
            continue;
        }
        match Uuid::parse_str(raw) {
            Ok(id) => genre_ids.push(id),
            Err(_) => errors.push(FieldMessage::new("genre", "Invalid genre reference")),
        }
    }

    BookValidation {
        values: BookFormValues {
            title: forms::escape(title),
            author: forms::escape(author),
            summary: forms::escape(summary),
            isbn: forms::escape(isbn),
            genre: genre_raw.iter().map(|g| forms::escape(g)).collect(),
        },
        author_id,
        genre_ids,
        errors,
    }
}

struct InstanceValidation {
    values: InstanceFormValues,
    book_id: Option<Uuid>,
    status: InstanceStatus,
    due_back: Option<NaiveDate>,
    errors: Vec<FieldMessage>,
}

/// Run the copy rule table and parse the book reference, status and date
fn validate_instance(form: &BookInstanceForm) -> InstanceValidation {
    let book = forms::text(&form.book);
    let imprint = forms::text(&form.imprint);
    let status_raw = forms::text(&form.status);
    let due_raw = forms::text(&form.due_back);

    let mut errors = forms::check_fields(
        BOOK_INSTANCE_RULES,
        &[("book", book), ("imprint", imprint)],
    );

    let book_id = if book.is_empty() {
        None
    } else {
        match Uuid::parse_str(book) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldMessage::new("book", "Invalid book reference"));
                None
            }
        }
    };

    let status = if status_raw.is_empty() {
        InstanceStatus::default()
    } else {
        match InstanceStatus::parse(status_raw) {
            Some(status) => status,
            None => {
                errors.push(FieldMessage::new("status", "Invalid status"));
                InstanceStatus::default()
            }
        }
    };

    let due_back = forms::parse_optional_date(&form.due_back).unwrap_or_else(|_| {
        errors.push(FieldMessage::new("due_back", "Invalid date"));
        None
    });

    InstanceValidation {
        values: InstanceFormValues {
            book: forms::escape(book),
            imprint: forms::escape(imprint),
            status: forms::escape(status_raw),
            due_back: (!due_raw.is_empty()).then(|| forms::escape(due_raw)),
        },
        book_id,
        status,
        due_back,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::OneOrMany;

    #[test]
    fn book_validation_collects_required_messages() {
        let v = validate_book(&BookForm::default());
        let messages: Vec<&str> = v.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Title must not be empty.",
                "Author must not be empty.",
                "Summary must not be empty.",
                "ISBN must not be empty.",
            ]
        );
        assert!(v.author_id.is_none());
    }

    #[test]
    fn book_genre_selection_preserves_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let form = BookForm {
            title: Some("Dune".into()),
            author: Some(Uuid::new_v4().to_string()),
            summary: Some("Sand.".into()),
            isbn: Some("9780441013593".into()),
            genre: Some(OneOrMany::Many(vec![b.to_string(), a.to_string()])),
        };
        let v = validate_book(&form);
        assert!(v.errors.is_empty());
        assert_eq!(v.genre_ids, vec![b, a]);
    }

    #[test]
    fn book_single_genre_becomes_one_element_list() {
        let g = Uuid::new_v4();
        let form = BookForm {
            genre: Some(OneOrMany::One(g.to_string())),
            ..Default::default()
        };
        let v = validate_book(&form);
        assert_eq!(v.genre_ids, vec![g]);
    }

    #[test]
    fn malformed_author_reference_is_a_field_message() {
        let form = BookForm {
            title: Some("Dune".into()),
            author: Some("not-an-id".into()),
            summary: Some("Sand.".into()),
            isbn: Some("9780441013593".into()),
            genre: None,
        };
        let v = validate_book(&form);
        assert_eq!(v.errors.len(), 1);
        assert_eq!(v.errors[0].message, "Invalid author reference");
    }

    #[test]
    fn instance_status_defaults_and_rejects_unknown() {
        let form = BookInstanceForm {
            book: Some(Uuid::new_v4().to_string()),
            imprint: Some("First edition".into()),
            status: None,
            due_back: None,
        };
        let v = validate_instance(&form);
        assert!(v.errors.is_empty());
        assert_eq!(v.status, InstanceStatus::Maintenance);
        assert_eq!(v.due_back, None);

        let form = BookInstanceForm {
            status: Some("Lost".into()),
            ..form
        };
        let v = validate_instance(&form);
        assert_eq!(v.errors[0].message, "Invalid status");
    }
}
