//! Books repository

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput, BookListRow, BookSummary, BookTitle},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books sorted by title, with the author name resolved
    pub async fn list(&self) -> AppResult<Vec<BookListRow>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.title, a.first_name, a.family_name
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.id
            ORDER BY b.title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let first_name: Option<String> = row.get("first_name");
                let family_name: Option<String> = row.get("family_name");
                let author = match (family_name, first_name) {
                    (Some(family), Some(first)) => Some(format!("{}, {}", family, first)),
                    _ => None,
                };
                BookListRow {
                    id: row.get("id"),
                    title: row.get("title"),
                    author,
                }
            })
            .collect())
    }

    /// List identifier and title of every book, for selection lists
    pub async fn titles(&self) -> AppResult<Vec<BookTitle>> {
        let rows = sqlx::query_as::<_, BookTitle>("SELECT id, title FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID. Relations are attached separately.
    pub async fn get(&self, id: Uuid) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Look up a book that may not exist
    pub async fn find(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// Books referencing the given author
    pub async fn find_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books WHERE author_id = $1 ORDER BY title",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Books referencing the given genre
    pub async fn find_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books WHERE $1 = ANY(genre_ids) ORDER BY title",
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a new book with a freshly assigned identifier
    pub async fn create(&self, input: &BookInput) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, summary, isbn, author_id, genre_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.isbn)
        .bind(input.author_id)
        .bind(&input.genre_ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an existing book, keeping its identifier
    pub async fn update(&self, id: Uuid, input: &BookInput) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, summary = $2, isbn = $3, author_id = $4,
                genre_ids = $5, updated_at = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.isbn)
        .bind(input.author_id)
        .bind(&input.genre_ids)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Delete a book. Deleting an unknown identifier is a no-op.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
