//! Book instances (physical copies) repository

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, BookInstanceInput, InstanceListRow, InstanceStatus},
};

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all copies with the book title resolved
    pub async fn list(&self) -> AppResult<Vec<InstanceListRow>> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.book_id, i.imprint, i.status, i.due_back, b.title
            FROM book_instances i
            LEFT JOIN books b ON i.book_id = b.id
            ORDER BY b.title, i.imprint
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| InstanceListRow {
                id: row.get("id"),
                book_id: row.get("book_id"),
                book_title: row.get("title"),
                imprint: row.get("imprint"),
                status: row.get("status"),
                due_back: row.get("due_back"),
            })
            .collect())
    }

    /// Get copy by ID. The book relation is attached separately.
    pub async fn get(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    /// Look up a copy that may not exist
    pub async fn find(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let instance =
            sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(instance)
    }

    /// Copies referencing the given book
    pub async fn find_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>(
            "SELECT * FROM book_instances WHERE book_id = $1 ORDER BY imprint",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a new copy with a freshly assigned identifier.
    /// An unset due-back date defaults to the creation date.
    pub async fn create(&self, input: &BookInstanceInput) -> AppResult<BookInstance> {
        let due_back = input.due_back.unwrap_or_else(|| Utc::now().date_naive());
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.book_id)
        .bind(&input.imprint)
        .bind(input.status.as_str())
        .bind(due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an existing copy, keeping its identifier
    pub async fn update(&self, id: Uuid, input: &BookInstanceInput) -> AppResult<BookInstance> {
        let due_back = input.due_back.unwrap_or_else(|| Utc::now().date_naive());
        sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET book_id = $1, imprint = $2, status = $3, due_back = $4, updated_at = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(input.book_id)
        .bind(&input.imprint)
        .bind(input.status.as_str())
        .bind(due_back)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    /// Delete a copy. Deleting an unknown identifier is a no-op.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count copies in the given status
    pub async fn count_by_status(&self, status: InstanceStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
