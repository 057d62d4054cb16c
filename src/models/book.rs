//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{author::Author, genre::Genre};
use crate::forms::{Check, OneOrMany, Rule};

/// Full book model (DB + API). The author and genre lists are reference
/// columns; the resolved records are loaded separately and attached.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Uuid,
    /// Genre references in submission order
    pub genre_ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    // Relations (loaded separately; a dangling author reference stays None)
    #[sqlx(skip)]
    #[serde(default)]
    pub author: Option<Author>,
    #[sqlx(skip)]
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Short book representation for dependent listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
}

/// Book row for list views with the author reference resolved.
/// A dangling reference shows a null author.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookListRow {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
}

/// Identifier and title only, for selection lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookTitle {
    pub id: Uuid,
    pub title: String,
}

/// Raw book form submission. The genre field accepts a single value, a
/// list, or nothing at all; it is normalized to an ordered list before
/// validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub genre: Option<OneOrMany>,
}

/// Sanitized book fields ready for persistence
#[derive(Debug, Clone)]
pub struct BookInput {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Uuid,
    pub genre_ids: Vec<Uuid>,
}

/// Validation table for book submissions
pub const BOOK_RULES: &[Rule] = &[
    Rule {
        field: "title",
        check: Check::Required,
        message: "Title must not be empty.",
    },
    Rule {
        field: "author",
        check: Check::Required,
        message: "Author must not be empty.",
    },
    Rule {
        field: "summary",
        check: Check::Required,
        message: "Summary must not be empty.",
    },
    Rule {
        field: "isbn",
        check: Check::Required,
        message: "ISBN must not be empty.",
    },
];
