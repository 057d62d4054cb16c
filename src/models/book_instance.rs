//! BookInstance (physical copy) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::book::Book;
use crate::forms::{Check, Rule};

/// Loan status of a physical copy. Persisted as its text representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum InstanceStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        }
    }

    /// Parse the submitted status value; unknown values are rejected
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(InstanceStatus::Available),
            "Maintenance" => Some(InstanceStatus::Maintenance),
            "Loaned" => Some(InstanceStatus::Loaned),
            "Reserved" => Some(InstanceStatus::Reserved),
            _ => None,
        }
    }
}

impl Default for InstanceStatus {
    fn default() -> Self {
        InstanceStatus::Maintenance
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full book-instance model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: String,
    pub due_back: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    // Relation (loaded separately; a dangling book reference stays None)
    #[sqlx(skip)]
    #[serde(default)]
    pub book: Option<Book>,
}

/// Book-instance row for list views with the book title resolved.
/// A dangling reference shows a null title.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InstanceListRow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_title: Option<String>,
    pub imprint: String,
    pub status: String,
    pub due_back: NaiveDate,
}

/// Raw book-instance form submission
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct BookInstanceForm {
    pub book: Option<String>,
    pub imprint: Option<String>,
    pub status: Option<String>,
    pub due_back: Option<String>,
}

/// Sanitized book-instance fields ready for persistence
#[derive(Debug, Clone)]
pub struct BookInstanceInput {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: InstanceStatus,
    /// Defaults to the creation date when the form leaves it unset
    pub due_back: Option<NaiveDate>,
}

/// Validation table for book-instance submissions
pub const BOOK_INSTANCE_RULES: &[Rule] = &[
    Rule {
        field: "book",
        check: Check::Required,
        message: "Book must be specified",
    },
    Rule {
        field: "imprint",
        check: Check::Required,
        message: "Imprint must be specified",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_maintenance() {
        assert_eq!(InstanceStatus::default(), InstanceStatus::Maintenance);
    }

    #[test]
    fn status_parses_known_values_only() {
        assert_eq!(InstanceStatus::parse("Available"), Some(InstanceStatus::Available));
        assert_eq!(InstanceStatus::parse("Loaned"), Some(InstanceStatus::Loaned));
        assert_eq!(InstanceStatus::parse("available"), None);
        assert_eq!(InstanceStatus::parse("Lost"), None);
    }
}
