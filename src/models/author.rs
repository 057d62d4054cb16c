//! Author model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::forms::{Check, Rule};

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Author {
    /// Display name in "family name, first name" form
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }
}

/// Raw author form submission
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AuthorForm {
    pub first_name: Option<String>,
    pub family_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
}

/// Sanitized author fields ready for persistence
#[derive(Debug, Clone)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Validation table for author submissions
pub const AUTHOR_RULES: &[Rule] = &[
    Rule {
        field: "first_name",
        check: Check::Required,
        message: "First name must be specified",
    },
    Rule {
        field: "first_name",
        check: Check::Alphanumeric,
        message: "First name has non-alphanumeric characters",
    },
    Rule {
        field: "family_name",
        check: Check::Required,
        message: "Family name must be specified",
    },
    Rule {
        field: "family_name",
        check: Check::Alphanumeric,
        message: "Family name has non-alphanumeric characters",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_family_name_first() {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: "Ursula".into(),
            family_name: "LeGuin".into(),
            date_of_birth: None,
            date_of_death: None,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(author.display_name(), "LeGuin, Ursula");
    }
}
