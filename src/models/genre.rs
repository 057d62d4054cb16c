//! Genre model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::forms::{Check, Rule};

/// Full genre model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Raw genre form submission
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct GenreForm {
    pub name: Option<String>,
}

/// Validation table for genre submissions
pub const GENRE_RULES: &[Rule] = &[
    Rule {
        field: "name",
        check: Check::Required,
        message: "Genre name required",
    },
    Rule {
        field: "name",
        check: Check::MinLen(3),
        message: "Genre name must contain at least 3 characters",
    },
    Rule {
        field: "name",
        check: Check::MaxLen(100),
        message: "Genre name must not exceed 100 characters",
    },
];
