//! Form field sanitation and validation.
//!
//! Submitted fields arrive as flat optional strings. Each resource declares
//! an ordered table of [`Rule`]s; every rule yields at most one user-facing
//! [`FieldMessage`]. Processing order per field: trim, run the checks on the
//! trimmed value, then escape markup-significant characters for storage and
//! redisplay.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user-facing validation message attached to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}

impl FieldMessage {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// A predicate evaluated against a trimmed field value.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// Non-empty after trimming
    Required,
    /// Only alphanumeric characters; vacuously true for an empty value so
    /// that a missing required field reports its `Required` message alone
    Alphanumeric,
    /// At least this many characters; vacuously true for an empty value
    /// (emptiness is `Required`'s message)
    MinLen(usize),
    /// At most this many characters
    MaxLen(usize),
}

impl Check {
    pub fn passes(&self, value: &str) -> bool {
        match self {
            Check::Required => !value.is_empty(),
            Check::Alphanumeric => value.chars().all(char::is_alphanumeric),
            Check::MinLen(min) => value.is_empty() || value.chars().count() >= *min,
            Check::MaxLen(max) => value.chars().count() <= *max,
        }
    }
}

/// One entry of a resource's validation table.
pub struct Rule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

/// Evaluate a rule table in order against trimmed `(field, value)` pairs.
/// A field with no submitted value is checked as the empty string.
pub fn check_fields(rules: &[Rule], fields: &[(&str, &str)]) -> Vec<FieldMessage> {
    rules
        .iter()
        .filter_map(|rule| {
            let value = fields
                .iter()
                .find(|(name, _)| *name == rule.field)
                .map(|(_, value)| *value)
                .unwrap_or("");
            (!rule.check.passes(value)).then(|| FieldMessage::new(rule.field, rule.message))
        })
        .collect()
}

/// Trimmed view of an optional submitted field.
pub fn text(raw: &Option<String>) -> &str {
    raw.as_deref().map(str::trim).unwrap_or("")
}

/// Escape markup-significant characters for safe redisplay.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            c => out.push(c),
        }
    }
    out
}

/// Parse an optional ISO-8601 calendar date field.
/// Absent or empty means unset; anything else must parse.
pub fn parse_optional_date(raw: &Option<String>) -> Result<Option<NaiveDate>, ()> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ()),
    }
}

/// A form field submitted as either a single value or a repeated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Normalize an optional one-or-many field to an ordered list:
/// absent becomes empty, a single value becomes a one-element list.
pub fn normalize_multi(value: Option<OneOrMany>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(OneOrMany::One(v)) => vec![v],
        Some(OneOrMany::Many(vs)) => vs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[Rule] = &[
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
    ];

    #[test]
    fn missing_required_field_reports_single_message() {
        let messages = check_fields(RULES, &[("first_name", ""), ("family_name", "Doe")]);
        assert_eq!(
            messages,
            vec![FieldMessage::new("first_name", "First name must be specified")]
        );
    }

    #[test]
    fn non_alphanumeric_value_is_rejected() {
        let messages = check_fields(RULES, &[("first_name", "Jane!"), ("family_name", "Doe")]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "First name has non-alphanumeric characters");
    }

    #[test]
    fn unsubmitted_field_is_checked_as_empty() {
        let messages = check_fields(RULES, &[("first_name", "Jane")]);
        assert_eq!(
            messages,
            vec![FieldMessage::new("family_name", "Family name must be specified")]
        );
    }

    #[test]
    fn length_checks_count_characters() {
        assert!(Check::MinLen(3).passes("abc"));
        assert!(!Check::MinLen(3).passes("ab"));
        assert!(Check::MinLen(3).passes(""));
        assert!(Check::MaxLen(5).passes("abcde"));
        assert!(!Check::MaxLen(5).passes("abcdef"));
    }

    #[test]
    fn escape_replaces_markup_characters() {
        assert_eq!(escape("a&b"), "a&amp;b");
        assert_eq!(escape("<b>\"x\"</b>"), "&lt;b&gt;&quot;x&quot;&lt;&#x2F;b&gt;");
        assert_eq!(escape("O'Hara"), "O&#x27;Hara");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn text_trims_and_defaults_empty() {
        assert_eq!(text(&Some("  Doe ".to_string())), "Doe");
        assert_eq!(text(&None), "");
    }

    #[test]
    fn optional_date_parsing() {
        assert_eq!(parse_optional_date(&None), Ok(None));
        assert_eq!(parse_optional_date(&Some(String::new())), Ok(None));
        assert_eq!(
            parse_optional_date(&Some("1965-07-01".to_string())),
            Ok(NaiveDate::from_ymd_opt(1965, 7, 1))
        );
        assert_eq!(parse_optional_date(&Some("not-a-date".to_string())), Err(()));
    }

    #[test]
    fn multi_value_normalization() {
        assert!(normalize_multi(None).is_empty());
        assert_eq!(
            normalize_multi(Some(OneOrMany::One("fantasy".into()))),
            vec!["fantasy".to_string()]
        );
        assert_eq!(
            normalize_multi(Some(OneOrMany::Many(vec!["a".into(), "b".into()]))),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
