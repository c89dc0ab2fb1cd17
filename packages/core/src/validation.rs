// ABOUTME: Field-level validation rules for articles and tags
// ABOUTME: Collects per-field rule violations into a map that serialises into API error envelopes

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// Maximum length (in characters) of short text fields such as titles and names
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length (in characters) of an article description
pub const MAX_DESCRIPTION_LENGTH: usize = 65_535;

/// Expected wire format of `publish_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rule violations keyed by field, then by rule name
///
/// Serialises as `{ "title": { "_empty": "..." } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, BTreeMap<String, String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violated rule for a field
    pub fn add(&mut self, field: impl Into<String>, rule: &str, message: impl Into<String>) {
        self.0
            .entry(field.into())
            .or_default()
            .insert(rule.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one violation
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Rules violated by a single field
    pub fn field(&self, field: &str) -> Option<&BTreeMap<String, String>> {
        self.0.get(field)
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

fn check_max_length(field: &str, value: &str, max: usize, errors: &mut ValidationErrors) {
    let length = value.chars().count();
    if length > max {
        errors.add(
            field,
            "maxLength",
            format!(
                "The provided value exceeds the maximum length of {} characters (got {})",
                max, length
            ),
        );
    }
}

/// Validate an article title
///
/// `required` is set on create, where the field must be present.
pub fn validate_title(value: Option<&str>, required: bool, errors: &mut ValidationErrors) {
    match value {
        None if required => errors.add("title", "_required", "This field is required"),
        None => {}
        Some(title) if title.trim().is_empty() => {
            errors.add("title", "_empty", "This field cannot be left empty")
        }
        Some(title) => check_max_length("title", title, MAX_NAME_LENGTH, errors),
    }
}

pub fn validate_description(value: Option<&str>, errors: &mut ValidationErrors) {
    if let Some(description) = value {
        check_max_length("description", description, MAX_DESCRIPTION_LENGTH, errors);
    }
}

pub fn validate_author_name(value: Option<&str>, errors: &mut ValidationErrors) {
    if let Some(author_name) = value {
        check_max_length("author_name", author_name, MAX_NAME_LENGTH, errors);
    }
}

/// Parse a `YYYY-MM-DD` publish date
///
/// An empty string clears the date. Unparseable input is recorded and yields `None`.
pub fn validate_publish_date(value: &str, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(
                "publish_date",
                "date",
                "The provided value must be a date in YYYY-MM-DD format",
            );
            None
        }
    }
}

/// Validate a requested tag name at position `index` of the request's tag list
///
/// Names are matched exactly, so they are checked but never rewritten.
pub fn validate_tag_name(index: usize, name: &str, errors: &mut ValidationErrors) {
    let field = format!("tags.{}.name", index);

    if name.trim().is_empty() {
        errors.add(field, "_empty", "This field cannot be left empty");
        return;
    }

    if name.contains('\0') {
        errors.add(field.clone(), "invalid", "Tag name contains invalid null bytes");
    }

    check_max_length(&field, name, MAX_NAME_LENGTH, errors);
}
