// ABOUTME: Article type definitions and request payloads
// ABOUTME: Payload validation turns raw input into checked field values before anything is persisted

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use gazette_core::{
    validate_author_name, validate_description, validate_publish_date, validate_title,
    ValidationErrors,
};
use gazette_tags::Tag;

use crate::tag_sync::validate_tag_names;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

impl Article {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.name.as_str()).collect()
    }
}

/// Listing entry: the article plus the number of relation rows it owns
#[derive(Debug, Clone, Serialize)]
pub struct ArticleListItem {
    #[serde(flatten)]
    pub article: Article,
    pub count_tags: i64,
}

/// Request payload for creating an article
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleCreateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub publish_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request payload for updating an article
///
/// Scalar fields are patched only when present; `null` clears a nullable
/// field. `tags` always replaces the article's tag set, and an absent list
/// counts as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleUpdateInput {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub author_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub publish_date: Option<Option<String>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing key (`None`)
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Checked values for a new article row
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewArticle {
    pub title: String,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub publish_date: Option<NaiveDate>,
}

/// Checked changes for an existing article row
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ArticleChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub author_name: Option<Option<String>>,
    pub publish_date: Option<Option<NaiveDate>>,
}

impl ArticleCreateInput {
    pub(crate) fn validate(&self) -> Result<NewArticle, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_title(self.title.as_deref(), true, &mut errors);
        validate_description(self.description.as_deref(), &mut errors);
        validate_author_name(self.author_name.as_deref(), &mut errors);
        let publish_date = self
            .publish_date
            .as_deref()
            .and_then(|date| validate_publish_date(date, &mut errors));
        validate_tag_names(&self.tags, &mut errors);

        errors.into_result(NewArticle {
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone(),
            author_name: self.author_name.clone(),
            publish_date,
        })
    }
}

impl ArticleUpdateInput {
    pub(crate) fn validate(&self) -> Result<ArticleChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_title(self.title.as_deref(), false, &mut errors);
        validate_description(self.description.clone().flatten().as_deref(), &mut errors);
        validate_author_name(self.author_name.clone().flatten().as_deref(), &mut errors);
        let publish_date = self.publish_date.as_ref().map(|date| {
            date.as_deref()
                .and_then(|value| validate_publish_date(value, &mut errors))
        });
        validate_tag_names(&self.tags, &mut errors);

        errors.into_result(ArticleChanges {
            title: self.title.clone(),
            description: self.description.clone(),
            author_name: self.author_name.clone(),
            publish_date,
        })
    }
}
