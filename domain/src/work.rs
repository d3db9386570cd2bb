use crate::error::Error;
use crate::patch::present;
use crate::works::{self, DEFAULT_CHAPTER_LABEL, DEFAULT_EPISODE_LABEL};
use crate::Id;
use chrono::NaiveDate;
use log::*;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;

pub use entity_api::work::{delete_by_id, find_all, find_by_id};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NewWork {
    pub title: Option<String>,
    pub description: Option<String>,
    pub episode_label: Option<String>,
    pub chapter_label: Option<String>,
    pub published: Option<bool>,
    #[schema(value_type = Option<String>, format = Date)]
    pub published_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WorkChanges {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub episode_label: Option<String>,
    pub chapter_label: Option<String>,
    pub published: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = Date)]
    pub published_date: Option<Option<NaiveDate>>,
}

impl WorkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.episode_label.is_none()
            && self.chapter_label.is_none()
            && self.published.is_none()
            && self.published_date.is_none()
    }
}

fn required_title(title: Option<String>) -> Result<String, Error> {
    match title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => Ok(title.to_string()),
        _ => Err(Error::validation("Missing required fields: title")),
    }
}

fn label_or(label: Option<String>, default: &str) -> String {
    label
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub async fn create(db: &DatabaseConnection, new_work: NewWork) -> Result<works::Model, Error> {
    let title = required_title(new_work.title)?;

    let now = chrono::Utc::now();
    let work = entity_api::work::create(
        db,
        works::Model {
            id: Id::nil(),
            title,
            description: new_work.description,
            episode_label: label_or(new_work.episode_label, DEFAULT_EPISODE_LABEL),
            chapter_label: label_or(new_work.chapter_label, DEFAULT_CHAPTER_LABEL),
            published: new_work.published.unwrap_or(false),
            published_date: new_work.published_date,
            created_at: now.into(),
            updated_at: now.into(),
        },
    )
    .await?;

    debug!("Created work {}", work.id);
    Ok(work)
}

pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    changes: WorkChanges,
) -> Result<works::Model, Error> {
    if changes.is_empty() {
        return Err(Error::validation("No fields to update"));
    }
    let title = changes.title.map(|t| required_title(Some(t))).transpose()?;

    let mut work = entity_api::work::find_by_id(db, id).await?;

    if let Some(title) = title {
        work.title = title;
    }
    if let Some(description) = changes.description {
        work.description = description;
    }
    if let Some(label) = changes.episode_label {
        work.episode_label = label_or(Some(label), DEFAULT_EPISODE_LABEL);
    }
    if let Some(label) = changes.chapter_label {
        work.chapter_label = label_or(Some(label), DEFAULT_CHAPTER_LABEL);
    }
    if let Some(published) = changes.published {
        work.published = published;
    }
    if let Some(published_date) = changes.published_date {
        work.published_date = published_date;
    }

    Ok(entity_api::work::update(db, work).await?)
}
