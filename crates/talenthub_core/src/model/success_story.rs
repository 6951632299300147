//! Success story domain model.

use super::enums::Discipline;
use super::talent::TalentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SuccessStoryId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStory {
    pub id: SuccessStoryId,
    pub talent_id: TalentId,
    pub title: String,
    pub content: String,
    #[serde(with = "super::timestamp")]
    pub publish_date: DateTime<Utc>,
    /// Free-form labels, matched exactly by tag queries.
    pub tags: Vec<String>,
    pub discipline: Discipline,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSuccessStory {
    pub talent_id: TalentId,
    pub title: String,
    pub content: String,
    #[serde(with = "super::timestamp")]
    pub publish_date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub discipline: Discipline,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talent_id: Option<TalentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::timestamp::option"
    )]
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discipline: Option<Discipline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}
