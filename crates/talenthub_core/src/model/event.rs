//! Event domain model.
//!
//! `participants` is materialized through the `event_participants` join
//! collection, like competition enrollments.

use super::enums::{Discipline, Status, Team};
use super::talent::TalentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type EventId = Uuid;

/// Scheduled training camp, showcase or meeting.
///
/// `end_date` should not be earlier than `start_date`; the schema rejects
/// payloads that break this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    #[serde(with = "super::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub disciplines: Vec<Discipline>,
    pub teams: Vec<Team>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Talent IDs; filled only by join-aware reads.
    #[serde(default)]
    pub participants: Vec<TalentId>,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    #[serde(with = "super::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub disciplines: Vec<Discipline>,
    pub teams: Vec<Team>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::timestamp::option"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::timestamp::option"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disciplines: Option<Vec<Discipline>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<Team>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
