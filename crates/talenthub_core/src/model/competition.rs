//! Competition domain model.
//!
//! # Invariants
//! - `participants` is a derived many-to-many relation materialized through
//!   the `competition_participants` join collection. A plain fetch leaves it
//!   empty; only join-aware reads fill it.

use super::enums::{Discipline, Status};
use super::talent::TalentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CompetitionId = Uuid;

/// One placing in a competition's result table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResult {
    pub team_name: String,
    pub rank: u32,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: CompetitionId,
    pub title: String,
    pub description: String,
    #[serde(with = "super::timestamp")]
    pub date: DateTime<Utc>,
    pub location: String,
    pub disciplines: Vec<Discipline>,
    /// Talent IDs; filled only by join-aware reads.
    #[serde(default)]
    pub participants: Vec<TalentId>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<CompetitionResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompetition {
    pub title: String,
    pub description: String,
    #[serde(with = "super::timestamp")]
    pub date: DateTime<Utc>,
    pub location: String,
    pub disciplines: Vec<Discipline>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<CompetitionResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::timestamp::option"
    )]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disciplines: Option<Vec<Discipline>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<CompetitionResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
