//! Generated report metadata (performance, financial, progress reports).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ReportId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    /// Free-form label such as "Performance" or "Financial".
    pub report_type: String,
    #[serde(with = "super::timestamp")]
    pub generated_date: DateTime<Utc>,
    pub author: String,
    pub disciplines: Vec<String>,
    pub teams: Vec<String>,
    #[serde(with = "super::timestamp")]
    pub period_start: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub period_end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub title: String,
    pub report_type: String,
    #[serde(with = "super::timestamp")]
    pub generated_date: DateTime<Utc>,
    pub author: String,
    pub disciplines: Vec<String>,
    pub teams: Vec<String>,
    #[serde(with = "super::timestamp")]
    pub period_start: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub period_end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// One page of reports plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub data: Vec<Report>,
    pub count: usize,
    pub page: u32,
    pub page_size: u32,
}
