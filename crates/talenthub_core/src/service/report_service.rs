//! Report listing and creation.

use super::{CrudService, Entity, ServiceError, ServiceResult};
use crate::mapper::{Mapper, REPORT_MAPPER};
use crate::model::{timestamp, NewReport, Report, ReportPage};
use crate::schema::{report_schema, Record, Schema};
use crate::store::{Filter, SortDir, StoreClient};
use chrono::{Months, Utc};
use serde_json::Value;
use std::str::FromStr;

const DEFAULT_PAGE_SIZE: u32 = 10;

pub struct ReportEntity;

impl Entity for ReportEntity {
    type Record = Report;
    type New = NewReport;
    type Patch = Record;

    const NAME: &'static str = "report";
    const COLLECTION: &'static str = "reports";
    const MAPPER: Mapper = REPORT_MAPPER;
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "author"];
    const ORDER: &'static [(&'static str, SortDir)] = &[("generated_date", SortDir::Desc)];

    fn schema() -> &'static Schema {
        report_schema()
    }
}

/// Preset windows offered by the reports screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeFrame {
    #[default]
    All,
    /// Generated within the last three months.
    Recent,
    /// Report type mentions "Financial".
    Financial,
    /// Report type mentions "Performance".
    Performance,
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "recent" => Ok(Self::Recent),
            "financial" => Ok(Self::Financial),
            "performance" => Ok(Self::Performance),
            other => Err(format!("unknown time frame `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReportsOptions {
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    /// Substring of the report type.
    pub report_type: Option<String>,
    /// Exact discipline label.
    pub discipline: Option<String>,
    /// Substring of title or author.
    pub search: Option<String>,
    pub time_frame: TimeFrame,
}

impl Default for FetchReportsOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            report_type: None,
            discipline: None,
            search: None,
            time_frame: TimeFrame::All,
        }
    }
}

pub struct ReportService<'a, S: StoreClient + ?Sized> {
    store: &'a S,
    crud: CrudService<'a, S, ReportEntity>,
}

impl<'a, S: StoreClient + ?Sized> ReportService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            crud: CrudService::new(store),
        }
    }

    pub fn crud(&self) -> &CrudService<'a, S, ReportEntity> {
        &self.crud
    }

    /// One page of matching reports, newest first. `count` is the number of
    /// reports matching the filters across all pages.
    pub fn fetch_reports(&self, options: &FetchReportsOptions) -> ServiceResult<ReportPage> {
        let page = options.page.max(1);
        let page_size = options.page_size.max(1);
        let mut query = self.crud.query();

        if let Some(report_type) = non_empty(&options.report_type) {
            query = query.filter(Filter::contains_text("report_type", report_type));
        }
        if let Some(discipline) = non_empty(&options.discipline) {
            query = query.filter(Filter::contains("disciplines", discipline));
        }
        if let Some(text) = non_empty(&options.search) {
            query = query.filter(Filter::or([
                Filter::contains_text("title", text),
                Filter::contains_text("author", text),
            ]));
        }
        query = match options.time_frame {
            TimeFrame::All => query,
            TimeFrame::Recent => {
                let now = Utc::now();
                let since = now.checked_sub_months(Months::new(3)).unwrap_or(now);
                query.filter(Filter::gte("generated_date", timestamp::format(&since)))
            }
            TimeFrame::Financial => query.filter(Filter::contains_text("report_type", "Financial")),
            TimeFrame::Performance => {
                query.filter(Filter::contains_text("report_type", "Performance"))
            }
        };

        let count = self.crud.repo().count(&query)?;
        let offset = (page - 1).saturating_mul(page_size);
        let data = self.crud.find_by(&query.limit(page_size).offset(offset))?;

        Ok(ReportPage {
            data,
            count,
            page,
            page_size,
        })
    }

    /// Persists report metadata, attributed to the session user when one
    /// is present.
    pub fn create_report(&self, input: &NewReport) -> ServiceResult<Report> {
        let mut candidate = serde_json::to_value(input).map_err(|err| ServiceError::InvalidData {
            entity: ReportEntity::NAME,
            message: err.to_string(),
        })?;
        if let (Some(user), Value::Object(object)) = (self.store.current_user(), &mut candidate) {
            object.insert("createdBy".to_string(), Value::String(user));
        }
        self.crud.create_value(&candidate)
    }

    pub fn get_by_id(&self, id: uuid::Uuid) -> ServiceResult<Report> {
        self.crud.get_by_id(id)
    }

    pub fn delete(&self, id: uuid::Uuid) -> ServiceResult<()> {
        self.crud.delete(id)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
