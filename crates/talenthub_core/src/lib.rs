//! Core domain logic for TalentHub.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod repo;
pub mod schema;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use repo::{RepoError, RepoResult, Repository};
pub use schema::{FieldIssue, ValidationError};
pub use service::{
    AchievementService, CompetitionService, EventService, FetchReportsOptions, ReportService,
    ServiceError, ServiceResult, SettingsService, SuccessStoryService, TalentService, TimeFrame,
};
pub use state::{ListState, SettingsState};
pub use store::{Filter, Query, SortDir, SqliteStore, StoreClient, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
