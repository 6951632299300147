//! Entity use-case services.
//!
//! # Responsibility
//! - Compose repository, mapper and schema into validated domain CRUD.
//! - Add the per-entity query shapes the application screens need.
//!
//! # Invariants
//! - Validation runs before any store interaction; a rejected candidate is
//!   never partially written.
//! - Errors propagate to the caller unchanged in meaning. No retry.

mod achievement_service;
mod competition_service;
mod crud;
mod event_service;
mod report_service;
mod settings_service;
mod success_story_service;
mod talent_service;

pub use achievement_service::{AchievementEntity, AchievementService};
pub use competition_service::{CompetitionEntity, CompetitionService};
pub use crud::{CrudService, Entity};
pub use event_service::{EventEntity, EventService};
pub use report_service::{FetchReportsOptions, ReportEntity, ReportService, TimeFrame};
pub use settings_service::SettingsService;
pub use success_story_service::{SuccessStoryEntity, SuccessStoryService};
pub use talent_service::{TalentEntity, TalentService};

use crate::mapper::MapError;
use crate::model::Status;
use crate::repo::RepoError;
use crate::schema::ValidationError;
use crate::store::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{collection} record not found: {key}")]
    NotFound {
        collection: &'static str,
        key: String,
    },
    #[error("{count} {collection} records match {key}, expected exactly one")]
    NotUnique {
        collection: &'static str,
        key: String,
        count: usize,
    },
    #[error(transparent)]
    Storage(StoreError),
    #[error("invalid {entity} data: {message}")]
    InvalidData {
        entity: &'static str,
        message: String,
    },
    #[error("no authenticated user")]
    Unauthenticated,
    #[error("{entity} status cannot move from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: Status,
        to: Status,
    },
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn invalid_data(entity: &'static str, err: MapError) -> Self {
        Self::InvalidData {
            entity,
            message: err.to_string(),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { collection, key } => Self::NotFound { collection, key },
            RepoError::NotUnique {
                collection,
                key,
                count,
            } => Self::NotUnique {
                collection,
                key,
                count,
            },
            RepoError::Storage(err) => Self::Storage(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}
