//! Talent-domain model.
//!
//! # Responsibility
//! - Define the camelCase domain shapes handed to and returned by services.
//! - Keep closed value sets and timestamp encoding in one place.
//!
//! # Invariants
//! - Every entity carries a store-assigned `id`, `createdAt`, `updatedAt`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod achievement;
pub mod competition;
pub mod enums;
pub mod event;
pub mod report;
pub mod settings;
pub mod success_story;
pub mod talent;
pub mod timestamp;

pub use achievement::{Achievement, AchievementId, AchievementPatch, NewAchievement};
pub use competition::{
    Competition, CompetitionId, CompetitionPatch, CompetitionResult, NewCompetition,
};
pub use enums::{
    AchievementCategory, Discipline, EmailFrequency, Gender, Stage, Status, Team, UnknownVariant,
};
pub use event::{Event, EventId, EventPatch, NewEvent};
pub use report::{NewReport, Report, ReportId, ReportPage};
pub use settings::{
    DisplayKey, DisplaySettings, EmailSettings, NotificationKey, NotificationSettings, Settings,
};
pub use success_story::{NewSuccessStory, SuccessStory, SuccessStoryId, SuccessStoryPatch};
pub use talent::{NewTalent, Talent, TalentDetails, TalentId, TalentPatch};
