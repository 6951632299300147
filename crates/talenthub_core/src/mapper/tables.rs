//! Field tables for every stored entity.

use super::{FieldMapping, Mapper};

const ID: FieldMapping = FieldMapping::plain("id", "id");
const CREATED_AT: FieldMapping = FieldMapping::plain("createdAt", "created_at");
const UPDATED_AT: FieldMapping = FieldMapping::plain("updatedAt", "updated_at");

const TALENT_FIELDS: &[FieldMapping] = &[
    ID,
    FieldMapping::plain("firstName", "first_name"),
    FieldMapping::plain("lastName", "last_name"),
    FieldMapping::plain("dateOfBirth", "date_of_birth"),
    FieldMapping::plain("gender", "gender"),
    FieldMapping::plain("discipline", "discipline"),
    FieldMapping::plain("team", "team"),
    FieldMapping::plain("currentStage", "current_stage"),
    FieldMapping::plain("contactEmail", "contact_email"),
    FieldMapping::plain("contactPhone", "contact_phone"),
    FieldMapping::plain("bio", "bio"),
    FieldMapping::plain("imageUrl", "image_url"),
    CREATED_AT,
    UPDATED_AT,
];

pub const TALENT_MAPPER: Mapper = Mapper::new(TALENT_FIELDS);

// `participants` lives in the join collection, not on this row.
const EVENT_FIELDS: &[FieldMapping] = &[
    ID,
    FieldMapping::plain("title", "title"),
    FieldMapping::plain("description", "description"),
    FieldMapping::plain("startDate", "start_date"),
    FieldMapping::plain("endDate", "end_date"),
    FieldMapping::plain("location", "location"),
    FieldMapping::plain("disciplines", "disciplines"),
    FieldMapping::plain("teams", "teams"),
    FieldMapping::plain("status", "status"),
    FieldMapping::plain("imageUrl", "image_url"),
    CREATED_AT,
    UPDATED_AT,
];

pub const EVENT_MAPPER: Mapper = Mapper::new(EVENT_FIELDS);

const ACHIEVEMENT_FIELDS: &[FieldMapping] = &[
    ID,
    FieldMapping::plain("talentId", "talent_id"),
    FieldMapping::plain("title", "title"),
    FieldMapping::plain("description", "description"),
    FieldMapping::plain("category", "category"),
    FieldMapping::plain("discipline", "discipline"),
    FieldMapping::plain("awardedAt", "awarded_at"),
    FieldMapping::plain("imageUrl", "image_url"),
    CREATED_AT,
    UPDATED_AT,
];

pub const ACHIEVEMENT_MAPPER: Mapper = Mapper::new(ACHIEVEMENT_FIELDS);

// `participants` lives in the join collection, not on this row.
const COMPETITION_FIELDS: &[FieldMapping] = &[
    ID,
    FieldMapping::plain("title", "title"),
    FieldMapping::plain("description", "description"),
    FieldMapping::plain("date", "date"),
    FieldMapping::plain("location", "location"),
    FieldMapping::plain("disciplines", "disciplines"),
    FieldMapping::plain("status", "status"),
    FieldMapping::plain("results", "results"),
    FieldMapping::plain("imageUrl", "image_url"),
    CREATED_AT,
    UPDATED_AT,
];

pub const COMPETITION_MAPPER: Mapper = Mapper::new(COMPETITION_FIELDS);

const COMPETITION_PARTICIPANT_FIELDS: &[FieldMapping] = &[
    FieldMapping::plain("competitionId", "competition_id"),
    FieldMapping::plain("talentId", "talent_id"),
];

pub const COMPETITION_PARTICIPANT_MAPPER: Mapper = Mapper::new(COMPETITION_PARTICIPANT_FIELDS);

const EVENT_PARTICIPANT_FIELDS: &[FieldMapping] = &[
    FieldMapping::plain("eventId", "event_id"),
    FieldMapping::plain("talentId", "talent_id"),
];

pub const EVENT_PARTICIPANT_MAPPER: Mapper = Mapper::new(EVENT_PARTICIPANT_FIELDS);

const SUCCESS_STORY_FIELDS: &[FieldMapping] = &[
    ID,
    FieldMapping::plain("talentId", "talent_id"),
    FieldMapping::plain("title", "title"),
    FieldMapping::plain("content", "content"),
    FieldMapping::plain("publishDate", "publish_date"),
    FieldMapping::plain("tags", "tags"),
    FieldMapping::plain("discipline", "discipline"),
    FieldMapping::plain("featuredImage", "featured_image"),
    CREATED_AT,
    UPDATED_AT,
];

pub const SUCCESS_STORY_MAPPER: Mapper = Mapper::new(SUCCESS_STORY_FIELDS);

const REPORT_FIELDS: &[FieldMapping] = &[
    ID,
    FieldMapping::plain("title", "title"),
    FieldMapping::plain("reportType", "report_type"),
    FieldMapping::plain("generatedDate", "generated_date"),
    FieldMapping::plain("author", "author"),
    FieldMapping::plain("disciplines", "disciplines"),
    FieldMapping::plain("teams", "teams"),
    FieldMapping::plain("periodStart", "period_start"),
    FieldMapping::plain("periodEnd", "period_end"),
    FieldMapping::plain("fileUrl", "file_url"),
    FieldMapping::plain("createdBy", "created_by"),
    CREATED_AT,
    UPDATED_AT,
];

pub const REPORT_MAPPER: Mapper = Mapper::new(REPORT_FIELDS);

/// Settings groups are persisted on the user's profile row.
const PROFILE_FIELDS: &[FieldMapping] = &[
    FieldMapping::blob("notifications", "notification_settings"),
    FieldMapping::blob("display", "display_settings"),
    FieldMapping::blob("email", "email_settings"),
];

pub const PROFILE_MAPPER: Mapper = Mapper::new(PROFILE_FIELDS);
