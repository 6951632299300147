//! Per-entity schemas.

use super::{FieldIssue, FieldKind, Record, Schema};
use crate::model::{AchievementCategory, Discipline, EmailFrequency, Gender, Stage, Status, Team};
use once_cell::sync::Lazy;

const NAME: FieldKind = FieldKind::Text { min_len: 1 };
const TEXT: FieldKind = FieldKind::Text { min_len: 0 };

static TALENT: Lazy<Schema> = Lazy::new(|| {
    Schema::new("talent")
        .required("firstName", NAME)
        .required("lastName", NAME)
        .required("dateOfBirth", FieldKind::Date)
        .required("gender", FieldKind::Enum(Gender::WIRE_VALUES))
        .required("discipline", FieldKind::Enum(Discipline::WIRE_VALUES))
        .required("team", FieldKind::Enum(Team::WIRE_VALUES))
        .required("currentStage", FieldKind::Enum(Stage::WIRE_VALUES))
        .required("contactEmail", FieldKind::Email)
        .optional("contactPhone", TEXT)
        .optional("bio", TEXT)
        .optional("imageUrl", FieldKind::Url)
});

static EVENT: Lazy<Schema> = Lazy::new(|| {
    Schema::new("event")
        .required("title", NAME)
        .required("description", TEXT)
        .required("startDate", FieldKind::Timestamp)
        .required("endDate", FieldKind::Timestamp)
        .required("location", TEXT)
        .required("disciplines", FieldKind::EnumList(Discipline::WIRE_VALUES))
        .required("teams", FieldKind::EnumList(Team::WIRE_VALUES))
        .required("status", FieldKind::Enum(Status::WIRE_VALUES))
        .optional("imageUrl", FieldKind::Url)
        .rule(end_not_before_start)
});

static ACHIEVEMENT: Lazy<Schema> = Lazy::new(|| {
    Schema::new("achievement")
        .required("talentId", FieldKind::Uuid)
        .required("title", NAME)
        .required("description", TEXT)
        .required("category", FieldKind::Enum(AchievementCategory::WIRE_VALUES))
        .required("discipline", FieldKind::Enum(Discipline::WIRE_VALUES))
        .required("awardedAt", FieldKind::Timestamp)
        .optional("imageUrl", FieldKind::Url)
});

static COMPETITION: Lazy<Schema> = Lazy::new(|| {
    Schema::new("competition")
        .required("title", NAME)
        .required("description", TEXT)
        .required("date", FieldKind::Timestamp)
        .required("location", TEXT)
        .required("disciplines", FieldKind::EnumList(Discipline::WIRE_VALUES))
        .required("status", FieldKind::Enum(Status::WIRE_VALUES))
        .optional("results", FieldKind::Results)
        .optional("imageUrl", FieldKind::Url)
});

static SUCCESS_STORY: Lazy<Schema> = Lazy::new(|| {
    Schema::new("success story")
        .required("talentId", FieldKind::Uuid)
        .required("title", NAME)
        .required("content", TEXT)
        .required("publishDate", FieldKind::Timestamp)
        .required("tags", FieldKind::TextList)
        .required("discipline", FieldKind::Enum(Discipline::WIRE_VALUES))
        .optional("featuredImage", FieldKind::Url)
});

static REPORT: Lazy<Schema> = Lazy::new(|| {
    Schema::new("report")
        .required("title", NAME)
        .required("reportType", NAME)
        .required("generatedDate", FieldKind::Timestamp)
        .required("author", NAME)
        .required("disciplines", FieldKind::TextList)
        .required("teams", FieldKind::TextList)
        .required("periodStart", FieldKind::Timestamp)
        .required("periodEnd", FieldKind::Timestamp)
        .optional("fileUrl", FieldKind::Url)
        .optional("createdBy", TEXT)
});

static NOTIFICATIONS: Lazy<Schema> = Lazy::new(|| {
    Schema::new("notification settings")
        .required("email", FieldKind::Boolean)
        .required("push", FieldKind::Boolean)
        .required("achievements", FieldKind::Boolean)
        .required("events", FieldKind::Boolean)
        .required("competitions", FieldKind::Boolean)
});

static DISPLAY: Lazy<Schema> = Lazy::new(|| {
    Schema::new("display settings")
        .required("darkMode", FieldKind::Boolean)
        .required("compactView", FieldKind::Boolean)
        .required("showImages", FieldKind::Boolean)
});

static EMAIL: Lazy<Schema> = Lazy::new(|| {
    Schema::new("email settings")
        .required("email", FieldKind::EmailOrEmpty)
        .required("frequency", FieldKind::Enum(EmailFrequency::WIRE_VALUES))
});

static SETTINGS: Lazy<Schema> = Lazy::new(|| {
    Schema::new("settings")
        .required("notifications", FieldKind::Nested(&NOTIFICATIONS))
        .required("display", FieldKind::Nested(&DISPLAY))
        .required("email", FieldKind::Nested(&EMAIL))
});

pub fn talent_schema() -> &'static Schema {
    &TALENT
}

pub fn event_schema() -> &'static Schema {
    &EVENT
}

pub fn achievement_schema() -> &'static Schema {
    &ACHIEVEMENT
}

pub fn competition_schema() -> &'static Schema {
    &COMPETITION
}

pub fn success_story_schema() -> &'static Schema {
    &SUCCESS_STORY
}

pub fn report_schema() -> &'static Schema {
    &REPORT
}

pub fn settings_schema() -> &'static Schema {
    &SETTINGS
}

// Both values are already normalized to the fixed-width encoding, so text
// order is time order.
fn end_not_before_start(record: &Record) -> Option<FieldIssue> {
    let start = record.get("startDate")?.as_str()?;
    let end = record.get("endDate")?.as_str()?;
    (end < start).then(|| FieldIssue::new("endDate", "timestamp not earlier than startDate"))
}

#[cfg(test)]
mod tests {
    use super::{event_schema, settings_schema, talent_schema};
    use crate::model::Settings;
    use serde_json::json;

    fn ana() -> serde_json::Value {
        json!({
            "firstName": "Ana",
            "lastName": "B",
            "dateOfBirth": "2010-04-12",
            "gender": "Female",
            "discipline": "Swimming",
            "team": "Academy",
            "currentStage": "Beginner",
            "contactEmail": "a@b.com"
        })
    }

    #[test]
    fn valid_talent_passes_unchanged() {
        let record = talent_schema().validate(&ana()).unwrap();
        assert_eq!(serde_json::Value::Object(record), ana());
    }

    #[test]
    fn talent_with_bad_enum_and_missing_field_names_both() {
        let mut candidate = ana();
        candidate["discipline"] = json!("Chess");
        candidate.as_object_mut().unwrap().remove("contactEmail");
        let err = talent_schema().validate(&candidate).unwrap_err();
        assert!(err.has_field("discipline"));
        assert!(err.has_field("contactEmail"));
        assert_eq!(err.issues.len(), 2);
    }

    #[test]
    fn talent_rejects_malformed_email_and_url() {
        let mut candidate = ana();
        candidate["contactEmail"] = json!("not-an-email");
        candidate["imageUrl"] = json!("just text");
        let err = talent_schema().validate(&candidate).unwrap_err();
        assert_eq!(err.fields(), vec!["contactEmail", "imageUrl"]);
    }

    #[test]
    fn event_end_before_start_is_rejected() {
        let candidate = json!({
            "title": "Camp",
            "description": "",
            "startDate": "2030-05-02T10:00:00Z",
            "endDate": "2030-05-01T10:00:00Z",
            "location": "Kigali",
            "disciplines": ["Football"],
            "teams": ["U18"],
            "status": "Upcoming"
        });
        let err = event_schema().validate(&candidate).unwrap_err();
        assert_eq!(err.fields(), vec!["endDate"]);
    }

    #[test]
    fn event_status_outside_enum_is_rejected() {
        let err = event_schema()
            .validate_partial(&json!({"status": "Cancelled"}))
            .unwrap_err();
        assert!(err.has_field("status"));
    }

    #[test]
    fn default_settings_validate_and_nested_errors_use_paths() {
        let defaults = serde_json::to_value(Settings::default()).unwrap();
        settings_schema().validate(&defaults).unwrap();

        let mut broken = defaults;
        broken["email"]["frequency"] = json!("hourly");
        broken["email"]["email"] = json!("nope");
        let err = settings_schema().validate(&broken).unwrap_err();
        assert_eq!(err.fields(), vec!["email.email", "email.frequency"]);
    }
}
