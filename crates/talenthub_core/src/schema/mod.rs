//! Declarative structural contracts for candidate payloads.
//!
//! # Responsibility
//! - Check required/optional fields, primitive types, formats and closed
//!   value sets of loosely typed (JSON) candidates.
//! - Report every non-conforming field, not only the first.
//!
//! # Invariants
//! - Validation never panics and never touches the store.
//! - Returned records contain only recognized fields.
//! - Timestamps are normalized to the canonical storage encoding.

mod entities;

pub use entities::{
    achievement_schema, competition_schema, event_schema, report_schema, settings_schema,
    success_story_schema, talent_schema,
};

use crate::model::timestamp;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Field-name keyed JSON object in domain (camelCase) shape.
pub type Record = Map<String, Value>;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+[^\s]*$").expect("valid url regex")
});

/// One non-conforming field and the constraint it broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Dotted path, e.g. `email.frequency` or `results[1].rank`.
    pub field: String,
    pub expected: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
        }
    }
}

/// Candidate failed its schema. Lists every offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub entity: &'static str,
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.field.as_str()).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}:", self.entity)?;
        for (index, issue) in self.issues.iter().enumerate() {
            let separator = if index == 0 { " " } else { "; " };
            write!(f, "{separator}{} (expected {})", issue.field, issue.expected)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Primitive type and format constraint of one field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// String with at least `min_len` characters.
    Text { min_len: usize },
    Email,
    /// Email address, or empty string meaning "unset".
    EmailOrEmpty,
    Url,
    /// RFC 3339 timestamp.
    Timestamp,
    /// `YYYY-MM-DD` calendar date.
    Date,
    Uuid,
    Boolean,
    Enum(&'static [&'static str]),
    EnumList(&'static [&'static str]),
    TextList,
    /// Ordered `{teamName, rank, score}` list.
    Results,
    Nested(&'static Schema),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Cross-field check run after every field passed on its own.
pub type Rule = fn(&Record) -> Option<FieldIssue>;

#[derive(Debug)]
pub struct Schema {
    entity: &'static str,
    fields: Vec<FieldSpec>,
    rules: Vec<Rule>,
}

impl Schema {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn required(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name,
            kind,
            required: true,
        });
        self
    }

    pub fn optional(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name,
            kind,
            required: false,
        });
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Validates a full candidate (create / replace).
    ///
    /// Optional fields set to `null` are dropped from the result.
    pub fn validate(&self, candidate: &Value) -> Result<Record, ValidationError> {
        self.run(candidate, false)
    }

    /// Validates an update candidate; every field becomes optional.
    ///
    /// # Contract
    /// - `null` is kept for optional fields (clears the column) and rejected
    ///   for required ones.
    /// - A candidate without any recognized field is rejected.
    pub fn validate_partial(&self, candidate: &Value) -> Result<Record, ValidationError> {
        let record = self.run(candidate, true)?;
        if record.is_empty() {
            return Err(ValidationError {
                entity: self.entity,
                issues: vec![FieldIssue::new(
                    "*",
                    format!("at least one of {}", self.field_names().join("|")),
                )],
            });
        }
        Ok(record)
    }

    fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.name).collect()
    }

    fn run(&self, candidate: &Value, partial: bool) -> Result<Record, ValidationError> {
        let mut issues = Vec::new();
        let record = match candidate {
            Value::Object(object) => self.check_object(object, partial, "", &mut issues),
            _ => {
                issues.push(FieldIssue::new("*", "object"));
                Record::new()
            }
        };

        if issues.is_empty() {
            for rule in &self.rules {
                if let Some(issue) = rule(&record) {
                    issues.push(issue);
                }
            }
        }

        if issues.is_empty() {
            Ok(record)
        } else {
            Err(ValidationError {
                entity: self.entity,
                issues,
            })
        }
    }

    fn check_object(
        &self,
        object: &Record,
        partial: bool,
        prefix: &str,
        issues: &mut Vec<FieldIssue>,
    ) -> Record {
        let mut out = Record::new();
        for spec in &self.fields {
            let path = format!("{prefix}{}", spec.name);
            match object.get(spec.name) {
                None => {
                    if spec.required && !partial {
                        issues.push(FieldIssue::new(path, describe(spec.kind)));
                    }
                }
                Some(Value::Null) => {
                    if spec.required {
                        issues.push(FieldIssue::new(path, describe(spec.kind)));
                    } else if partial {
                        out.insert(spec.name.to_string(), Value::Null);
                    }
                }
                Some(value) => {
                    if let Some(checked) = check_value(spec.kind, value, partial, &path, issues) {
                        out.insert(spec.name.to_string(), checked);
                    }
                }
            }
        }
        out
    }
}

fn check_value(
    kind: FieldKind,
    value: &Value,
    partial: bool,
    path: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<Value> {
    let mismatch = |issues: &mut Vec<FieldIssue>| -> Option<Value> {
        issues.push(FieldIssue::new(path, describe(kind)));
        None
    };

    match kind {
        FieldKind::Text { min_len } => match value.as_str() {
            Some(text) if text.chars().count() >= min_len => Some(value.clone()),
            _ => mismatch(issues),
        },
        FieldKind::Email => match value.as_str() {
            Some(text) if EMAIL_RE.is_match(text) => Some(value.clone()),
            _ => mismatch(issues),
        },
        FieldKind::EmailOrEmpty => match value.as_str() {
            Some(text) if text.is_empty() || EMAIL_RE.is_match(text) => Some(value.clone()),
            _ => mismatch(issues),
        },
        FieldKind::Url => match value.as_str() {
            Some(text) if URL_RE.is_match(text) => Some(value.clone()),
            _ => mismatch(issues),
        },
        FieldKind::Timestamp => match value.as_str().map(timestamp::parse) {
            Some(Ok(parsed)) => Some(Value::String(timestamp::format(&parsed))),
            _ => mismatch(issues),
        },
        FieldKind::Date => match value
            .as_str()
            .map(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        {
            Some(Ok(_)) => Some(value.clone()),
            _ => mismatch(issues),
        },
        FieldKind::Uuid => match value.as_str().map(Uuid::parse_str) {
            Some(Ok(_)) => Some(value.clone()),
            _ => mismatch(issues),
        },
        FieldKind::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            _ => mismatch(issues),
        },
        FieldKind::Enum(allowed) => match value.as_str() {
            Some(text) if allowed.contains(&text) => Some(value.clone()),
            _ => mismatch(issues),
        },
        FieldKind::EnumList(allowed) => {
            let Some(items) = value.as_array() else {
                return mismatch(issues);
            };
            let before = issues.len();
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(text) if allowed.contains(&text) => {}
                    _ => issues.push(FieldIssue::new(
                        format!("{path}[{index}]"),
                        format!("one of {}", allowed.join("|")),
                    )),
                }
            }
            (issues.len() == before).then(|| value.clone())
        }
        FieldKind::TextList => match value.as_array() {
            Some(items) if items.iter().all(Value::is_string) => Some(value.clone()),
            _ => mismatch(issues),
        },
        FieldKind::Results => {
            let Some(items) = value.as_array() else {
                return mismatch(issues);
            };
            let before = issues.len();
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                let Some(entry) = item.as_object() else {
                    issues.push(FieldIssue::new(item_path, "{teamName, rank, score}"));
                    continue;
                };
                if !entry.get("teamName").is_some_and(Value::is_string) {
                    issues.push(FieldIssue::new(format!("{item_path}.teamName"), "string"));
                }
                let rank = entry
                    .get("rank")
                    .and_then(Value::as_u64)
                    .and_then(|rank| u32::try_from(rank).ok());
                if rank.is_none() {
                    issues.push(FieldIssue::new(
                        format!("{item_path}.rank"),
                        "integer between 0 and 4294967295",
                    ));
                }
                if !entry.get("score").is_some_and(Value::is_number) {
                    issues.push(FieldIssue::new(format!("{item_path}.score"), "number"));
                }
            }
            (issues.len() == before).then(|| value.clone())
        }
        FieldKind::Nested(schema) => match value.as_object() {
            Some(object) => {
                let before = issues.len();
                let nested = schema.check_object(object, partial, &format!("{path}."), issues);
                (issues.len() == before).then_some(Value::Object(nested))
            }
            None => mismatch(issues),
        },
    }
}

fn describe(kind: FieldKind) -> String {
    match kind {
        FieldKind::Text { min_len: 0 } => "string".to_string(),
        FieldKind::Text { min_len } => format!("string of at least {min_len} character(s)"),
        FieldKind::Email => "email address".to_string(),
        FieldKind::EmailOrEmpty => "email address or empty string".to_string(),
        FieldKind::Url => "url".to_string(),
        FieldKind::Timestamp => "RFC 3339 timestamp".to_string(),
        FieldKind::Date => "date (YYYY-MM-DD)".to_string(),
        FieldKind::Uuid => "uuid".to_string(),
        FieldKind::Boolean => "boolean".to_string(),
        FieldKind::Enum(allowed) => format!("one of {}", allowed.join("|")),
        FieldKind::EnumList(allowed) => format!("list of {}", allowed.join("|")),
        FieldKind::TextList => "list of strings".to_string(),
        FieldKind::Results => "list of {teamName, rank, score}".to_string(),
        FieldKind::Nested(schema) => format!("{} object", schema.entity),
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, Schema};
    use serde_json::json;

    fn sample() -> Schema {
        Schema::new("sample")
            .required("name", FieldKind::Text { min_len: 1 })
            .required("kind", FieldKind::Enum(&["a", "b"]))
            .optional("contact", FieldKind::Email)
            .optional("at", FieldKind::Timestamp)
    }

    #[test]
    fn reports_every_offending_field() {
        let err = sample()
            .validate(&json!({"name": "", "kind": "c", "contact": "nope"}))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["name", "kind", "contact"]);
        assert!(err.to_string().contains("one of a|b"));
    }

    #[test]
    fn missing_required_field_is_named() {
        let err = sample().validate(&json!({"name": "x"})).unwrap_err();
        assert!(err.has_field("kind"));
        assert!(!err.has_field("name"));
    }

    #[test]
    fn unknown_keys_are_dropped_and_nulls_removed() {
        let record = sample()
            .validate(&json!({"name": "x", "kind": "a", "extra": 1, "contact": null}))
            .unwrap();
        assert_eq!(record.len(), 2);
        assert!(!record.contains_key("extra"));
        assert!(!record.contains_key("contact"));
    }

    #[test]
    fn timestamps_are_normalized() {
        let record = sample()
            .validate(&json!({"name": "x", "kind": "b", "at": "2024-06-01T12:00:00+02:00"}))
            .unwrap();
        assert_eq!(record["at"], json!("2024-06-01T10:00:00.000000000Z"));
    }

    #[test]
    fn partial_accepts_subset_and_keeps_nulls_for_optional() {
        let record = sample()
            .validate_partial(&json!({"contact": null, "kind": "b"}))
            .unwrap();
        assert_eq!(record["contact"], json!(null));
        assert_eq!(record["kind"], json!("b"));
    }

    #[test]
    fn partial_rejects_null_required_and_empty_candidates() {
        let err = sample().validate_partial(&json!({"name": null})).unwrap_err();
        assert!(err.has_field("name"));

        let err = sample().validate_partial(&json!({"unrelated": 1})).unwrap_err();
        assert!(err.has_field("*"));
    }

    #[test]
    fn non_object_candidate_fails() {
        assert!(sample().validate(&json!([1, 2])).is_err());
    }

    #[test]
    fn enum_lists_point_at_the_bad_item() {
        let schema = Schema::new("list").required("tags", FieldKind::EnumList(&["x", "y"]));
        let err = schema.validate(&json!({"tags": ["x", "z"]})).unwrap_err();
        assert_eq!(err.fields(), vec!["tags[1]"]);
    }

    #[test]
    fn results_check_each_entry() {
        let schema = Schema::new("results").optional("results", FieldKind::Results);
        let ok = schema.validate(&json!({
            "results": [{"teamName": "A", "rank": 1, "score": 9.5}]
        }));
        assert!(ok.is_ok());
        let err = schema
            .validate(&json!({"results": [{"teamName": "A", "rank": -1}]}))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["results[0].rank", "results[0].score"]);
    }

    #[test]
    fn result_rank_must_fit_u32() {
        let schema = Schema::new("results").optional("results", FieldKind::Results);
        let err = schema
            .validate(&json!({
                "results": [{"teamName": "A", "rank": 5_000_000_000u64, "score": 1.0}]
            }))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["results[0].rank"]);

        let max = schema.validate(&json!({
            "results": [{"teamName": "A", "rank": u32::MAX, "score": 1.0}]
        }));
        assert!(max.is_ok());
    }
}
