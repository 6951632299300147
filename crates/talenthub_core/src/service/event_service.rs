//! Event use-case service.
//!
//! # Invariants
//! - `end_date >= start_date`, also when an update touches only one side.
//! - Status moves forward only (`Upcoming -> In Progress -> Completed`).
//! - "Upcoming" queries compare `start_date` with the current time; they do
//!   not consult `status`.
//! - `Event::participants` is filled only by join-aware reads over
//!   `event_participants`.

use super::{CrudService, Entity, ServiceError, ServiceResult};
use crate::mapper::{Mapper, EVENT_MAPPER, EVENT_PARTICIPANT_MAPPER};
use crate::model::{
    timestamp, Discipline, Event, EventId, EventPatch, NewEvent, Status, TalentId, Team,
};
use crate::repo::Repository;
use crate::schema::{event_schema, FieldIssue, Schema, ValidationError};
use crate::store::{Filter, Row, SortDir, StoreClient};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const PARTICIPANTS: &str = "event_participants";
const PARTICIPANTS_ALIAS: &str = "participants";

pub struct EventEntity;

impl Entity for EventEntity {
    type Record = Event;
    type New = NewEvent;
    type Patch = EventPatch;

    const NAME: &'static str = "event";
    const COLLECTION: &'static str = "events";
    const MAPPER: Mapper = EVENT_MAPPER;
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "description", "location"];
    const ORDER: &'static [(&'static str, SortDir)] = &[("start_date", SortDir::Asc)];

    fn schema() -> &'static Schema {
        event_schema()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Attendee {
    event_id: EventId,
    talent_id: TalentId,
}

pub struct EventService<'a, S: StoreClient + ?Sized> {
    crud: CrudService<'a, S, EventEntity>,
    participants: Repository<'a, S>,
}

impl<'a, S: StoreClient + ?Sized> EventService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            crud: CrudService::new(store),
            participants: Repository::new(store, PARTICIPANTS),
        }
    }

    pub fn crud(&self) -> &CrudService<'a, S, EventEntity> {
        &self.crud
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Event>> {
        self.crud.get_all()
    }

    pub fn get_by_id(&self, id: EventId) -> ServiceResult<Event> {
        self.crud.get_by_id(id)
    }

    pub fn create(&self, input: &NewEvent) -> ServiceResult<Event> {
        self.crud.create(input)
    }

    pub fn create_value(&self, candidate: &Value) -> ServiceResult<Event> {
        self.crud.create_value(candidate)
    }

    pub fn update(&self, id: EventId, patch: &EventPatch) -> ServiceResult<Event> {
        let candidate = serde_json::to_value(patch).map_err(|err| ServiceError::InvalidData {
            entity: EventEntity::NAME,
            message: err.to_string(),
        })?;
        self.update_value(id, &candidate)
    }

    /// Partial update. When only one of `startDate`/`endDate` changes, the
    /// stored other side is checked too.
    pub fn update_value(&self, id: EventId, candidate: &Value) -> ServiceResult<Event> {
        event_schema().validate_partial(candidate)?;
        let start = candidate.get("startDate");
        let end = candidate.get("endDate");
        if start.is_some() != end.is_some() {
            let current = self.crud.get_by_id(id)?;
            let start = changed_or(start, current.start_date);
            let end = changed_or(end, current.end_date);
            if let (Some(start), Some(end)) = (start, end) {
                if end < start {
                    return Err(ValidationError {
                        entity: EventEntity::NAME,
                        issues: vec![FieldIssue::new(
                            "endDate",
                            "timestamp not earlier than startDate",
                        )],
                    }
                    .into());
                }
            }
        }
        self.crud.update_value(id, candidate)
    }

    pub fn delete(&self, id: EventId) -> ServiceResult<()> {
        self.crud.delete(id)
    }

    /// Events starting now or later, soonest first.
    pub fn get_upcoming_events(&self) -> ServiceResult<Vec<Event>> {
        self.crud
            .find_by(&self.crud.query().filter(Filter::gte("start_date", timestamp::now())))
    }

    pub fn get_events_by_status(&self, status: Status) -> ServiceResult<Vec<Event>> {
        self.crud.find_by_field("status", status.as_str())
    }

    pub fn get_events_by_discipline(&self, discipline: Discipline) -> ServiceResult<Vec<Event>> {
        let query = self
            .crud
            .query()
            .filter(Filter::contains("disciplines", discipline.as_str()));
        self.crud.find_by(&query)
    }

    pub fn get_events_by_team(&self, team: Team) -> ServiceResult<Vec<Event>> {
        self.crud
            .find_by(&self.crud.query().filter(Filter::contains("teams", team.as_str())))
    }

    /// Matches title, description or location, case-insensitively.
    pub fn search(&self, text: &str) -> ServiceResult<Vec<Event>> {
        self.crud.search(text)
    }

    /// Moves the event forward in its lifecycle.
    pub fn update_status(&self, id: EventId, status: Status) -> ServiceResult<Event> {
        let current = self.crud.get_by_id(id)?;
        if !current.status.can_transition_to(status) {
            return Err(ServiceError::InvalidTransition {
                entity: EventEntity::NAME,
                from: current.status,
                to: status,
            });
        }
        self.crud.update_value(id, &json!({ "status": status.as_str() }))
    }

    /// Registers a talent for the event. Registering twice is a storage
    /// error (duplicate key).
    pub fn add_participant(&self, event_id: EventId, talent_id: TalentId) -> ServiceResult<()> {
        let row = EVENT_PARTICIPANT_MAPPER
            .to_storage(&Attendee { event_id, talent_id })
            .map_err(|err| ServiceError::invalid_data("event participant", err))?;
        self.participants.create(row)?;
        Ok(())
    }

    /// Removing an absent registration succeeds.
    pub fn remove_participant(&self, event_id: EventId, talent_id: TalentId) -> ServiceResult<()> {
        self.participants.delete_matching(&[
            Filter::eq("event_id", event_id.to_string()),
            Filter::eq("talent_id", talent_id.to_string()),
        ])?;
        Ok(())
    }

    /// Talent IDs registered for the event, in registration order.
    pub fn get_participants(&self, event_id: EventId) -> ServiceResult<Vec<TalentId>> {
        let query = self
            .participants
            .query()
            .filter(Filter::eq("event_id", event_id.to_string()));
        self.participants
            .fetch(&query)?
            .iter()
            .map(|row| decode_attendee(row).map(|attendee| attendee.talent_id))
            .collect()
    }

    pub fn get_event_with_participants(&self, id: EventId) -> ServiceResult<Event> {
        let query = self
            .crud
            .repo()
            .query()
            .filter(Filter::eq("id", id.to_string()))
            .embed(PARTICIPANTS, "event_id", PARTICIPANTS_ALIAS);
        let Some(row) = self.crud.repo().fetch(&query)?.into_iter().next() else {
            return Err(ServiceError::NotFound {
                collection: EventEntity::COLLECTION,
                key: format!("id={id}"),
            });
        };
        let mut event = self.crud.decode(&row)?;
        if let Some(Value::Array(embedded)) = row.get(PARTICIPANTS_ALIAS) {
            for entry in embedded.iter().filter_map(Value::as_object) {
                event.participants.push(decode_attendee(entry)?.talent_id);
            }
        }
        Ok(event)
    }
}

fn decode_attendee(row: &Row) -> ServiceResult<Attendee> {
    EVENT_PARTICIPANT_MAPPER
        .from_storage(row)
        .map_err(|err| ServiceError::invalid_data("event participant", err))
}

// Unparseable values are left to the schema, which already rejected them.
fn changed_or(changed: Option<&Value>, stored: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match changed {
        Some(value) => value.as_str().and_then(|text| timestamp::parse(text).ok()),
        None => Some(stored),
    }
}
