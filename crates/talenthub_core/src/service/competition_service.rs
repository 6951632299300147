//! Competition use-case service.
//!
//! # Responsibility
//! - Validated CRUD over `competitions`.
//! - Maintain the `competition_participants` join collection and fill
//!   `Competition::participants` on join-aware reads.
//!
//! # Invariants
//! - Plain reads (`get_all`, `get_by_id`, filters) leave `participants`
//!   empty.
//! - Creating a competition and enrolling participants are independent
//!   writes; there is no rollback between them.

use super::{CrudService, Entity, ServiceError, ServiceResult};
use crate::mapper::{Mapper, COMPETITION_MAPPER, COMPETITION_PARTICIPANT_MAPPER};
use crate::model::{
    timestamp, Competition, CompetitionId, CompetitionPatch, CompetitionResult, Discipline,
    NewCompetition, Status, TalentId,
};
use crate::repo::Repository;
use crate::schema::{competition_schema, Schema};
use crate::store::{Filter, Row, SortDir, StoreClient};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const PARTICIPANTS: &str = "competition_participants";
const PARTICIPANTS_ALIAS: &str = "participants";

pub struct CompetitionEntity;

impl Entity for CompetitionEntity {
    type Record = Competition;
    type New = NewCompetition;
    type Patch = CompetitionPatch;

    const NAME: &'static str = "competition";
    const COLLECTION: &'static str = "competitions";
    const MAPPER: Mapper = COMPETITION_MAPPER;
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "description", "location"];
    const ORDER: &'static [(&'static str, SortDir)] = &[("date", SortDir::Asc)];

    fn schema() -> &'static Schema {
        competition_schema()
    }
}

/// Row of the join collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Participant {
    competition_id: CompetitionId,
    talent_id: TalentId,
}

pub struct CompetitionService<'a, S: StoreClient + ?Sized> {
    crud: CrudService<'a, S, CompetitionEntity>,
    participants: Repository<'a, S>,
}

impl<'a, S: StoreClient + ?Sized> CompetitionService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            crud: CrudService::new(store),
            participants: Repository::new(store, PARTICIPANTS),
        }
    }

    pub fn crud(&self) -> &CrudService<'a, S, CompetitionEntity> {
        &self.crud
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Competition>> {
        self.crud.get_all()
    }

    pub fn get_by_id(&self, id: CompetitionId) -> ServiceResult<Competition> {
        self.crud.get_by_id(id)
    }

    pub fn create(&self, input: &NewCompetition) -> ServiceResult<Competition> {
        self.crud.create(input)
    }

    pub fn create_value(&self, candidate: &Value) -> ServiceResult<Competition> {
        self.crud.create_value(candidate)
    }

    pub fn update(
        &self,
        id: CompetitionId,
        patch: &CompetitionPatch,
    ) -> ServiceResult<Competition> {
        self.crud.update(id, patch)
    }

    pub fn update_value(&self, id: CompetitionId, candidate: &Value) -> ServiceResult<Competition> {
        self.crud.update_value(id, candidate)
    }

    pub fn delete(&self, id: CompetitionId) -> ServiceResult<()> {
        self.crud.delete(id)
    }

    /// Competitions dated now or later, soonest first.
    pub fn get_upcoming_competitions(&self) -> ServiceResult<Vec<Competition>> {
        self.crud
            .find_by(&self.crud.query().filter(Filter::gte("date", timestamp::now())))
    }

    pub fn get_competitions_by_status(&self, status: Status) -> ServiceResult<Vec<Competition>> {
        self.crud.find_by_field("status", status.as_str())
    }

    pub fn get_competitions_by_discipline(
        &self,
        discipline: Discipline,
    ) -> ServiceResult<Vec<Competition>> {
        self.crud.find_by(
            &self
                .crud
                .query()
                .filter(Filter::contains("disciplines", discipline.as_str())),
        )
    }

    /// Competitions the talent is enrolled in, with participants filled.
    ///
    /// Two round trips: the join collection first, then the competitions.
    pub fn get_competitions_by_participant(
        &self,
        talent_id: TalentId,
    ) -> ServiceResult<Vec<Competition>> {
        let enrolled: Vec<String> = self
            .participant_rows(Filter::eq("talent_id", talent_id.to_string()))?
            .iter()
            .map(|participant| participant.competition_id.to_string())
            .collect();
        if enrolled.is_empty() {
            return Ok(Vec::new());
        }

        let query = self
            .crud
            .query()
            .filter(Filter::is_in("id", enrolled))
            .embed(PARTICIPANTS, "competition_id", PARTICIPANTS_ALIAS);
        let rows = self.crud.repo().fetch(&query)?;
        rows.iter().map(|row| self.decode_with_participants(row)).collect()
    }

    pub fn search(&self, text: &str) -> ServiceResult<Vec<Competition>> {
        self.crud.search(text)
    }

    /// Enrolls a talent. Enrolling twice is a storage error (duplicate key).
    pub fn add_participant(
        &self,
        competition_id: CompetitionId,
        talent_id: TalentId,
    ) -> ServiceResult<()> {
        let row = COMPETITION_PARTICIPANT_MAPPER
            .to_storage(&Participant {
                competition_id,
                talent_id,
            })
            .map_err(|err| ServiceError::invalid_data("competition participant", err))?;
        self.participants.create(row)?;
        Ok(())
    }

    /// Removes an enrollment; removing an absent one succeeds.
    pub fn remove_participant(
        &self,
        competition_id: CompetitionId,
        talent_id: TalentId,
    ) -> ServiceResult<()> {
        self.participants.delete_matching(&[
            Filter::eq("competition_id", competition_id.to_string()),
            Filter::eq("talent_id", talent_id.to_string()),
        ])?;
        Ok(())
    }

    /// Talent IDs enrolled in the competition, in enrollment order.
    pub fn get_participants(&self, competition_id: CompetitionId) -> ServiceResult<Vec<TalentId>> {
        Ok(self
            .participant_rows(Filter::eq("competition_id", competition_id.to_string()))?
            .into_iter()
            .map(|participant| participant.talent_id)
            .collect())
    }

    pub fn get_competition_with_participants(
        &self,
        id: CompetitionId,
    ) -> ServiceResult<Competition> {
        let query = self
            .crud
            .repo()
            .query()
            .filter(Filter::eq("id", id.to_string()))
            .embed(PARTICIPANTS, "competition_id", PARTICIPANTS_ALIAS);
        match self.crud.repo().fetch(&query)?.first() {
            Some(row) => self.decode_with_participants(row),
            None => Err(ServiceError::NotFound {
                collection: CompetitionEntity::COLLECTION,
                key: format!("id={id}"),
            }),
        }
    }

    /// Replaces the result table.
    pub fn update_results(
        &self,
        id: CompetitionId,
        results: &[CompetitionResult],
    ) -> ServiceResult<Competition> {
        self.crud.update_value(id, &json!({ "results": results }))
    }

    /// Moves the competition forward in its lifecycle.
    pub fn update_status(&self, id: CompetitionId, status: Status) -> ServiceResult<Competition> {
        let current = self.crud.get_by_id(id)?;
        if !current.status.can_transition_to(status) {
            return Err(ServiceError::InvalidTransition {
                entity: CompetitionEntity::NAME,
                from: current.status,
                to: status,
            });
        }
        self.crud.update_value(id, &json!({ "status": status.as_str() }))
    }

    fn participant_rows(&self, filter: Filter) -> ServiceResult<Vec<Participant>> {
        let rows = self.participants.fetch(&self.participants.query().filter(filter))?;
        rows.iter().map(decode_participant).collect()
    }

    fn decode_with_participants(&self, row: &Row) -> ServiceResult<Competition> {
        let mut competition = self.crud.decode(row)?;
        if let Some(Value::Array(embedded)) = row.get(PARTICIPANTS_ALIAS) {
            for entry in embedded {
                if let Value::Object(entry) = entry {
                    competition.participants.push(decode_participant(entry)?.talent_id);
                }
            }
        }
        Ok(competition)
    }
}

fn decode_participant(row: &Row) -> ServiceResult<Participant> {
    COMPETITION_PARTICIPANT_MAPPER
        .from_storage(row)
        .map_err(|err| ServiceError::invalid_data("competition participant", err))
}
