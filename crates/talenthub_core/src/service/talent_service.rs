//! Talent use-case service.
//!
//! # Responsibility
//! - Validated CRUD over `talents`.
//! - Assemble the talent detail views from the related services.
//!
//! # Invariants
//! - Detail views fail as a whole when any part fails; no partial result
//!   is ever returned.

use super::{
    AchievementService, CompetitionService, CrudService, Entity, ServiceResult,
    SuccessStoryService,
};
use crate::mapper::{Mapper, TALENT_MAPPER};
use crate::model::{
    Achievement, Competition, Discipline, NewTalent, Stage, SuccessStory, Talent, TalentDetails,
    TalentId, TalentPatch, Team,
};
use crate::schema::{talent_schema, Schema};
use crate::store::{Filter, SortDir, StoreClient};
use serde_json::Value;

pub struct TalentEntity;

impl Entity for TalentEntity {
    type Record = Talent;
    type New = NewTalent;
    type Patch = TalentPatch;

    const NAME: &'static str = "talent";
    const COLLECTION: &'static str = "talents";
    const MAPPER: Mapper = TALENT_MAPPER;
    const SEARCH_COLUMNS: &'static [&'static str] =
        &["first_name", "last_name", "contact_email", "bio"];
    const ORDER: &'static [(&'static str, SortDir)] =
        &[("last_name", SortDir::Asc), ("first_name", SortDir::Asc)];

    fn schema() -> &'static Schema {
        talent_schema()
    }
}

pub struct TalentService<'a, S: StoreClient + ?Sized> {
    store: &'a S,
    crud: CrudService<'a, S, TalentEntity>,
}

impl<'a, S: StoreClient + ?Sized> TalentService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            crud: CrudService::new(store),
        }
    }

    pub fn crud(&self) -> &CrudService<'a, S, TalentEntity> {
        &self.crud
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Talent>> {
        self.crud.get_all()
    }

    pub fn get_by_id(&self, id: TalentId) -> ServiceResult<Talent> {
        self.crud.get_by_id(id)
    }

    pub fn create(&self, input: &NewTalent) -> ServiceResult<Talent> {
        self.crud.create(input)
    }

    pub fn create_value(&self, candidate: &Value) -> ServiceResult<Talent> {
        self.crud.create_value(candidate)
    }

    pub fn update(&self, id: TalentId, patch: &TalentPatch) -> ServiceResult<Talent> {
        self.crud.update(id, patch)
    }

    pub fn update_value(&self, id: TalentId, candidate: &Value) -> ServiceResult<Talent> {
        self.crud.update_value(id, candidate)
    }

    /// Hard delete. Fails with a storage error while achievements or
    /// success stories still reference the talent.
    pub fn delete(&self, id: TalentId) -> ServiceResult<()> {
        self.crud.delete(id)
    }

    pub fn find_by_discipline(&self, discipline: Discipline) -> ServiceResult<Vec<Talent>> {
        self.crud.find_by_field("discipline", discipline.as_str())
    }

    pub fn find_by_team(&self, team: Team) -> ServiceResult<Vec<Talent>> {
        self.crud.find_by_field("team", team.as_str())
    }

    pub fn find_by_stage(&self, stage: Stage) -> ServiceResult<Vec<Talent>> {
        self.crud.find_by_field("current_stage", stage.as_str())
    }

    /// Matches first name, last name, contact email or bio.
    pub fn search(&self, text: &str) -> ServiceResult<Vec<Talent>> {
        self.crud.search(text)
    }

    pub fn get_talent_with_achievements(
        &self,
        id: TalentId,
    ) -> ServiceResult<(Talent, Vec<Achievement>)> {
        let talent = self.crud.get_by_id(id)?;
        let achievements = AchievementService::new(self.store).get_achievements_by_talent(id)?;
        Ok((talent, achievements))
    }

    pub fn get_talent_with_success_stories(
        &self,
        id: TalentId,
    ) -> ServiceResult<(Talent, Vec<SuccessStory>)> {
        let talent = self.crud.get_by_id(id)?;
        let stories = SuccessStoryService::new(self.store).get_success_stories_by_talent(id)?;
        Ok((talent, stories))
    }

    pub fn get_talent_with_competitions(
        &self,
        id: TalentId,
    ) -> ServiceResult<(Talent, Vec<Competition>)> {
        let talent = self.crud.get_by_id(id)?;
        let competitions = CompetitionService::new(self.store).get_competitions_by_participant(id)?;
        Ok((talent, competitions))
    }

    pub fn get_talent_with_all_details(&self, id: TalentId) -> ServiceResult<TalentDetails> {
        let talent = self.crud.get_by_id(id)?;
        let achievements = AchievementService::new(self.store).get_achievements_by_talent(id)?;
        let success_stories =
            SuccessStoryService::new(self.store).get_success_stories_by_talent(id)?;
        let competitions = CompetitionService::new(self.store).get_competitions_by_participant(id)?;
        Ok(TalentDetails {
            talent,
            achievements,
            success_stories,
            competitions,
        })
    }

    /// Talent count per discipline, every discipline listed.
    pub fn discipline_distribution(&self) -> ServiceResult<Vec<(Discipline, usize)>> {
        let repo = self.crud.repo();
        Discipline::ALL
            .iter()
            .map(|discipline| -> ServiceResult<(Discipline, usize)> {
                let query = repo
                    .query()
                    .filter(Filter::eq("discipline", discipline.as_str()));
                Ok((*discipline, repo.count(&query)?))
            })
            .collect()
    }
}
