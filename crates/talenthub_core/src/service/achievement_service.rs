//! Achievement use-case service.

use super::{CrudService, Entity, ServiceResult};
use crate::mapper::{Mapper, ACHIEVEMENT_MAPPER};
use crate::model::{
    Achievement, AchievementCategory, AchievementId, AchievementPatch, Discipline, NewAchievement,
    TalentId,
};
use crate::schema::{achievement_schema, Schema};
use crate::store::{SortDir, StoreClient};
use serde_json::Value;

pub struct AchievementEntity;

impl Entity for AchievementEntity {
    type Record = Achievement;
    type New = NewAchievement;
    type Patch = AchievementPatch;

    const NAME: &'static str = "achievement";
    const COLLECTION: &'static str = "achievements";
    const MAPPER: Mapper = ACHIEVEMENT_MAPPER;
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "description"];
    const ORDER: &'static [(&'static str, SortDir)] = &[("awarded_at", SortDir::Desc)];

    fn schema() -> &'static Schema {
        achievement_schema()
    }
}

/// Achievements, newest award first.
pub struct AchievementService<'a, S: StoreClient + ?Sized> {
    crud: CrudService<'a, S, AchievementEntity>,
}

impl<'a, S: StoreClient + ?Sized> AchievementService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            crud: CrudService::new(store),
        }
    }

    pub fn crud(&self) -> &CrudService<'a, S, AchievementEntity> {
        &self.crud
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Achievement>> {
        self.crud.get_all()
    }

    pub fn get_by_id(&self, id: AchievementId) -> ServiceResult<Achievement> {
        self.crud.get_by_id(id)
    }

    pub fn create(&self, input: &NewAchievement) -> ServiceResult<Achievement> {
        self.crud.create(input)
    }

    pub fn create_value(&self, candidate: &Value) -> ServiceResult<Achievement> {
        self.crud.create_value(candidate)
    }

    pub fn update(
        &self,
        id: AchievementId,
        patch: &AchievementPatch,
    ) -> ServiceResult<Achievement> {
        self.crud.update(id, patch)
    }

    pub fn update_value(&self, id: AchievementId, candidate: &Value) -> ServiceResult<Achievement> {
        self.crud.update_value(id, candidate)
    }

    pub fn delete(&self, id: AchievementId) -> ServiceResult<()> {
        self.crud.delete(id)
    }

    pub fn get_achievements_by_talent(
        &self,
        talent_id: TalentId,
    ) -> ServiceResult<Vec<Achievement>> {
        self.crud.find_by_field("talent_id", talent_id.to_string())
    }

    pub fn get_achievements_by_category(
        &self,
        category: AchievementCategory,
    ) -> ServiceResult<Vec<Achievement>> {
        self.crud.find_by_field("category", category.as_str())
    }

    pub fn get_achievements_by_discipline(
        &self,
        discipline: Discipline,
    ) -> ServiceResult<Vec<Achievement>> {
        self.crud.find_by_field("discipline", discipline.as_str())
    }

    /// Matches title or description, case-insensitively.
    pub fn search(&self, text: &str) -> ServiceResult<Vec<Achievement>> {
        self.crud.search(text)
    }
}
