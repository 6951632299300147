//! Success story use-case service.

use super::{CrudService, Entity, ServiceResult};
use crate::mapper::{Mapper, SUCCESS_STORY_MAPPER};
use crate::model::{
    Discipline, NewSuccessStory, SuccessStory, SuccessStoryId, SuccessStoryPatch, TalentId,
};
use crate::schema::{success_story_schema, Schema};
use crate::store::{Filter, SortDir, StoreClient};
use serde_json::Value;

pub struct SuccessStoryEntity;

impl Entity for SuccessStoryEntity {
    type Record = SuccessStory;
    type New = NewSuccessStory;
    type Patch = SuccessStoryPatch;

    const NAME: &'static str = "success story";
    const COLLECTION: &'static str = "success_stories";
    const MAPPER: Mapper = SUCCESS_STORY_MAPPER;
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "content"];
    const ORDER: &'static [(&'static str, SortDir)] = &[("publish_date", SortDir::Desc)];

    fn schema() -> &'static Schema {
        success_story_schema()
    }
}

/// Published stories, most recent first.
pub struct SuccessStoryService<'a, S: StoreClient + ?Sized> {
    crud: CrudService<'a, S, SuccessStoryEntity>,
}

impl<'a, S: StoreClient + ?Sized> SuccessStoryService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            crud: CrudService::new(store),
        }
    }

    pub fn crud(&self) -> &CrudService<'a, S, SuccessStoryEntity> {
        &self.crud
    }

    pub fn get_all(&self) -> ServiceResult<Vec<SuccessStory>> {
        self.crud.get_all()
    }

    pub fn get_by_id(&self, id: SuccessStoryId) -> ServiceResult<SuccessStory> {
        self.crud.get_by_id(id)
    }

    pub fn create(&self, input: &NewSuccessStory) -> ServiceResult<SuccessStory> {
        self.crud.create(input)
    }

    pub fn create_value(&self, candidate: &Value) -> ServiceResult<SuccessStory> {
        self.crud.create_value(candidate)
    }

    pub fn update(
        &self,
        id: SuccessStoryId,
        patch: &SuccessStoryPatch,
    ) -> ServiceResult<SuccessStory> {
        self.crud.update(id, patch)
    }

    pub fn update_value(
        &self,
        id: SuccessStoryId,
        candidate: &Value,
    ) -> ServiceResult<SuccessStory> {
        self.crud.update_value(id, candidate)
    }

    pub fn delete(&self, id: SuccessStoryId) -> ServiceResult<()> {
        self.crud.delete(id)
    }

    pub fn get_success_stories_by_talent(
        &self,
        talent_id: TalentId,
    ) -> ServiceResult<Vec<SuccessStory>> {
        self.crud.find_by_field("talent_id", talent_id.to_string())
    }

    pub fn get_success_stories_by_discipline(
        &self,
        discipline: Discipline,
    ) -> ServiceResult<Vec<SuccessStory>> {
        self.crud.find_by_field("discipline", discipline.as_str())
    }

    /// Stories whose tag list contains `tag` exactly.
    pub fn get_success_stories_by_tag(&self, tag: &str) -> ServiceResult<Vec<SuccessStory>> {
        self.crud
            .find_by(&self.crud.query().filter(Filter::contains("tags", tag)))
    }

    pub fn search(&self, text: &str) -> ServiceResult<Vec<SuccessStory>> {
        self.crud.search(text)
    }
}
