//! Screen-level state containers.
//!
//! Each container runs one service call at a time, keeps the last error
//! message for display and returns the error to the caller as well.

use crate::model::{
    Achievement, Competition, DisplayKey, EmailFrequency, Event, NotificationKey, Report,
    Settings, SuccessStory, Talent,
};
use crate::service::{ServiceResult, SettingsService};
use crate::store::StoreClient;
use uuid::Uuid;

/// Entities addressable by their store-assigned id.
pub trait Identified {
    fn id(&self) -> Uuid;
}

macro_rules! identified {
    ($($entity:ty),+ $(,)?) => {
        $(impl Identified for $entity {
            fn id(&self) -> Uuid {
                self.id
            }
        })+
    };
}

identified!(Talent, Event, Achievement, Competition, SuccessStory, Report);

fn track<R>(
    loading: &mut bool,
    error: &mut Option<String>,
    op: impl FnOnce() -> ServiceResult<R>,
) -> ServiceResult<R> {
    *loading = true;
    let result = op();
    *loading = false;
    match &result {
        Ok(_) => *error = None,
        Err(err) => *error = Some(err.to_string()),
    }
    result
}

/// Local list of one entity kind kept in step with the store.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T: Identified + Clone> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the list with a fresh fetch. On failure the previous items
    /// stay.
    pub fn load(&mut self, fetch: impl FnOnce() -> ServiceResult<Vec<T>>) -> ServiceResult<&[T]> {
        let items = track(&mut self.loading, &mut self.error, fetch)?;
        self.items = items;
        Ok(&self.items)
    }

    /// Appends the created item.
    pub fn create(&mut self, create: impl FnOnce() -> ServiceResult<T>) -> ServiceResult<T> {
        let created = track(&mut self.loading, &mut self.error, create)?;
        self.items.push(created.clone());
        Ok(created)
    }

    /// Replaces the item with the same id.
    pub fn update(&mut self, update: impl FnOnce() -> ServiceResult<T>) -> ServiceResult<T> {
        let updated = track(&mut self.loading, &mut self.error, update)?;
        if let Some(slot) = self.items.iter_mut().find(|item| item.id() == updated.id()) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Removes the item once the store confirmed the delete.
    pub fn delete(
        &mut self,
        id: Uuid,
        delete: impl FnOnce() -> ServiceResult<()>,
    ) -> ServiceResult<()> {
        track(&mut self.loading, &mut self.error, delete)?;
        self.items.retain(|item| item.id() != id);
        Ok(())
    }
}

/// Settings screen state: defaults until the first fetch.
pub struct SettingsState<'a, S: StoreClient + ?Sized> {
    service: SettingsService<'a, S>,
    settings: Settings,
    loading: bool,
    error: Option<String>,
}

impl<'a, S: StoreClient + ?Sized> SettingsState<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            service: SettingsService::new(store),
            settings: Settings::default(),
            loading: false,
            error: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn fetch(&mut self) -> ServiceResult<&Settings> {
        let service = &self.service;
        self.settings = track(&mut self.loading, &mut self.error, || service.get_user_settings())?;
        Ok(&self.settings)
    }

    pub fn set_notification(
        &mut self,
        key: NotificationKey,
        value: bool,
    ) -> ServiceResult<&Settings> {
        let service = &self.service;
        self.settings = track(&mut self.loading, &mut self.error, || {
            service.update_notification_setting(key, value)
        })?;
        Ok(&self.settings)
    }

    pub fn set_display(&mut self, key: DisplayKey, value: bool) -> ServiceResult<&Settings> {
        let service = &self.service;
        self.settings = track(&mut self.loading, &mut self.error, || {
            service.update_display_setting(key, value)
        })?;
        Ok(&self.settings)
    }

    pub fn set_email(
        &mut self,
        email: &str,
        frequency: EmailFrequency,
    ) -> ServiceResult<&Settings> {
        let service = &self.service;
        self.settings = track(&mut self.loading, &mut self.error, || {
            service.update_email_settings(email, frequency)
        })?;
        Ok(&self.settings)
    }
}
