//! Per-user settings service.
//!
//! # Responsibility
//! - Read and write the session user's notification, display and email
//!   preferences stored on their `profiles` row.
//!
//! # Invariants
//! - A user without a stored record gets [`Settings::default`], not an error.
//! - Every write replaces the whole settings object; single-field helpers
//!   read, merge one change and write everything back.
//! - Without a session user every call fails with `Unauthenticated`.

use super::{ServiceError, ServiceResult};
use crate::mapper::PROFILE_MAPPER;
use crate::model::{DisplayKey, EmailFrequency, NotificationKey, Settings};
use crate::repo::{RepoError, Repository};
use crate::schema::settings_schema;
use crate::store::StoreClient;
use serde_json::Value;

const PROFILES: &str = "profiles";
const ENTITY: &str = "settings";

pub struct SettingsService<'a, S: StoreClient + ?Sized> {
    store: &'a S,
    profiles: Repository<'a, S>,
}

impl<'a, S: StoreClient + ?Sized> SettingsService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            profiles: Repository::new(store, PROFILES),
        }
    }

    /// Settings returned for users who never saved any.
    pub fn default_settings() -> Settings {
        Settings::default()
    }

    pub fn get_user_settings(&self) -> ServiceResult<Settings> {
        let user = self.session_user()?;
        match self.profiles.get_by_id(&user) {
            Ok(row) => PROFILE_MAPPER
                .from_storage(&row)
                .map_err(|err| ServiceError::invalid_data(ENTITY, err)),
            Err(RepoError::NotFound { .. }) => Ok(Self::default_settings()),
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces the stored settings, creating the profile row on first save.
    pub fn update_user_settings(&self, settings: &Settings) -> ServiceResult<Settings> {
        let user = self.session_user()?;
        let candidate = serde_json::to_value(settings).map_err(|err| ServiceError::InvalidData {
            entity: ENTITY,
            message: err.to_string(),
        })?;
        let record = settings_schema().validate(&candidate)?;
        let row = PROFILE_MAPPER.record_to_storage(record);

        let saved = match self.profiles.update(&user, row.clone()) {
            Ok(saved) => saved,
            Err(RepoError::NotFound { .. }) => {
                let mut row = row;
                row.insert("id".to_string(), Value::String(user));
                self.profiles.create(row)?
            }
            Err(err) => return Err(err.into()),
        };

        PROFILE_MAPPER
            .from_storage(&saved)
            .map_err(|err| ServiceError::invalid_data(ENTITY, err))
    }

    pub fn update_notification_setting(
        &self,
        key: NotificationKey,
        value: bool,
    ) -> ServiceResult<Settings> {
        let mut settings = self.get_user_settings()?;
        settings.notifications.set(key, value);
        self.update_user_settings(&settings)
    }

    pub fn update_display_setting(&self, key: DisplayKey, value: bool) -> ServiceResult<Settings> {
        let mut settings = self.get_user_settings()?;
        settings.display.set(key, value);
        self.update_user_settings(&settings)
    }

    /// An empty address means "not configured".
    pub fn update_email_settings(
        &self,
        email: &str,
        frequency: EmailFrequency,
    ) -> ServiceResult<Settings> {
        let mut settings = self.get_user_settings()?;
        settings.email.email = email.to_string();
        settings.email.frequency = frequency;
        self.update_user_settings(&settings)
    }

    fn session_user(&self) -> ServiceResult<String> {
        self.store.current_user().ok_or(ServiceError::Unauthenticated)
    }
}
