//! Per-user preferences.
//!
//! # Invariants
//! - One settings object per authenticated user.
//! - Missing groups fall back to [`Settings::default`] values.

use super::enums::EmailFrequency;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
    pub achievements: bool,
    pub events: bool,
    pub competitions: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            achievements: true,
            events: true,
            competitions: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplaySettings {
    pub dark_mode: bool,
    pub compact_view: bool,
    pub show_images: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            compact_view: false,
            show_images: true,
        }
    }
}

/// Digest email preference. An empty address means "not configured".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailSettings {
    pub email: String,
    pub frequency: EmailFrequency,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            email: String::new(),
            frequency: EmailFrequency::Daily,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub notifications: NotificationSettings,
    pub display: DisplaySettings,
    pub email: EmailSettings,
}

/// Single toggle inside [`NotificationSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKey {
    Email,
    Push,
    Achievements,
    Events,
    Competitions,
}

/// Single toggle inside [`DisplaySettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKey {
    DarkMode,
    CompactView,
    ShowImages,
}

impl NotificationSettings {
    pub fn set(&mut self, key: NotificationKey, value: bool) {
        match key {
            NotificationKey::Email => self.email = value,
            NotificationKey::Push => self.push = value,
            NotificationKey::Achievements => self.achievements = value,
            NotificationKey::Events => self.events = value,
            NotificationKey::Competitions => self.competitions = value,
        }
    }
}

impl DisplaySettings {
    pub fn set(&mut self, key: DisplayKey, value: bool) {
        match key {
            DisplayKey::DarkMode => self.dark_mode = value,
            DisplayKey::CompactView => self.compact_view = value,
            DisplayKey::ShowImages => self.show_images = value,
        }
    }
}
