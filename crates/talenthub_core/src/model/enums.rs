//! Closed value sets shared by talent-domain entities.
//!
//! # Responsibility
//! - Define every enumerated field with its exact wire string.
//! - Provide parse/format helpers used by schema validation and queries.
//!
//! # Invariants
//! - Wire strings are case-sensitive and never localized.
//! - Storage persists these as plain strings; this module is the only
//!   enforcement point.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Error returned when a string is not part of a closed value set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{value}` is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            /// Every declared value in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire strings in declaration order.
            pub const WIRE_VALUES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum! {
    /// Activity a talent is developed in.
    Discipline as "discipline" {
        Football => "Football",
        Athletics => "Athletics",
        Basketball => "Basketball",
        Karate => "Karate",
        ModernDance => "Modern Dance",
        TraditionalDance => "Traditional Dance",
        Orchestra => "Orchestra",
        Swimming => "Swimming",
    }
}

closed_enum! {
    /// Age/level group a talent trains with.
    Team as "team" {
        Academy => "Academy",
        U18 => "U18",
        Senior => "Senior",
    }
}

closed_enum! {
    /// Progression ladder. Declaration order is ladder order.
    #[derive(PartialOrd, Ord)]
    Stage as "stage" {
        Beginner => "Beginner",
        Developing => "Developing",
        Advanced => "Advanced",
        Elite => "Elite",
        Professional => "Professional",
    }
}

closed_enum! {
    /// Lifecycle of events and competitions.
    #[derive(PartialOrd, Ord)]
    Status as "status" {
        Upcoming => "Upcoming",
        InProgress => "In Progress",
        Completed => "Completed",
    }
}

closed_enum! {
    AchievementCategory as "achievement category" {
        Competition => "Competition",
        Recognition => "Recognition",
        Record => "Record",
        Progression => "Progression",
    }
}

closed_enum! {
    Gender as "gender" {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

closed_enum! {
    /// How often digest emails are sent.
    EmailFrequency as "email frequency" {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
    }
}

impl Stage {
    /// Next step on the ladder, `None` at `Professional`.
    pub fn next(self) -> Option<Stage> {
        let position = Stage::ALL.iter().position(|stage| *stage == self)?;
        Stage::ALL.get(position + 1).copied()
    }
}

impl Status {
    /// Transitions are monotonic: a status may stay put or move forward,
    /// never back.
    pub fn can_transition_to(self, next: Status) -> bool {
        next >= self
    }
}
