use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// Closed set of spend categories the engine knows how to allocate.
///
/// Custom tables may re-weight or drop categories, but they cannot invent
/// new identifiers; every table row and priority flag resolves to one of
/// these variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Venue,
    Catering,
    Photography,
    Attire,
    Flowers,
    Music,
    Decor,
    Stationery,
    Transport,
    Cake,
}

impl CategoryId {
    pub const ALL: [CategoryId; 10] = [
        CategoryId::Venue,
        CategoryId::Catering,
        CategoryId::Photography,
        CategoryId::Attire,
        CategoryId::Flowers,
        CategoryId::Music,
        CategoryId::Decor,
        CategoryId::Stationery,
        CategoryId::Transport,
        CategoryId::Cake,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CategoryId::Venue => "venue",
            CategoryId::Catering => "catering",
            CategoryId::Photography => "photography",
            CategoryId::Attire => "attire",
            CategoryId::Flowers => "flowers",
            CategoryId::Music => "music",
            CategoryId::Decor => "decor",
            CategoryId::Stationery => "stationery",
            CategoryId::Transport => "transport",
            CategoryId::Cake => "cake",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CategoryId {
    type Err = InputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        CategoryId::ALL
            .iter()
            .copied()
            .find(|id| id.key() == normalized)
            .ok_or_else(|| InputError::UnknownCategory(value.to_string()))
    }
}
