//! Weapon mastery grants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{CharacterId, MasteryId};

/// How deeply a weapon family has been mastered.
///
/// Grand mastery consumes two mastery slots and a character may hold at most
/// one grand mastery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLevel {
    Mastered,
    GrandMastery,
}

impl MasteryLevel {
    /// Mastery slots this grant consumes.
    pub fn slot_cost(&self) -> u8 {
        match self {
            Self::Mastered => 1,
            Self::GrandMastery => 2,
        }
    }
}

impl std::fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mastered => write!(f, "mastered"),
            Self::GrandMastery => write!(f, "grand_mastery"),
        }
    }
}

impl std::str::FromStr for MasteryLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mastered" => Ok(Self::Mastered),
            "grand_mastery" => Ok(Self::GrandMastery),
            other => Err(DomainError::parse(format!(
                "unknown mastery level: {other}"
            ))),
        }
    }
}

/// One mastered weapon family. `weapon_base_name` is the canonical family
/// name with enchantment bonus and named suffix stripped, so "Longsword +2"
/// and "Longsword of Fire" both match a "Longsword" mastery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponMastery {
    pub id: MasteryId,
    pub character_id: CharacterId,
    pub weapon_base_name: String,
    pub level: MasteryLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeaponMastery {
    pub fn new(
        character_id: CharacterId,
        weapon_base_name: impl Into<String>,
        level: MasteryLevel,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MasteryId::new(),
            character_id,
            weapon_base_name: weapon_base_name.into(),
            level,
            created_at: now,
            updated_at: now,
        }
    }
}
