//! Character entity - the raw, player-authored record
//!
//! A character stores only authoritative inputs: identity, the six ability
//! scores, class name, level, and hit points. Every gameplay number derived
//! from these (combat modifiers, saves, AC, encumbrance, spell slots) lives in
//! [`crate::sheet::CharacterSheet`], which is recomputed on read and never
//! persisted. Keeping the two apart makes it impossible to hand-edit a
//! derived field into an inconsistent state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{CharacterId, UserId};

/// Lowest rollable ability score.
pub const ABILITY_SCORE_MIN: u8 = 3;
/// Highest rollable ability score.
pub const ABILITY_SCORE_MAX: u8 = 18;

/// The six raw ability scores, each in 3..=18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields: [(&'static str, u8); 6] = [
            ("strength", self.strength),
            ("dexterity", self.dexterity),
            ("constitution", self.constitution),
            ("intelligence", self.intelligence),
            ("wisdom", self.wisdom),
            ("charisma", self.charisma),
        ];
        for (field, score) in fields {
            if !(ABILITY_SCORE_MIN..=ABILITY_SCORE_MAX).contains(&score) {
                return Err(DomainError::validation(
                    field,
                    format!(
                        "must be between {ABILITY_SCORE_MIN} and {ABILITY_SCORE_MAX}, got {score}"
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// A player character as persisted by the storage collaborator.
///
/// `class` stays a free string: unknown class names are tolerated by the
/// rules engine (the sheet is built from attributes alone), which keeps
/// homebrew classes from breaking reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub user_id: UserId,
    pub name: String,
    pub class: String,
    pub level: u8,
    pub abilities: AbilityScores,
    pub hit_points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        class: impl Into<String>,
        level: u8,
        abilities: AbilityScores,
        hit_points: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CharacterId::new(),
            user_id,
            name: name.into(),
            class: class.into(),
            level,
            abilities,
            hit_points,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validates the documented input constraints: ability scores in
    /// 3..=18, level >= 1, positive hit points, non-empty name/class.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name", "name cannot be empty"));
        }
        if self.class.trim().is_empty() {
            return Err(DomainError::validation("class", "class cannot be empty"));
        }
        if self.level < 1 {
            return Err(DomainError::validation("level", "level must be at least 1"));
        }
        if self.hit_points < 1 {
            return Err(DomainError::validation(
                "hit_points",
                "hit points must be positive",
            ));
        }
        self.abilities.validate()
    }
}
