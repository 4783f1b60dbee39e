//! Class/level reference rows and spell-slot tables
//!
//! `ClassLevelData` is read-only reference data owned by the persistence
//! collaborator; the engine looks rows up by (class, level) and treats a
//! missing row for a supported class as an internal data error, never as a
//! default.

use serde::{Deserialize, Serialize};

/// Per-level spell slot counts. Levels run 1..=9; unused levels stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlots {
    pub level1: u8,
    pub level2: u8,
    pub level3: u8,
    pub level4: u8,
    pub level5: u8,
    pub level6: u8,
    pub level7: u8,
    pub level8: u8,
    pub level9: u8,
}

impl SpellSlots {
    /// Slot count at `level` (1..=9); zero for anything outside that range.
    pub fn at_level(&self, level: u8) -> u8 {
        match level {
            1 => self.level1,
            2 => self.level2,
            3 => self.level3,
            4 => self.level4,
            5 => self.level5,
            6 => self.level6,
            7 => self.level7,
            8 => self.level8,
            9 => self.level9,
            _ => 0,
        }
    }

    /// Set the slot count at `level` (1..=9); no-op outside that range.
    pub fn set_at_level(&mut self, level: u8, count: u8) {
        match level {
            1 => self.level1 = count,
            2 => self.level2 = count,
            3 => self.level3 = count,
            4 => self.level4 = count,
            5 => self.level5 = count,
            6 => self.level6 = count,
            7 => self.level7 = count,
            8 => self.level8 = count,
            9 => self.level9 = count,
            _ => {}
        }
    }

    /// Merge a secondary slot table into this one. Levels the secondary
    /// table actually grants (non-zero) overwrite; everything else is kept.
    /// Hybrid casters (Ranger, Shaman, Bard) use this to fold their special
    /// table into the class row.
    pub fn merge_secondary(&mut self, secondary: &SpellSlots) {
        for level in 1..=9u8 {
            let count = secondary.at_level(level);
            if count > 0 {
                self.set_at_level(level, count);
            }
        }
    }

    /// Highest level with at least one slot; zero when the table is empty.
    pub fn highest_granted_level(&self) -> u8 {
        (1..=9u8)
            .rev()
            .find(|&level| self.at_level(level) > 0)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.highest_granted_level() == 0
    }
}

/// One (class, level) row of the class progression table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevelData {
    pub class_name: String,
    pub level: u8,
    pub experience_points: i32,
    /// Accumulated hit dice, e.g. "1d10", "4d8+2"
    pub hit_dice: String,
    pub saving_throw: i32,
    pub fighting_ability: i32,
    pub casting_ability: Option<i32>,
    pub turning_ability: Option<i32>,
    pub spell_slots: Option<SpellSlots>,
}

/// A class capability unlocked at a minimum level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAbility {
    pub name: String,
    pub description: String,
    pub min_level: u8,
}

impl ClassAbility {
    pub fn new(name: &str, description: &str, min_level: u8) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            min_level,
        }
    }
}
