//! Spells, known-spell records, and prepared-spell assignments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, KnownSpellId, PreparedSpellId, SpellId};
use crate::rules::classes::CastingClass;

/// A spell in the shared catalog.
///
/// Each casting class has its own level column; zero means the class cannot
/// cast the spell at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    pub magician_level: u8,
    pub cryomancer_level: u8,
    pub illusionist_level: u8,
    pub necromancer_level: u8,
    pub pyromancer_level: u8,
    pub witch_level: u8,
    pub cleric_level: u8,
    pub druid_level: u8,
    pub range: String,
    pub duration: String,
    pub area_of_effect: Option<String>,
    pub components: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Spell {
    /// Minimum slot level required to cast this spell for a given casting
    /// class; `None` if the class has no access to it.
    pub fn level_for(&self, class: CastingClass) -> Option<u8> {
        let level = match class {
            CastingClass::Magician => self.magician_level,
            CastingClass::Cryomancer => self.cryomancer_level,
            CastingClass::Illusionist => self.illusionist_level,
            CastingClass::Necromancer => self.necromancer_level,
            CastingClass::Pyromancer => self.pyromancer_level,
            CastingClass::Witch => self.witch_level,
            CastingClass::Warlock => self.magician_level,
            CastingClass::Cleric => self.cleric_level,
            CastingClass::Druid => self.druid_level,
            CastingClass::Priest => self.cleric_level,
        };
        (level > 0).then_some(level)
    }
}

/// A spell a character has learned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownSpell {
    pub id: KnownSpellId,
    pub character_id: CharacterId,
    pub spell_id: SpellId,
    pub spell_name: String,
    pub spell_level: u8,
    pub casting_class: CastingClass,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A known spell assigned to a slot level, consuming that level's capacity
/// until removed. Prepared assignments are explicit player choices and are
/// the only engine-validated writes that persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedSpell {
    pub id: PreparedSpellId,
    pub character_id: CharacterId,
    pub spell_id: SpellId,
    pub spell_name: String,
    /// Slot level the spell occupies; >= the spell's class minimum
    pub slot_level: u8,
    pub casting_class: CastingClass,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
