//! Item catalog records
//!
//! One struct per item family, mirroring the storage collaborator's tables.
//! The rules engine only reads these: weapons feed the weapon-stats engine,
//! armor and shields feed the armor-class engine, and everything with a
//! weight feeds encumbrance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, SpellId};

/// Broad weapon handling category. Ranged and hurled weapons use the
/// dexterity missile modifier and never gain the strength damage bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponCategory {
    Melee,
    Ranged,
    Hurled,
    /// Unknown category for forward compatibility
    #[serde(other)]
    Unknown,
}

impl WeaponCategory {
    /// Ranged and hurled weapons share the missile-fire rules.
    pub fn is_missile(&self) -> bool {
        matches!(self, Self::Ranged | Self::Hurled)
    }
}

impl std::fmt::Display for WeaponCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Melee => write!(f, "Melee"),
            Self::Ranged => write!(f, "Ranged"),
            Self::Hurled => write!(f, "Hurled"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl std::str::FromStr for WeaponCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Melee" => Ok(Self::Melee),
            "Ranged" => Ok(Self::Ranged),
            "Hurled" => Ok(Self::Hurled),
            _ => Ok(Self::Unknown),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub id: ItemId,
    /// Display name; may carry a "+N" enchantment and a named suffix
    /// (e.g. "Longsword +1 of Fire"). See [`crate::rules::weapon`] for the
    /// parsing rules.
    pub name: String,
    pub category: WeaponCategory,
    pub weapon_class: i32,
    pub cost: f64,
    pub weight: i32,
    /// Base damage dice, e.g. "1d8"
    pub damage: String,
    pub damage_two_handed: Option<String>,
    /// Missile weapons only: shots per round, e.g. "1/1", "3/2"
    pub rate_of_fire: Option<String>,
    pub range_short: Option<i32>,
    pub range_medium: Option<i32>,
    pub range_long: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Armor weight class; medium and heavy armor suppress class abilities that
/// require mobility (Barbarian run, agile AC bonus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorWeightClass {
    Light,
    Medium,
    Heavy,
    /// Unknown class for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ArmorWeightClass {
    pub fn is_medium_or_heavy(&self) -> bool {
        matches!(self, Self::Medium | Self::Heavy)
    }
}

impl std::fmt::Display for ArmorWeightClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "Light"),
            Self::Medium => write!(f, "Medium"),
            Self::Heavy => write!(f, "Heavy"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl std::str::FromStr for ArmorWeightClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Light" => Ok(Self::Light),
            "Medium" => Ok(Self::Medium),
            "Heavy" => Ok(Self::Heavy),
            _ => Ok(Self::Unknown),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Armor {
    pub id: ItemId,
    pub name: String,
    pub armor_type: String,
    /// Armor class granted while worn; replaces the unarmored base of 9
    /// (lower is better)
    pub ac: i32,
    pub cost: f64,
    pub damage_reduction: i32,
    pub weight: i32,
    pub weight_class: ArmorWeightClass,
    pub movement_rate: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub id: ItemId,
    pub name: String,
    /// Subtracted from AC while equipped
    pub defense_modifier: i32,
    pub cost: f64,
    pub weight: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Potion {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ring {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub cost: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellScroll {
    pub id: ItemId,
    pub spell_id: SpellId,
    pub spell_name: String,
    pub casting_level: i32,
    pub cost: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub id: ItemId,
    pub name: String,
    pub max_weight: f64,
    pub allowed_items: Option<String>,
    pub cost: f64,
    pub weight: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mundane adventuring gear (rope, torches, rations, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: ItemId,
    pub name: String,
    pub cost: f64,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagicItem {
    pub id: ItemId,
    pub name: String,
    pub item_type: String,
    pub description: String,
    pub charges: Option<i32>,
    pub weight: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A spellbook item; arcane casters can only prepare spells stored in a
/// spellbook they carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spellbook {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub total_pages: i32,
    pub used_pages: i32,
    /// IDs of the spells scribed into this book
    pub spells_stored: Vec<SpellId>,
    pub value: i32,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Spellbook {
    pub fn contains(&self, spell_id: SpellId) -> bool {
        self.spells_stored.contains(&spell_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn missile_categories() {
        assert!(WeaponCategory::Ranged.is_missile());
        assert!(WeaponCategory::Hurled.is_missile());
        assert!(!WeaponCategory::Melee.is_missile());
    }

    #[test]
    fn unknown_strings_parse_to_unknown() {
        assert_eq!(
            WeaponCategory::from_str("Siege"),
            Ok(WeaponCategory::Unknown)
        );
        assert_eq!(
            ArmorWeightClass::from_str("Plated"),
            Ok(ArmorWeightClass::Unknown)
        );
    }

    #[test]
    fn medium_and_heavy_armor_flagged() {
        assert!(ArmorWeightClass::Medium.is_medium_or_heavy());
        assert!(ArmorWeightClass::Heavy.is_medium_or_heavy());
        assert!(!ArmorWeightClass::Light.is_medium_or_heavy());
    }
}
