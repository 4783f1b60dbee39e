//! Thuleria domain: the character rules engine's types and tables.
//!
//! This crate is pure computation. It owns the entity records, the attribute
//! and class lookup tables, and the derived [`sheet::CharacterSheet`] view.
//! Persistence, HTTP, and every other side effect live behind the engine
//! crate's ports.

extern crate self as thuleria_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod rules;
pub mod sheet;

pub use entities::{
    AbilityScores, Armor, ArmorWeightClass, Character, ClassAbility, ClassLevelData, Container,
    Equipment, InventoryItem, ItemKind, KnownSpell, MagicItem, MasteryLevel, Potion, PreparedSpell,
    Ring, Shield, Spell, SpellScroll, SpellSlots, Spellbook, Treasure, Weapon, WeaponCategory,
    WeaponMastery, ABILITY_SCORE_MAX, ABILITY_SCORE_MIN,
};

pub use error::DomainError;

pub use ids::{
    CharacterId, InventoryEntryId, ItemId, KnownSpellId, MasteryId, PreparedSpellId, SpellId,
    TreasureId, UserId,
};

// Re-export the rule-table types callers consume directly
pub use rules::armor_class::{ArmorClassBreakdown, BASE_AC};
pub use rules::attributes::AttributeBlock;
pub use rules::classes::{CasterKind, CastingClass, ClassKind, SaveBonuses, ThiefSkill};
pub use rules::encumbrance::{EncumbranceStatus, EncumbranceThresholds};
pub use rules::spellcasting::{SPELL_LEVEL_MAX, SPELL_LEVEL_MIN};
pub use rules::weapon::{AttackRate, MasteryBonuses, ParsedWeaponName};

pub use sheet::{
    CharacterSheet, ClassAttachment, CombatStats, EquipmentProfile, BASE_MOVEMENT_RATE,
};
