//! Domain entities: the raw records the rules engine computes over.

mod character;
mod class_data;
mod inventory;
mod items;
mod mastery;
mod spell;

pub use character::{AbilityScores, Character, ABILITY_SCORE_MAX, ABILITY_SCORE_MIN};
pub use class_data::{ClassAbility, ClassLevelData, SpellSlots};
pub use inventory::{InventoryItem, ItemKind, Treasure};
pub use items::{
    Armor, ArmorWeightClass, Container, Equipment, MagicItem, Potion, Ring, Shield, SpellScroll,
    Spellbook, Weapon, WeaponCategory,
};
pub use mastery::{MasteryLevel, WeaponMastery};
pub use spell::{KnownSpell, PreparedSpell, Spell};
