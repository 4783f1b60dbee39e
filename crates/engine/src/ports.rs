//! Port traits for the persistence boundary.
//!
//! These are the ONLY abstractions in the engine; everything else is concrete
//! types. The surrounding application owns the actual storage (and its
//! retry/backoff discipline) and hands the engine a consistent snapshot per
//! computation. A missing row is `Ok(None)` / an empty `Vec`, never an error;
//! `RepoError` is reserved for storage faults.

use async_trait::async_trait;

use thuleria_domain::{
    Armor, Character, CharacterId, ClassLevelData, Container, Equipment, InventoryItem, ItemId,
    KnownSpell, MagicItem, MasteryId, MasteryLevel, Potion, PreparedSpell, Ring, Shield, Spell,
    SpellId, SpellScroll, SpellSlots, Spellbook, Treasure, Weapon, WeaponMastery,
};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// =============================================================================
// Database Ports (one per aggregate)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStore: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassDataStore: Send + Sync {
    /// The (class, level) progression row.
    async fn class_level(&self, class: &str, level: u8)
        -> Result<Option<ClassLevelData>, RepoError>;

    /// Every progression row for a class, ordered by level.
    async fn levels(&self, class: &str) -> Result<Vec<ClassLevelData>, RepoError>;

    /// The secondary slot table hybrid casters merge into their class row.
    async fn secondary_spell_slots(
        &self,
        class: &str,
        level: u8,
    ) -> Result<Option<SpellSlots>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Every entry a character carries, in storage order.
    async fn items(&self, character_id: CharacterId) -> Result<Vec<InventoryItem>, RepoError>;

    /// The character's coin hoard, if one is attached.
    async fn treasure(&self, character_id: CharacterId) -> Result<Option<Treasure>, RepoError>;
}

/// Detail lookups for every item family. Resolution failures during
/// aggregation (a deleted row behind a live inventory entry) surface as
/// `Ok(None)` and are skipped by callers, not treated as fatal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn weapon(&self, id: ItemId) -> Result<Option<Weapon>, RepoError>;
    async fn armor(&self, id: ItemId) -> Result<Option<Armor>, RepoError>;
    async fn shield(&self, id: ItemId) -> Result<Option<Shield>, RepoError>;
    async fn potion(&self, id: ItemId) -> Result<Option<Potion>, RepoError>;
    async fn ring(&self, id: ItemId) -> Result<Option<Ring>, RepoError>;
    async fn spell_scroll(&self, id: ItemId) -> Result<Option<SpellScroll>, RepoError>;
    async fn container(&self, id: ItemId) -> Result<Option<Container>, RepoError>;
    async fn equipment(&self, id: ItemId) -> Result<Option<Equipment>, RepoError>;
    async fn magic_item(&self, id: ItemId) -> Result<Option<MagicItem>, RepoError>;
    async fn spellbook(&self, id: ItemId) -> Result<Option<Spellbook>, RepoError>;

    /// The full weapon catalog, for mastery candidate listings.
    async fn weapons(&self) -> Result<Vec<Weapon>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MasteryStore: Send + Sync {
    async fn for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<WeaponMastery>, RepoError>;
    async fn grant(&self, mastery: &WeaponMastery) -> Result<(), RepoError>;
    async fn revoke(&self, id: MasteryId) -> Result<(), RepoError>;
    async fn update_level(&self, id: MasteryId, level: MasteryLevel) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpellStore: Send + Sync {
    async fn get(&self, id: SpellId) -> Result<Option<Spell>, RepoError>;
    async fn known_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<KnownSpell>, RepoError>;
}

/// Prepared-spell assignments are the engine's only validated writes.
/// Writes for one character must be serialized by the storage collaborator;
/// two concurrent preparations could otherwise both observe a free slot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreparedSpellStore: Send + Sync {
    async fn for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<PreparedSpell>, RepoError>;
    async fn count_at_level(
        &self,
        character_id: CharacterId,
        slot_level: u8,
    ) -> Result<u32, RepoError>;
    async fn is_prepared(
        &self,
        character_id: CharacterId,
        spell_id: SpellId,
    ) -> Result<bool, RepoError>;
    async fn prepare(&self, assignment: &PreparedSpell) -> Result<(), RepoError>;
    async fn unprepare(
        &self,
        character_id: CharacterId,
        spell_id: SpellId,
    ) -> Result<(), RepoError>;
    async fn clear(&self, character_id: CharacterId) -> Result<(), RepoError>;
}
