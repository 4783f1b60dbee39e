//! Thuleria engine: character rules services over persistence ports.
//!
//! The engine performs no I/O of its own. Every entry point fetches already
//! persisted records through the [`ports`] traits, runs the pure rules from
//! `thuleria-domain`, and returns a derived result. HTTP framing, sessions,
//! and storage live in the surrounding application.

pub mod ports;
pub mod services;

#[cfg(test)]
mod test_support;

pub use ports::{
    CharacterStore, ClassDataStore, InventoryStore, ItemStore, MasteryStore, PreparedSpellStore,
    RepoError, SpellStore,
};
pub use services::{
    ArmorClassError, ArmorClassService, CharacterSheetService, EncumbranceError,
    EncumbranceReport, EncumbranceService, MasteryOverview, SheetError, SpellcastingError,
    SpellcastingService, SpellsOverview, WeaponStats, WeaponStatsError, WeaponStatsService,
    WeightedItem,
};
