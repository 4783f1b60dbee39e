//! Character sheet derivation - the enrichment orchestrator.
//!
//! Runs the order-sensitive pipeline over the pure domain steps:
//! attribute tables, class/level row, save profile, hybrid slot merge,
//! class side effects (fed with precomputed equipment/encumbrance facts),
//! and the level-gated ability list.

use std::sync::Arc;

use thuleria_domain::{
    Character, CharacterId, CharacterSheet, EquipmentProfile, ItemKind,
};

use crate::ports::{CharacterStore, ClassDataStore, InventoryStore, ItemStore, RepoError};
use crate::services::encumbrance::{EncumbranceError, EncumbranceService};

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Character not found")]
    CharacterNotFound,
    /// Reference data absent for a supported class/level. Fatal to the
    /// request: a defaulted sheet would look plausible but be wrong.
    #[error("Class data missing for {class} level {level}")]
    ClassDataMissing { class: String, level: u8 },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<EncumbranceError> for SheetError {
    fn from(err: EncumbranceError) -> Self {
        match err {
            EncumbranceError::CharacterNotFound => Self::CharacterNotFound,
            EncumbranceError::Repo(repo) => Self::Repo(repo),
        }
    }
}

/// Builds the fully derived [`CharacterSheet`] view.
pub struct CharacterSheetService {
    character_store: Arc<dyn CharacterStore>,
    class_data_store: Arc<dyn ClassDataStore>,
    inventory_store: Arc<dyn InventoryStore>,
    item_store: Arc<dyn ItemStore>,
    encumbrance: Arc<EncumbranceService>,
}

impl CharacterSheetService {
    pub fn new(
        character_store: Arc<dyn CharacterStore>,
        class_data_store: Arc<dyn ClassDataStore>,
        inventory_store: Arc<dyn InventoryStore>,
        item_store: Arc<dyn ItemStore>,
        encumbrance: Arc<EncumbranceService>,
    ) -> Self {
        Self {
            character_store,
            class_data_store,
            inventory_store,
            item_store,
            encumbrance,
        }
    }

    pub async fn sheet(&self, character_id: CharacterId) -> Result<CharacterSheet, SheetError> {
        let character = self
            .character_store
            .get(character_id)
            .await?
            .ok_or(SheetError::CharacterNotFound)?;
        self.sheet_for(&character).await
    }

    /// Derive the sheet for an already-fetched character.
    pub async fn sheet_for(&self, character: &Character) -> Result<CharacterSheet, SheetError> {
        let mut sheet = CharacterSheet::base(character);

        // Unknown class: attribute-derived stats only, by design.
        let Some(class) = sheet.class else {
            tracing::debug!(
                character_id = %character.id,
                class = %character.class,
                "unrecognized class, deriving baseline sheet"
            );
            return Ok(sheet);
        };

        let row = self
            .class_data_store
            .class_level(class.name(), character.level)
            .await?
            .ok_or_else(|| SheetError::ClassDataMissing {
                class: class.name().to_string(),
                level: character.level,
            })?;

        sheet.apply_class_level_data(&row);
        sheet.apply_save_profile(class);

        if class.merges_secondary_spell_slots() {
            if let Some(secondary) = self
                .class_data_store
                .secondary_spell_slots(class.name(), character.level)
                .await?
            {
                sheet.merge_secondary_spell_slots(&secondary);
            }
        }

        let equipment = self.equipment_profile(character).await?;
        sheet.apply_class_effects(class, &equipment);
        sheet.attach_class_abilities(class);

        tracing::debug!(
            character_id = %character.id,
            class = %class,
            level = character.level,
            "character sheet derived"
        );
        Ok(sheet)
    }

    /// The worn-armor and load facts the class-effects stage depends on.
    ///
    /// Armor whose record no longer resolves counts as worn but weightless,
    /// matching the skip-and-continue rule for detail lookups.
    pub async fn equipment_profile(
        &self,
        character: &Character,
    ) -> Result<EquipmentProfile, SheetError> {
        let items = self.inventory_store.items(character.id).await?;

        let mut wearing_armor = false;
        let mut wearing_medium_or_heavy_armor = false;
        for item in items.iter().filter(|i| i.is_equipped_kind(ItemKind::Armor)) {
            wearing_armor = true;
            if let Some(armor) = self.item_store.armor(item.item_id).await? {
                if armor.weight_class.is_medium_or_heavy() {
                    wearing_medium_or_heavy_armor = true;
                }
            }
        }

        let report = self.encumbrance.report(character.id).await?;

        Ok(EquipmentProfile {
            wearing_armor,
            wearing_medium_or_heavy_armor,
            heavy_encumbered: report.status.heavy_encumbered,
        })
    }

    /// Experience points required for the next level; `None` at the table's
    /// cap.
    pub async fn experience_for_next_level(
        &self,
        class: &str,
        current_level: u8,
    ) -> Result<Option<i32>, SheetError> {
        let rows = self.class_data_store.levels(class).await?;
        Ok(rows
            .iter()
            .find(|row| row.level == current_level + 1)
            .map(|row| row.experience_points))
    }
}
