//! Armor class computation.

use std::sync::Arc;

use thuleria_domain::{
    rules::attributes, rules::classes, ArmorClassBreakdown, CharacterId, ClassKind, ItemKind,
    BASE_AC,
};

use crate::ports::{CharacterStore, InventoryStore, ItemStore, RepoError};
use crate::services::encumbrance::{EncumbranceError, EncumbranceService};

#[derive(Debug, thiserror::Error)]
pub enum ArmorClassError {
    #[error("Character not found")]
    CharacterNotFound,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<EncumbranceError> for ArmorClassError {
    fn from(err: EncumbranceError) -> Self {
        match err {
            EncumbranceError::CharacterNotFound => Self::CharacterNotFound,
            EncumbranceError::Repo(repo) => Self::Repo(repo),
        }
    }
}

/// Combines base AC, worn armor, shield, dexterity, and class bonuses into
/// the final descending armor class.
pub struct ArmorClassService {
    character_store: Arc<dyn CharacterStore>,
    inventory_store: Arc<dyn InventoryStore>,
    item_store: Arc<dyn ItemStore>,
    encumbrance: Arc<EncumbranceService>,
}

impl ArmorClassService {
    pub fn new(
        character_store: Arc<dyn CharacterStore>,
        inventory_store: Arc<dyn InventoryStore>,
        item_store: Arc<dyn ItemStore>,
        encumbrance: Arc<EncumbranceService>,
    ) -> Self {
        Self {
            character_store,
            inventory_store,
            item_store,
            encumbrance,
        }
    }

    pub async fn armor_class(
        &self,
        character_id: CharacterId,
    ) -> Result<ArmorClassBreakdown, ArmorClassError> {
        let character = self
            .character_store
            .get(character_id)
            .await?
            .ok_or(ArmorClassError::CharacterNotFound)?;

        let class = ClassKind::parse(&character.class);
        let items = self.inventory_store.items(character_id).await?;

        // At most one armor and one shield count. Two equipped items of one
        // type resolve last-equipped-wins; exclusivity is the inventory
        // layer's concern.
        let mut equipped_armor = None;
        let mut equipped_shield = None;
        for item in items.iter().filter(|i| i.equipped) {
            match item.kind {
                ItemKind::Armor => equipped_armor = Some(item.item_id),
                ItemKind::Shield => equipped_shield = Some(item.item_id),
                _ => {}
            }
        }

        let mut breakdown = ArmorClassBreakdown {
            base_ac: BASE_AC,
            dexterity_mod: attributes::dexterity(character.abilities.dexterity)
                .defence_adjustment,
            ..Default::default()
        };

        if let Some(armor_id) = equipped_armor {
            match self.item_store.armor(armor_id).await? {
                Some(armor) => {
                    breakdown.armor_ac = Some(armor.ac);
                    breakdown.armor_equipped = Some(armor.name);
                }
                None => {
                    tracing::warn!(
                        character_id = %character_id,
                        armor_id = %armor_id,
                        "equipped armor no longer resolves, ignoring"
                    );
                }
            }
        }

        if let Some(shield_id) = equipped_shield {
            match self.item_store.shield(shield_id).await? {
                Some(shield) => {
                    breakdown.shield_bonus = shield.defense_modifier;
                    breakdown.shield_equipped = Some(shield.name);
                }
                None => {
                    tracing::warn!(
                        character_id = %character_id,
                        shield_id = %shield_id,
                        "equipped shield no longer resolves, ignoring"
                    );
                }
            }
        }

        if let Some(class) = class {
            // Agile classes fight unburdened: +1 while no armor is worn and
            // the load is below the heavy threshold.
            if class.is_agile() && equipped_armor.is_none() {
                let report = self.encumbrance.report(character_id).await?;
                if !report.status.heavy_encumbered {
                    breakdown.agile_bonus = 1;
                }
            }

            match class {
                ClassKind::Berserker => {
                    breakdown.natural_ac = classes::berserker_natural_ac(character.level);
                }
                ClassKind::Monk => {
                    breakdown.other_bonuses = classes::monk_ac_bonus(character.level);
                }
                _ => {}
            }
        }

        let breakdown = breakdown.compute();
        tracing::debug!(
            character_id = %character_id,
            final_ac = breakdown.final_ac,
            "armor class computed"
        );
        Ok(breakdown)
    }
}
