//! Encumbrance reporting.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use thuleria_domain::{
    CharacterId, EncumbranceStatus, EncumbranceThresholds, InventoryEntryId, InventoryItem,
    ItemKind,
};

use crate::ports::{CharacterStore, InventoryStore, ItemStore, RepoError};

/// Nominal unit weights for items whose records carry none.
const POTION_WEIGHT: f64 = 0.5;
const RING_WEIGHT: f64 = 0.1;
const SCROLL_WEIGHT: f64 = 0.1;

/// How many of the heaviest carried items the report ranks.
const HEAVIEST_ITEM_COUNT: usize = 5;

/// One carried stack with its resolved weight contribution.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WeightedItem {
    pub entry_id: InventoryEntryId,
    pub name: String,
    pub kind: ItemKind,
    pub unit_weight: f64,
    /// Unit weight times quantity
    pub total_weight: f64,
    pub quantity: u32,
}

/// The complete encumbrance picture for one character.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EncumbranceReport {
    pub total_weight: f64,
    pub weight_by_kind: HashMap<ItemKind, f64>,
    /// Coin weight, when the character carries treasure
    pub treasure_weight: f64,
    pub thresholds: EncumbranceThresholds,
    pub status: EncumbranceStatus,
    /// The five heaviest stacks, ties broken by storage order
    pub heaviest_items: Vec<WeightedItem>,
}

#[derive(Debug, thiserror::Error)]
pub enum EncumbranceError {
    #[error("Character not found")]
    CharacterNotFound,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Computes carrying thresholds and the current load for a character.
///
/// Item detail lookups that fail to resolve (deleted catalog rows behind a
/// live inventory entry) are skipped, not fatal.
pub struct EncumbranceService {
    character_store: Arc<dyn CharacterStore>,
    inventory_store: Arc<dyn InventoryStore>,
    item_store: Arc<dyn ItemStore>,
}

impl EncumbranceService {
    pub fn new(
        character_store: Arc<dyn CharacterStore>,
        inventory_store: Arc<dyn InventoryStore>,
        item_store: Arc<dyn ItemStore>,
    ) -> Self {
        Self {
            character_store,
            inventory_store,
            item_store,
        }
    }

    pub async fn report(
        &self,
        character_id: CharacterId,
    ) -> Result<EncumbranceReport, EncumbranceError> {
        let character = self
            .character_store
            .get(character_id)
            .await?
            .ok_or(EncumbranceError::CharacterNotFound)?;

        let thresholds = EncumbranceThresholds::for_scores(
            character.abilities.strength,
            character.abilities.constitution,
        );

        let items = self.inventory_store.items(character_id).await?;
        let mut weighted = Vec::new();
        let mut weight_by_kind: HashMap<ItemKind, f64> = HashMap::new();

        for item in &items {
            let Some((name, unit_weight)) = self.resolve_weight(item).await? else {
                tracing::debug!(
                    entry_id = %item.id,
                    kind = %item.kind,
                    "skipping unresolvable inventory entry"
                );
                continue;
            };
            if unit_weight <= 0.0 {
                continue;
            }
            let total_weight = unit_weight * f64::from(item.quantity);
            *weight_by_kind.entry(item.kind).or_default() += total_weight;
            weighted.push(WeightedItem {
                entry_id: item.id,
                name,
                kind: item.kind,
                unit_weight,
                total_weight,
                quantity: item.quantity,
            });
        }

        let mut total_weight: f64 = weighted.iter().map(|w| w.total_weight).sum();

        let treasure_weight = self
            .inventory_store
            .treasure(character_id)
            .await?
            .map(|treasure| treasure.coin_weight())
            .unwrap_or(0.0);
        total_weight += treasure_weight;

        // Stable sort keeps storage order between equal weights.
        weighted.sort_by(|a, b| {
            b.total_weight
                .partial_cmp(&a.total_weight)
                .unwrap_or(Ordering::Equal)
        });
        weighted.truncate(HEAVIEST_ITEM_COUNT);

        let status = EncumbranceStatus::evaluate(total_weight, thresholds);

        tracing::debug!(
            character_id = %character_id,
            total_weight,
            encumbered = status.encumbered,
            heavy_encumbered = status.heavy_encumbered,
            "encumbrance computed"
        );

        Ok(EncumbranceReport {
            total_weight,
            weight_by_kind,
            treasure_weight,
            thresholds,
            status,
            heaviest_items: weighted,
        })
    }

    /// Resolve one entry's display name and unit weight by its kind-specific
    /// lookup. `None` when the backing record no longer exists or the kind
    /// carries no weight.
    async fn resolve_weight(
        &self,
        item: &InventoryItem,
    ) -> Result<Option<(String, f64)>, RepoError> {
        let resolved = match item.kind {
            ItemKind::Weapon => self
                .item_store
                .weapon(item.item_id)
                .await?
                .map(|w| (w.name, f64::from(w.weight))),
            ItemKind::Armor => self
                .item_store
                .armor(item.item_id)
                .await?
                .map(|a| (a.name, f64::from(a.weight))),
            ItemKind::Shield => self
                .item_store
                .shield(item.item_id)
                .await?
                .map(|s| (s.name, f64::from(s.weight))),
            ItemKind::Potion => self
                .item_store
                .potion(item.item_id)
                .await?
                .map(|p| (p.name, POTION_WEIGHT)),
            ItemKind::Ring => self
                .item_store
                .ring(item.item_id)
                .await?
                .map(|r| (r.name, RING_WEIGHT)),
            ItemKind::SpellScroll => self
                .item_store
                .spell_scroll(item.item_id)
                .await?
                .map(|s| (format!("Scroll of {}", s.spell_name), SCROLL_WEIGHT)),
            ItemKind::Container => self
                .item_store
                .container(item.item_id)
                .await?
                .map(|c| (c.name, f64::from(c.weight))),
            ItemKind::Equipment => self
                .item_store
                .equipment(item.item_id)
                .await?
                .map(|e| (e.name, e.weight)),
            ItemKind::MagicItem => self
                .item_store
                .magic_item(item.item_id)
                .await?
                .map(|m| (m.name, f64::from(m.weight))),
            // Spellbooks and unknown kinds contribute no tracked weight
            ItemKind::Spellbook | ItemKind::Unknown => None,
        };
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockCharacterStore, MockInventoryStore, MockItemStore};
    use crate::test_support::{character_with_scores, inventory_entry, weapon_named};
    use thuleria_domain::ItemId;

    fn service(
        characters: MockCharacterStore,
        inventory: MockInventoryStore,
        items: MockItemStore,
    ) -> EncumbranceService {
        EncumbranceService::new(Arc::new(characters), Arc::new(inventory), Arc::new(items))
    }

    #[tokio::test]
    async fn unknown_character_is_not_found() {
        let mut characters = MockCharacterStore::new();
        characters.expect_get().returning(|_| Ok(None));
        let svc = service(
            characters,
            MockInventoryStore::new(),
            MockItemStore::new(),
        );
        let err = svc.report(CharacterId::new()).await.unwrap_err();
        assert!(matches!(err, EncumbranceError::CharacterNotFound));
    }

    #[tokio::test]
    async fn weight_over_threshold_sets_encumbered_only() {
        let character = character_with_scores("Fighter", 1, 10, 10);
        let character_id = character.id;

        let mut characters = MockCharacterStore::new();
        characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));

        let weapon_id = ItemId::new();
        let mut inventory = MockInventoryStore::new();
        let entry = inventory_entry(character_id, ItemKind::Weapon, weapon_id, 1, true);
        inventory
            .expect_items()
            .returning(move |_| Ok(vec![entry.clone()]));
        inventory.expect_treasure().returning(|_| Ok(None));

        let mut items = MockItemStore::new();
        items
            .expect_weapon()
            .returning(|id| Ok(Some(weapon_named("Greataxe", 80, id))));

        let report = service(characters, inventory, items)
            .report(character_id)
            .await
            .expect("report");

        // Thresholds for 10/10 are 75/150/300; 80 is encumbered only.
        assert!(report.status.encumbered);
        assert!(!report.status.heavy_encumbered);
        assert!(!report.status.overloaded);
        assert_eq!(report.total_weight, 80.0);
    }

    #[tokio::test]
    async fn missing_item_records_are_skipped() {
        let character = character_with_scores("Fighter", 1, 10, 10);
        let character_id = character.id;

        let mut characters = MockCharacterStore::new();
        characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));

        let mut inventory = MockInventoryStore::new();
        let dangling = inventory_entry(character_id, ItemKind::Weapon, ItemId::new(), 1, false);
        inventory
            .expect_items()
            .returning(move |_| Ok(vec![dangling.clone()]));
        inventory.expect_treasure().returning(|_| Ok(None));

        let mut items = MockItemStore::new();
        items.expect_weapon().returning(|_| Ok(None));

        let report = service(characters, inventory, items)
            .report(character_id)
            .await
            .expect("report");
        assert_eq!(report.total_weight, 0.0);
        assert!(report.heaviest_items.is_empty());
    }

    #[tokio::test]
    async fn coins_weigh_one_unit_per_fifty() {
        let character = character_with_scores("Fighter", 1, 10, 10);
        let character_id = character.id;

        let mut characters = MockCharacterStore::new();
        characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));

        let mut inventory = MockInventoryStore::new();
        inventory.expect_items().returning(|_| Ok(vec![]));
        inventory.expect_treasure().returning(move |_| {
            Ok(Some(crate::test_support::treasure_with_gold(
                character_id,
                100,
            )))
        });

        let report = service(characters, inventory, MockItemStore::new())
            .report(character_id)
            .await
            .expect("report");
        assert_eq!(report.treasure_weight, 2.0);
        assert_eq!(report.total_weight, 2.0);
    }

    #[tokio::test]
    async fn heaviest_items_are_ranked_descending() {
        let character = character_with_scores("Fighter", 1, 18, 17);
        let character_id = character.id;

        let mut characters = MockCharacterStore::new();
        characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));

        let mut entries = Vec::new();
        for quantity in [1u32, 3, 2] {
            entries.push(inventory_entry(
                character_id,
                ItemKind::Weapon,
                ItemId::new(),
                quantity,
                false,
            ));
        }
        let mut inventory = MockInventoryStore::new();
        let cloned = entries.clone();
        inventory
            .expect_items()
            .returning(move |_| Ok(cloned.clone()));
        inventory.expect_treasure().returning(|_| Ok(None));

        let mut items = MockItemStore::new();
        items
            .expect_weapon()
            .returning(|id| Ok(Some(weapon_named("Spear", 10, id))));

        let report = service(characters, inventory, items)
            .report(character_id)
            .await
            .expect("report");
        assert_eq!(report.heaviest_items.len(), 3);
        assert_eq!(report.heaviest_items[0].total_weight, 30.0);
        assert_eq!(report.heaviest_items[1].total_weight, 20.0);
        assert_eq!(report.heaviest_items[2].total_weight, 10.0);
    }
}
