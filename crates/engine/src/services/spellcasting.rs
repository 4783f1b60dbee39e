//! Spell slots, preparation, and spellbook access checks.

use std::sync::Arc;

use chrono::Utc;
use thuleria_domain::{
    rules::spellcasting::{self, SPELL_LEVEL_MAX, SPELL_LEVEL_MIN},
    Character, CharacterId, CastingClass, ClassKind, ItemKind, KnownSpell, PreparedSpell,
    PreparedSpellId, Spell, SpellId, SpellSlots,
};

use crate::ports::{
    CharacterStore, ClassDataStore, InventoryStore, ItemStore, PreparedSpellStore, RepoError,
    SpellStore,
};

#[derive(Debug, thiserror::Error)]
pub enum SpellcastingError {
    #[error("Character not found")]
    CharacterNotFound,
    #[error("Spell not found")]
    SpellNotFound,
    #[error("Class {0} cannot prepare spells")]
    NotACaster(String),
    #[error("Spell {0} is not on the class list")]
    NotOnClassList(String),
    #[error("Spell {0} is not in any carried spellbook")]
    NotInSpellbook(String),
    #[error("Slot level must be between 1 and 9, got {0}")]
    InvalidSlotLevel(u8),
    #[error("Spell requires at least a level {required} slot (requested: {requested})")]
    SlotBelowSpellLevel { required: u8, requested: u8 },
    #[error("No level {0} spell slots remaining")]
    NoSlotsRemaining(u8),
    #[error("Spell {0} is already prepared")]
    AlreadyPrepared(String),
    #[error("Spell is not prepared")]
    NotPrepared,
    #[error("Spell level {spell_level} exceeds the maximum castable level {max_level}")]
    SpellLevelTooHigh { spell_level: u8, max_level: u8 },
    #[error("Class data missing for {class} level {level}")]
    ClassDataMissing { class: String, level: u8 },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Everything a spells tab needs for one character.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SpellsOverview {
    pub known: Vec<KnownSpell>,
    pub prepared: Vec<PreparedSpell>,
    /// Base capacity including the ability bonus slot
    pub capacity: SpellSlots,
    /// Capacity minus prepared assignments, per level
    pub available: SpellSlots,
    pub max_castable_level: u8,
}

/// Computes slot capacity and validates preparation requests.
///
/// None of the validation steps write anything; the assignment persists only
/// after every check passes.
pub struct SpellcastingService {
    character_store: Arc<dyn CharacterStore>,
    class_data_store: Arc<dyn ClassDataStore>,
    inventory_store: Arc<dyn InventoryStore>,
    item_store: Arc<dyn ItemStore>,
    spell_store: Arc<dyn SpellStore>,
    prepared_store: Arc<dyn PreparedSpellStore>,
}

impl SpellcastingService {
    pub fn new(
        character_store: Arc<dyn CharacterStore>,
        class_data_store: Arc<dyn ClassDataStore>,
        inventory_store: Arc<dyn InventoryStore>,
        item_store: Arc<dyn ItemStore>,
        spell_store: Arc<dyn SpellStore>,
        prepared_store: Arc<dyn PreparedSpellStore>,
    ) -> Self {
        Self {
            character_store,
            class_data_store,
            inventory_store,
            item_store,
            spell_store,
            prepared_store,
        }
    }

    fn casting_class_of(character: &Character) -> Result<CastingClass, SpellcastingError> {
        ClassKind::parse(&character.class)
            .and_then(|class| class.casting_class())
            .ok_or_else(|| SpellcastingError::NotACaster(character.class.clone()))
    }

    /// Slot capacity from the class row, the hybrid secondary table, and
    /// the ability bonus slot.
    pub async fn slot_capacity(
        &self,
        character: &Character,
    ) -> Result<SpellSlots, SpellcastingError> {
        let class = ClassKind::parse(&character.class)
            .ok_or_else(|| SpellcastingError::NotACaster(character.class.clone()))?;
        let casting = Self::casting_class_of(character)?;

        let row = self
            .class_data_store
            .class_level(class.name(), character.level)
            .await?
            .ok_or_else(|| SpellcastingError::ClassDataMissing {
                class: class.name().to_string(),
                level: character.level,
            })?;
        let mut slots = row.spell_slots.unwrap_or_default();

        if class.merges_secondary_spell_slots() {
            if let Some(secondary) = self
                .class_data_store
                .secondary_spell_slots(class.name(), character.level)
                .await?
            {
                slots.merge_secondary(&secondary);
            }
        }

        // One bonus slot at the level fixed by the casting ability bracket:
        // intelligence for arcane casters, wisdom for divine.
        let ability_score = match casting.kind() {
            thuleria_domain::CasterKind::Arcane => character.abilities.intelligence,
            thuleria_domain::CasterKind::Divine => character.abilities.wisdom,
        };
        if let Some(bonus_level) = spellcasting::bonus_slot_level(casting.kind(), ability_score) {
            slots.set_at_level(bonus_level, slots.at_level(bonus_level) + 1);
        }

        Ok(slots)
    }

    /// Capacity minus persisted preparations, floored at zero per level.
    pub async fn available_slots(
        &self,
        character_id: CharacterId,
    ) -> Result<SpellSlots, SpellcastingError> {
        let character = self
            .character_store
            .get(character_id)
            .await?
            .ok_or(SpellcastingError::CharacterNotFound)?;
        let capacity = self.slot_capacity(&character).await?;

        let prepared = self.prepared_store.for_character(character_id).await?;
        Ok(remaining_slots(capacity, &prepared))
    }

    /// Validate a preparation request and persist the assignment.
    ///
    /// Check order: slot level range, caster class, spell existence, class
    /// access, spellbook access (arcane), minimum slot level, free slot,
    /// not already prepared.
    pub async fn prepare(
        &self,
        character_id: CharacterId,
        spell_id: SpellId,
        slot_level: u8,
    ) -> Result<PreparedSpell, SpellcastingError> {
        if !(SPELL_LEVEL_MIN..=SPELL_LEVEL_MAX).contains(&slot_level) {
            return Err(SpellcastingError::InvalidSlotLevel(slot_level));
        }

        let character = self
            .character_store
            .get(character_id)
            .await?
            .ok_or(SpellcastingError::CharacterNotFound)?;
        let casting = Self::casting_class_of(&character)?;

        let spell = self
            .spell_store
            .get(spell_id)
            .await?
            .ok_or(SpellcastingError::SpellNotFound)?;

        let required = spell
            .level_for(casting)
            .ok_or_else(|| SpellcastingError::NotOnClassList(spell.name.clone()))?;

        if casting.requires_spellbook()
            && !self.spell_in_carried_spellbook(character_id, spell_id).await?
        {
            return Err(SpellcastingError::NotInSpellbook(spell.name.clone()));
        }

        if slot_level < required {
            return Err(SpellcastingError::SlotBelowSpellLevel {
                required,
                requested: slot_level,
            });
        }

        let capacity = self.slot_capacity(&character).await?;
        let used = self
            .prepared_store
            .count_at_level(character_id, slot_level)
            .await?;
        if u32::from(capacity.at_level(slot_level)) <= used {
            return Err(SpellcastingError::NoSlotsRemaining(slot_level));
        }

        if self
            .prepared_store
            .is_prepared(character_id, spell_id)
            .await?
        {
            return Err(SpellcastingError::AlreadyPrepared(spell.name.clone()));
        }

        let assignment = new_assignment(&character, &spell, casting, slot_level);
        self.prepared_store.prepare(&assignment).await?;
        tracing::info!(
            character_id = %character_id,
            spell = %assignment.spell_name,
            slot_level,
            "spell prepared"
        );
        Ok(assignment)
    }

    /// Remove one prepared assignment; the spell must currently be prepared.
    pub async fn unprepare(
        &self,
        character_id: CharacterId,
        spell_id: SpellId,
    ) -> Result<(), SpellcastingError> {
        if !self
            .prepared_store
            .is_prepared(character_id, spell_id)
            .await?
        {
            return Err(SpellcastingError::NotPrepared);
        }
        self.prepared_store.unprepare(character_id, spell_id).await?;
        Ok(())
    }

    /// Remove every prepared assignment, unconditionally.
    pub async fn clear(&self, character_id: CharacterId) -> Result<(), SpellcastingError> {
        self.character_store
            .get(character_id)
            .await?
            .ok_or(SpellcastingError::CharacterNotFound)?;
        self.prepared_store.clear(character_id).await?;
        tracing::info!(character_id = %character_id, "prepared spells cleared");
        Ok(())
    }

    pub async fn overview(
        &self,
        character_id: CharacterId,
    ) -> Result<SpellsOverview, SpellcastingError> {
        let character = self
            .character_store
            .get(character_id)
            .await?
            .ok_or(SpellcastingError::CharacterNotFound)?;
        let casting = Self::casting_class_of(&character)?;

        let capacity = self.slot_capacity(&character).await?;
        let known = self.spell_store.known_for_character(character_id).await?;
        let prepared = self.prepared_store.for_character(character_id).await?;
        let available = remaining_slots(capacity, &prepared);

        Ok(SpellsOverview {
            known,
            prepared,
            capacity,
            available,
            max_castable_level: spellcasting::max_castable_spell_level(
                casting.kind(),
                character.level,
            ),
        })
    }

    /// Whether the character may learn this spell at their current level.
    pub async fn validate_learnable(
        &self,
        character_id: CharacterId,
        spell_id: SpellId,
    ) -> Result<(), SpellcastingError> {
        let character = self
            .character_store
            .get(character_id)
            .await?
            .ok_or(SpellcastingError::CharacterNotFound)?;
        let casting = Self::casting_class_of(&character)?;

        let spell = self
            .spell_store
            .get(spell_id)
            .await?
            .ok_or(SpellcastingError::SpellNotFound)?;
        let spell_level = spell
            .level_for(casting)
            .ok_or_else(|| SpellcastingError::NotOnClassList(spell.name.clone()))?;

        let max_level =
            spellcasting::max_castable_spell_level(casting.kind(), character.level);
        if spell_level > max_level {
            return Err(SpellcastingError::SpellLevelTooHigh {
                spell_level,
                max_level,
            });
        }
        Ok(())
    }

    /// Scan carried spellbooks for the spell. Books whose record no longer
    /// resolves are skipped.
    async fn spell_in_carried_spellbook(
        &self,
        character_id: CharacterId,
        spell_id: SpellId,
    ) -> Result<bool, RepoError> {
        let items = self.inventory_store.items(character_id).await?;
        for entry in items
            .iter()
            .filter(|item| item.kind == ItemKind::Spellbook)
        {
            if let Some(book) = self.item_store.spellbook(entry.item_id).await? {
                if book.contains(spell_id) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// Capacity minus prepared assignments, floored at zero per level.
fn remaining_slots(capacity: SpellSlots, prepared: &[PreparedSpell]) -> SpellSlots {
    let mut available = capacity;
    for level in SPELL_LEVEL_MIN..=SPELL_LEVEL_MAX {
        let used = prepared
            .iter()
            .filter(|p| p.slot_level == level)
            .count() as u8;
        available.set_at_level(level, capacity.at_level(level).saturating_sub(used));
    }
    available
}

fn new_assignment(
    character: &Character,
    spell: &Spell,
    casting: CastingClass,
    slot_level: u8,
) -> PreparedSpell {
    let now = Utc::now();
    PreparedSpell {
        id: PreparedSpellId::new(),
        character_id: character.id,
        spell_id: spell.id,
        spell_name: spell.name.clone(),
        slot_level,
        casting_class: casting,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{
        MockCharacterStore, MockClassDataStore, MockInventoryStore, MockItemStore,
        MockPreparedSpellStore, MockSpellStore,
    };
    use crate::test_support::{
        arcane_spell, character_with_intelligence, class_row_with_slots, inventory_entry,
        spellbook_with,
    };
    use thuleria_domain::ItemId;

    struct Mocks {
        characters: MockCharacterStore,
        class_data: MockClassDataStore,
        inventory: MockInventoryStore,
        items: MockItemStore,
        spells: MockSpellStore,
        prepared: MockPreparedSpellStore,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                characters: MockCharacterStore::new(),
                class_data: MockClassDataStore::new(),
                inventory: MockInventoryStore::new(),
                items: MockItemStore::new(),
                spells: MockSpellStore::new(),
                prepared: MockPreparedSpellStore::new(),
            }
        }

        fn into_service(self) -> SpellcastingService {
            SpellcastingService::new(
                Arc::new(self.characters),
                Arc::new(self.class_data),
                Arc::new(self.inventory),
                Arc::new(self.items),
                Arc::new(self.spells),
                Arc::new(self.prepared),
            )
        }
    }

    /// A magician with four level-1 slots in the class row and the
    /// intelligence bonus slot landing at the bracket level.
    #[tokio::test]
    async fn magician_capacity_includes_intelligence_bonus() {
        let character = character_with_intelligence("Magician", 5, 14);
        let character_id = character.id;

        let mut mocks = Mocks::new();
        mocks
            .characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        mocks
            .class_data
            .expect_class_level()
            .returning(|class, level| {
                Ok(Some(class_row_with_slots(class, level, &[(1, 4), (2, 2)])))
            });
        mocks.prepared.expect_for_character().returning(|_| Ok(vec![]));

        let available = mocks
            .into_service()
            .available_slots(character_id)
            .await
            .expect("slots");
        // Intelligence 14 adds one slot at level 1: 4 + 1.
        assert_eq!(available.level1, 5);
        assert_eq!(available.level2, 2);
    }

    #[tokio::test]
    async fn intelligence_16_bonus_lands_at_level_two() {
        let character = character_with_intelligence("Magician", 5, 16);
        let character_id = character.id;

        let mut mocks = Mocks::new();
        mocks
            .characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        mocks
            .class_data
            .expect_class_level()
            .returning(|class, level| {
                Ok(Some(class_row_with_slots(class, level, &[(1, 4), (2, 2)])))
            });
        mocks.prepared.expect_for_character().returning(|_| Ok(vec![]));

        let available = mocks
            .into_service()
            .available_slots(character_id)
            .await
            .expect("slots");
        assert_eq!(available.level1, 4);
        assert_eq!(available.level2, 3);
    }

    #[tokio::test]
    async fn fighter_cannot_prepare() {
        let character = character_with_intelligence("Fighter", 5, 14);
        let character_id = character.id;

        let mut mocks = Mocks::new();
        mocks
            .characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));

        let err = mocks
            .into_service()
            .prepare(character_id, SpellId::new(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, SpellcastingError::NotACaster(ref c) if c == "Fighter"));
    }

    #[tokio::test]
    async fn slot_level_out_of_range_is_rejected_first() {
        let err = Mocks::new()
            .into_service()
            .prepare(CharacterId::new(), SpellId::new(), 10)
            .await
            .unwrap_err();
        assert!(matches!(err, SpellcastingError::InvalidSlotLevel(10)));
    }

    #[tokio::test]
    async fn arcane_preparation_requires_the_spell_in_a_carried_book() {
        let character = character_with_intelligence("Magician", 3, 10);
        let character_id = character.id;
        let spell = arcane_spell("Sorcerous Bolt", 1);
        let spell_id = spell.id;

        let mut mocks = Mocks::new();
        mocks
            .characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        mocks
            .spells
            .expect_get()
            .returning(move |_| Ok(Some(spell.clone())));
        // Inventory holds no spellbook at all.
        mocks.inventory.expect_items().returning(|_| Ok(vec![]));

        let err = mocks
            .into_service()
            .prepare(character_id, spell_id, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, SpellcastingError::NotInSpellbook(_)));
    }

    #[tokio::test]
    async fn preparation_happy_path_persists_the_assignment() {
        let character = character_with_intelligence("Magician", 3, 10);
        let character_id = character.id;
        let spell = arcane_spell("Sorcerous Bolt", 1);
        let spell_id = spell.id;
        let book_id = ItemId::new();

        let mut mocks = Mocks::new();
        mocks
            .characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        mocks
            .spells
            .expect_get()
            .returning(move |_| Ok(Some(spell.clone())));

        let entry = inventory_entry(character_id, ItemKind::Spellbook, book_id, 1, false);
        mocks
            .inventory
            .expect_items()
            .returning(move |_| Ok(vec![entry.clone()]));
        mocks
            .items
            .expect_spellbook()
            .returning(move |id| Ok(Some(spellbook_with(id, vec![spell_id]))));

        mocks
            .class_data
            .expect_class_level()
            .returning(|class, level| {
                Ok(Some(class_row_with_slots(class, level, &[(1, 2)])))
            });
        mocks
            .prepared
            .expect_count_at_level()
            .returning(|_, _| Ok(0));
        mocks
            .prepared
            .expect_is_prepared()
            .returning(|_, _| Ok(false));
        mocks.prepared.expect_prepare().times(1).returning(|_| Ok(()));

        let assignment = mocks
            .into_service()
            .prepare(character_id, spell_id, 1)
            .await
            .expect("prepare");
        assert_eq!(assignment.slot_level, 1);
        assert_eq!(assignment.spell_name, "Sorcerous Bolt");
    }

    #[tokio::test]
    async fn full_slots_reject_preparation() {
        let character = character_with_intelligence("Magician", 3, 10);
        let character_id = character.id;
        let spell = arcane_spell("Sorcerous Bolt", 1);
        let spell_id = spell.id;
        let book_id = ItemId::new();

        let mut mocks = Mocks::new();
        mocks
            .characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        mocks
            .spells
            .expect_get()
            .returning(move |_| Ok(Some(spell.clone())));
        let entry = inventory_entry(character_id, ItemKind::Spellbook, book_id, 1, false);
        mocks
            .inventory
            .expect_items()
            .returning(move |_| Ok(vec![entry.clone()]));
        mocks
            .items
            .expect_spellbook()
            .returning(move |id| Ok(Some(spellbook_with(id, vec![spell_id]))));
        mocks
            .class_data
            .expect_class_level()
            .returning(|class, level| {
                Ok(Some(class_row_with_slots(class, level, &[(1, 2)])))
            });
        mocks
            .prepared
            .expect_count_at_level()
            .returning(|_, _| Ok(2));

        let err = mocks
            .into_service()
            .prepare(character_id, spell_id, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, SpellcastingError::NoSlotsRemaining(1)));
    }

    #[tokio::test]
    async fn preparing_the_same_spell_twice_is_rejected() {
        let character = character_with_intelligence("Magician", 3, 10);
        let character_id = character.id;
        let spell = arcane_spell("Sorcerous Bolt", 1);
        let spell_id = spell.id;
        let book_id = ItemId::new();

        let mut mocks = Mocks::new();
        mocks
            .characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        mocks
            .spells
            .expect_get()
            .returning(move |_| Ok(Some(spell.clone())));
        let entry = inventory_entry(character_id, ItemKind::Spellbook, book_id, 1, false);
        mocks
            .inventory
            .expect_items()
            .returning(move |_| Ok(vec![entry.clone()]));
        mocks
            .items
            .expect_spellbook()
            .returning(move |id| Ok(Some(spellbook_with(id, vec![spell_id]))));
        mocks
            .class_data
            .expect_class_level()
            .returning(|class, level| {
                Ok(Some(class_row_with_slots(class, level, &[(1, 2)])))
            });
        mocks
            .prepared
            .expect_count_at_level()
            .returning(|_, _| Ok(1));
        mocks
            .prepared
            .expect_is_prepared()
            .returning(|_, _| Ok(true));

        let err = mocks
            .into_service()
            .prepare(character_id, spell_id, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, SpellcastingError::AlreadyPrepared(_)));
    }

    #[tokio::test]
    async fn low_slot_for_high_spell_is_rejected() {
        let character = character_with_intelligence("Magician", 7, 10);
        let character_id = character.id;
        let spell = arcane_spell("Veil of Shadow", 3);
        let spell_id = spell.id;
        let book_id = ItemId::new();

        let mut mocks = Mocks::new();
        mocks
            .characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        mocks
            .spells
            .expect_get()
            .returning(move |_| Ok(Some(spell.clone())));
        let entry = inventory_entry(character_id, ItemKind::Spellbook, book_id, 1, false);
        mocks
            .inventory
            .expect_items()
            .returning(move |_| Ok(vec![entry.clone()]));
        mocks
            .items
            .expect_spellbook()
            .returning(move |id| Ok(Some(spellbook_with(id, vec![spell_id]))));

        let err = mocks
            .into_service()
            .prepare(character_id, spell_id, 2)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SpellcastingError::SlotBelowSpellLevel {
                required: 3,
                requested: 2
            }
        ));
    }

    #[tokio::test]
    async fn unprepare_requires_a_prepared_spell() {
        let mut mocks = Mocks::new();
        mocks
            .prepared
            .expect_is_prepared()
            .returning(|_, _| Ok(false));

        let err = mocks
            .into_service()
            .unprepare(CharacterId::new(), SpellId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SpellcastingError::NotPrepared));
    }

    #[tokio::test]
    async fn unprepare_removes_a_prepared_spell() {
        let mut mocks = Mocks::new();
        mocks
            .prepared
            .expect_is_prepared()
            .returning(|_, _| Ok(true));
        mocks
            .prepared
            .expect_unprepare()
            .times(1)
            .returning(|_, _| Ok(()));

        mocks
            .into_service()
            .unprepare(CharacterId::new(), SpellId::new())
            .await
            .expect("unprepare");
    }

    #[tokio::test]
    async fn learnable_check_uses_the_arcane_ladder() {
        let character = character_with_intelligence("Magician", 5, 14);
        let character_id = character.id;
        // A third-level spell is out of reach for a level 5 magician.
        let spell = arcane_spell("Veil of Shadow", 3);
        let spell_id = spell.id;

        let mut mocks = Mocks::new();
        mocks
            .characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        mocks
            .spells
            .expect_get()
            .returning(move |_| Ok(Some(spell.clone())));

        let err = mocks
            .into_service()
            .validate_learnable(character_id, spell_id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SpellcastingError::SpellLevelTooHigh {
                spell_level: 3,
                max_level: 2
            }
        ));
    }
}
