//! Per-weapon combat stats and mastery slot accounting.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use thuleria_domain::{
    rules::attributes,
    rules::weapon::{
        self, format_damage_with_bonus, mastery_bonuses, parse_weapon_name, AttackRate,
    },
    CharacterId, ClassKind, InventoryItem, ItemKind, MasteryLevel, Weapon, WeaponMastery,
};

use crate::ports::{CharacterStore, InventoryStore, ItemStore, MasteryStore, RepoError};

/// Warrior melee attack rates improve from this level on.
const IMPROVED_RATE_LEVEL: u8 = 7;

/// Final combat numbers for one carried weapon.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WeaponStats {
    pub weapon: Weapon,
    pub entry: InventoryItem,
    pub base_to_hit: i32,
    pub to_hit_bonus: i32,
    pub final_to_hit: i32,
    pub base_damage: String,
    pub damage_bonus: i32,
    pub final_damage: String,
    pub base_attack_rate: AttackRate,
    pub final_attack_rate: AttackRate,
    pub improved_attack_rate: bool,
    pub mastery: Option<MasteryLevel>,
}

/// Mastery slot accounting and remaining options for one character.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MasteryOverview {
    pub character_level: u8,
    pub total_slots: u8,
    pub used_slots: u8,
    pub can_grand_master: bool,
    pub current_masteries: Vec<WeaponMastery>,
    /// Base weapon names not yet mastered
    pub available_weapons: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum WeaponStatsError {
    #[error("Character not found")]
    CharacterNotFound,
    #[error("Class {0} cannot master weapons")]
    ClassCannotMaster(String),
    #[error("Class {0} cannot attain grand mastery")]
    ClassCannotGrandMaster(String),
    #[error("Grand mastery requires level 4")]
    GrandMasteryTooEarly,
    #[error("A character may hold only one grand mastery")]
    GrandMasteryTaken,
    #[error("Weapon family {0} is already mastered")]
    AlreadyMastered(String),
    #[error("Weapon family {0} is not mastered")]
    MasteryNotFound(String),
    #[error("No mastery slots remaining ({used}/{total})")]
    MasterySlotsExhausted { used: u8, total: u8 },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Computes weapon to-hit/damage/attack-rate lines and validates mastery
/// grants.
pub struct WeaponStatsService {
    character_store: Arc<dyn CharacterStore>,
    inventory_store: Arc<dyn InventoryStore>,
    item_store: Arc<dyn ItemStore>,
    mastery_store: Arc<dyn MasteryStore>,
}

impl WeaponStatsService {
    pub fn new(
        character_store: Arc<dyn CharacterStore>,
        inventory_store: Arc<dyn InventoryStore>,
        item_store: Arc<dyn ItemStore>,
        mastery_store: Arc<dyn MasteryStore>,
    ) -> Self {
        Self {
            character_store,
            inventory_store,
            item_store,
            mastery_store,
        }
    }

    /// Stats for every weapon the character carries, equipped or not.
    /// Weapons whose catalog row no longer resolves are skipped.
    pub async fn weapon_stats(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<WeaponStats>, WeaponStatsError> {
        let character = self
            .character_store
            .get(character_id)
            .await?
            .ok_or(WeaponStatsError::CharacterNotFound)?;

        let class = ClassKind::parse(&character.class);
        let strength = attributes::strength(character.abilities.strength);
        let dexterity = attributes::dexterity(character.abilities.dexterity);

        let masteries = self.mastery_store.for_character(character_id).await?;
        let mastery_by_base: HashMap<&str, MasteryLevel> = masteries
            .iter()
            .map(|m| (m.weapon_base_name.as_str(), m.level))
            .collect();

        let items = self.inventory_store.items(character_id).await?;
        let mut stats = Vec::new();

        for entry in items
            .into_iter()
            .filter(|item| item.kind == ItemKind::Weapon)
        {
            let Some(weapon) = self.item_store.weapon(entry.item_id).await? else {
                tracing::warn!(
                    character_id = %character_id,
                    item_id = %entry.item_id,
                    "carried weapon no longer resolves, skipping"
                );
                continue;
            };

            let parsed = parse_weapon_name(&weapon.name);
            let is_missile = weapon.category.is_missile();
            let mastery = mastery_by_base.get(parsed.base_name.as_str()).copied();

            // Missile weapons fire at their listed rate; melee is 1/1.
            let base_attack_rate = if is_missile {
                weapon
                    .rate_of_fire
                    .as_deref()
                    .map(AttackRate::parse)
                    .unwrap_or(AttackRate::OnePerOne)
            } else {
                AttackRate::OnePerOne
            };

            let mut to_hit_bonus = if is_missile {
                dexterity.missile_modifier
            } else {
                strength.melee_modifier
            };
            to_hit_bonus += parsed.bonus;

            // Missile fire gains no strength damage.
            let mut damage_bonus = if is_missile {
                0
            } else {
                strength.damage_adjustment
            };
            damage_bonus += parsed.bonus;

            let mut final_attack_rate = base_attack_rate.clone();
            let mut improved_attack_rate = false;
            if let Some(level) = mastery {
                let bonuses = mastery_bonuses(level);
                to_hit_bonus += bonuses.to_hit;
                damage_bonus += bonuses.damage;
                if bonuses.improved_rate {
                    final_attack_rate = base_attack_rate.improved();
                    improved_attack_rate = true;
                }
            }

            // Warrior melee rate upgrade at level 7+; mastery's improved
            // rate takes precedence and the two never stack.
            if let Some(class) = class {
                if class.is_warrior()
                    && character.level >= IMPROVED_RATE_LEVEL
                    && !is_missile
                    && base_attack_rate == AttackRate::OnePerOne
                    && final_attack_rate == AttackRate::OnePerOne
                {
                    final_attack_rate = AttackRate::ThreePerTwo;
                    improved_attack_rate = true;
                }
            }

            stats.push(WeaponStats {
                base_to_hit: 0,
                to_hit_bonus,
                final_to_hit: to_hit_bonus,
                base_damage: weapon.damage.clone(),
                damage_bonus,
                final_damage: format_damage_with_bonus(&weapon.damage, damage_bonus),
                base_attack_rate,
                final_attack_rate,
                improved_attack_rate,
                mastery,
                weapon,
                entry,
            });
        }

        Ok(stats)
    }

    /// Slot accounting plus the base weapon names still open to mastery.
    pub async fn mastery_overview(
        &self,
        character_id: CharacterId,
    ) -> Result<MasteryOverview, WeaponStatsError> {
        let character = self
            .character_store
            .get(character_id)
            .await?
            .ok_or(WeaponStatsError::CharacterNotFound)?;

        let class = ClassKind::parse(&character.class);
        let Some(class) = class.filter(ClassKind::can_master_weapons) else {
            return Ok(MasteryOverview {
                character_level: character.level,
                total_slots: 0,
                used_slots: 0,
                can_grand_master: false,
                current_masteries: Vec::new(),
                available_weapons: Vec::new(),
            });
        };

        let current_masteries = self.mastery_store.for_character(character_id).await?;
        let used_slots: u8 = current_masteries
            .iter()
            .map(|m| m.level.slot_cost())
            .sum();
        let has_grand_mastery = current_masteries
            .iter()
            .any(|m| m.level == MasteryLevel::GrandMastery);

        let base_slots = if class.is_warrior() { 2 } else { 1 };
        let total_slots = weapon::mastery_slots(base_slots, character.level);

        let mastered: HashSet<&str> = current_masteries
            .iter()
            .map(|m| m.weapon_base_name.as_str())
            .collect();

        // Distinct family names from the catalog, minus those already held.
        let mut seen = HashSet::new();
        let mut available_weapons = Vec::new();
        for weapon in self.item_store.weapons().await? {
            let base = weapon::base_weapon_name(&weapon.name);
            if seen.insert(base.clone()) && !mastered.contains(base.as_str()) {
                available_weapons.push(base);
            }
        }

        Ok(MasteryOverview {
            character_level: character.level,
            total_slots,
            used_slots,
            can_grand_master: class.can_grand_master()
                && weapon::can_declare_grand_mastery(character.level)
                && !has_grand_mastery,
            current_masteries,
            available_weapons,
        })
    }

    /// Validate and persist a new mastery grant.
    pub async fn grant_mastery(
        &self,
        character_id: CharacterId,
        weapon_base_name: &str,
        level: MasteryLevel,
    ) -> Result<WeaponMastery, WeaponStatsError> {
        let character = self
            .character_store
            .get(character_id)
            .await?
            .ok_or(WeaponStatsError::CharacterNotFound)?;

        let class = ClassKind::parse(&character.class)
            .filter(ClassKind::can_master_weapons)
            .ok_or_else(|| WeaponStatsError::ClassCannotMaster(character.class.clone()))?;

        let current = self.mastery_store.for_character(character_id).await?;
        let base_name = weapon::base_weapon_name(weapon_base_name);

        if current.iter().any(|m| m.weapon_base_name == base_name) {
            return Err(WeaponStatsError::AlreadyMastered(base_name));
        }

        if level == MasteryLevel::GrandMastery {
            if !class.can_grand_master() {
                return Err(WeaponStatsError::ClassCannotGrandMaster(
                    character.class.clone(),
                ));
            }
            if !weapon::can_declare_grand_mastery(character.level) {
                return Err(WeaponStatsError::GrandMasteryTooEarly);
            }
            if current.iter().any(|m| m.level == MasteryLevel::GrandMastery) {
                return Err(WeaponStatsError::GrandMasteryTaken);
            }
        }

        let base_slots = if class.is_warrior() { 2 } else { 1 };
        let total = weapon::mastery_slots(base_slots, character.level);
        let used: u8 = current.iter().map(|m| m.level.slot_cost()).sum();
        if used + level.slot_cost() > total {
            return Err(WeaponStatsError::MasterySlotsExhausted { used, total });
        }

        let mastery = WeaponMastery::new(character_id, base_name, level);
        self.mastery_store.grant(&mastery).await?;
        tracing::info!(
            character_id = %character_id,
            weapon = %mastery.weapon_base_name,
            level = %mastery.level,
            "weapon mastery granted"
        );
        Ok(mastery)
    }

    /// Drop a mastery grant, freeing its slots.
    pub async fn revoke_mastery(
        &self,
        character_id: CharacterId,
        weapon_base_name: &str,
    ) -> Result<(), WeaponStatsError> {
        let base_name = weapon::base_weapon_name(weapon_base_name);
        let current = self.mastery_store.for_character(character_id).await?;
        let mastery = current
            .iter()
            .find(|m| m.weapon_base_name == base_name)
            .ok_or_else(|| WeaponStatsError::MasteryNotFound(base_name.clone()))?;
        self.mastery_store.revoke(mastery.id).await?;
        Ok(())
    }

    /// Intensify an existing mastery into grand mastery, consuming the
    /// second slot.
    pub async fn promote_to_grand_mastery(
        &self,
        character_id: CharacterId,
        weapon_base_name: &str,
    ) -> Result<(), WeaponStatsError> {
        let character = self
            .character_store
            .get(character_id)
            .await?
            .ok_or(WeaponStatsError::CharacterNotFound)?;

        let class = ClassKind::parse(&character.class)
            .filter(ClassKind::can_master_weapons)
            .ok_or_else(|| WeaponStatsError::ClassCannotMaster(character.class.clone()))?;
        if !class.can_grand_master() {
            return Err(WeaponStatsError::ClassCannotGrandMaster(
                character.class.clone(),
            ));
        }
        if !weapon::can_declare_grand_mastery(character.level) {
            return Err(WeaponStatsError::GrandMasteryTooEarly);
        }

        let base_name = weapon::base_weapon_name(weapon_base_name);
        let current = self.mastery_store.for_character(character_id).await?;
        if current.iter().any(|m| m.level == MasteryLevel::GrandMastery) {
            return Err(WeaponStatsError::GrandMasteryTaken);
        }
        let mastery = current
            .iter()
            .find(|m| m.weapon_base_name == base_name)
            .ok_or_else(|| WeaponStatsError::MasteryNotFound(base_name.clone()))?;

        // The promotion consumes one further slot on top of the one held.
        let base_slots = if class.is_warrior() { 2 } else { 1 };
        let total = weapon::mastery_slots(base_slots, character.level);
        let used: u8 = current.iter().map(|m| m.level.slot_cost()).sum();
        if used + 1 > total {
            return Err(WeaponStatsError::MasterySlotsExhausted { used, total });
        }

        self.mastery_store
            .update_level(mastery.id, MasteryLevel::GrandMastery)
            .await?;
        tracing::info!(
            character_id = %character_id,
            weapon = %base_name,
            "mastery promoted to grand mastery"
        );
        Ok(())
    }
}
