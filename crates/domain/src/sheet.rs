//! The derived character sheet
//!
//! A [`CharacterSheet`] is a view: every field on it is recomputed from the
//! raw [`Character`], its equipment, and the class reference data on each
//! read. Nothing here is persisted, so a stored sheet can never drift out of
//! sync with its inputs.
//!
//! Enrichment is order-sensitive; later steps override earlier ones:
//!
//! 1. [`CharacterSheet::base`] — attribute tables populate the baseline.
//! 2. Class/level reference lookup (engine crate; missing row is fatal).
//! 3. [`CharacterSheet::apply_class_level_data`] — hit dice, saves,
//!    fighting/casting ability, base slot table.
//! 4. [`CharacterSheet::apply_save_profile`] — reset the five categories,
//!    then the fixed class profile.
//! 5. [`CharacterSheet::apply_class_effects`] — class side effects, fed with
//!    precomputed encumbrance/armor facts.
//! 6. [`CharacterSheet::attach_class_abilities`] — the level-gated list.

use serde::{Deserialize, Serialize};

use crate::entities::{Character, ClassAbility, ClassLevelData, SpellSlots};
use crate::rules::attributes::AttributeBlock;
use crate::rules::classes::{
    self, ClassKind, SaveBonuses, ThiefSkill,
};

/// Unencumbered base movement rate.
pub const BASE_MOVEMENT_RATE: i32 = 40;

/// Facts about worn equipment and load, computed once by the caller and fed
/// into the class-effects stage. Keeping this a plain input (rather than
/// re-deriving it here) keeps the sheet independently testable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentProfile {
    pub wearing_armor: bool,
    /// True when the worn armor is medium or heavy
    pub wearing_medium_or_heavy_armor: bool,
    pub heavy_encumbered: bool,
}

impl EquipmentProfile {
    /// Unarmored and light enough to move freely.
    pub fn is_unburdened(&self) -> bool {
        !self.wearing_armor && !self.heavy_encumbered
    }
}

/// Combat numbers that class effects may adjust after the tables run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub melee_modifier: i32,
    pub missile_modifier: i32,
    pub damage_adjustment: i32,
    pub defence_adjustment: i32,
    pub willpower_adjustment: i32,
}

/// Class-specific data that only some classes carry, modeled as a tagged
/// union instead of an untyped map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassAttachment {
    /// Berserker toughened hide
    NaturalArmour { natural_ac: i32 },
    /// Monk unarmed combat training
    MartialArts { ac_bonus: i32, unarmed_damage: String },
    /// Runegraver rune allotment
    RuneCarving { runes_per_day: u8 },
    /// Thief-type skill table
    ThiefSkills { skills: Vec<ThiefSkill> },
}

/// The fully derived view of one character. Serialize-only: a sheet is
/// never read back in, it is recomputed.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheet {
    pub character: Character,
    /// Resolved class; `None` for homebrew names, which get no class
    /// overrides
    pub class: Option<ClassKind>,
    pub attributes: AttributeBlock,
    pub combat: CombatStats,
    /// Extraordinary feat of strength, e.g. "32%"; the Barbarian bump lands
    /// here
    pub extra_strength_feat: String,
    pub hit_dice: Option<String>,
    pub saving_throw: Option<i32>,
    pub fighting_ability: Option<i32>,
    pub casting_ability: Option<i32>,
    pub turning_ability: Option<i32>,
    pub save_bonuses: SaveBonuses,
    pub spell_slots: SpellSlots,
    pub movement_rate: i32,
    /// Chance-in-six of surprising opponents, 0 when unremarkable
    pub surprise_chance: i32,
    pub attachments: Vec<ClassAttachment>,
    pub class_abilities: Vec<ClassAbility>,
}

impl CharacterSheet {
    /// Step 1: the baseline sheet, derived from ability scores alone.
    ///
    /// This is also the complete sheet for an unknown class.
    pub fn base(character: &Character) -> Self {
        let attributes = AttributeBlock::derive(&character.abilities);
        let combat = CombatStats {
            melee_modifier: attributes.strength.melee_modifier,
            missile_modifier: attributes.dexterity.missile_modifier,
            damage_adjustment: attributes.strength.damage_adjustment,
            defence_adjustment: attributes.dexterity.defence_adjustment,
            willpower_adjustment: attributes.wisdom.willpower_adjustment,
        };
        Self {
            class: ClassKind::parse(&character.class),
            character: character.clone(),
            attributes,
            combat,
            extra_strength_feat: attributes.strength.extraordinary_feat.to_string(),
            hit_dice: None,
            saving_throw: None,
            fighting_ability: None,
            casting_ability: None,
            turning_ability: None,
            save_bonuses: SaveBonuses::default(),
            spell_slots: SpellSlots::default(),
            movement_rate: BASE_MOVEMENT_RATE,
            surprise_chance: 0,
            attachments: Vec::new(),
            class_abilities: Vec::new(),
        }
    }

    /// Step 3: overwrite progression values from the class/level row.
    pub fn apply_class_level_data(&mut self, data: &ClassLevelData) {
        self.hit_dice = Some(data.hit_dice.clone());
        self.saving_throw = Some(data.saving_throw);
        self.fighting_ability = Some(data.fighting_ability);
        self.casting_ability = data.casting_ability;
        self.turning_ability = data.turning_ability;
        self.spell_slots = data.spell_slots.unwrap_or_default();
    }

    /// Step 4: reset the five save categories, then apply the fixed class
    /// profile.
    pub fn apply_save_profile(&mut self, class: ClassKind) {
        self.save_bonuses = class.save_profile();
    }

    /// Fold a hybrid caster's secondary slot table into the class row table.
    pub fn merge_secondary_spell_slots(&mut self, secondary: &SpellSlots) {
        self.spell_slots.merge_secondary(secondary);
    }

    /// Step 5: class side effects. `equipment` carries the already-computed
    /// encumbrance and worn-armor facts this stage depends on.
    pub fn apply_class_effects(&mut self, class: ClassKind, equipment: &EquipmentProfile) {
        if class.is_agile() && equipment.is_unburdened() {
            self.combat.defence_adjustment += 1;
        }

        match class {
            ClassKind::Barbarian => {
                self.surprise_chance = 1;
                self.bump_strength_feat(8);
                if !equipment.wearing_medium_or_heavy_armor {
                    self.movement_rate = self.movement_rate.max(50);
                }
            }
            ClassKind::Berserker => {
                self.attachments.push(ClassAttachment::NaturalArmour {
                    natural_ac: classes::berserker_natural_ac(self.character.level),
                });
            }
            ClassKind::Monk => {
                self.attachments.push(ClassAttachment::MartialArts {
                    ac_bonus: classes::monk_ac_bonus(self.character.level),
                    unarmed_damage: classes::monk_unarmed_damage(self.character.level)
                        .to_string(),
                });
            }
            ClassKind::Runegraver => {
                self.attachments.push(ClassAttachment::RuneCarving {
                    runes_per_day: classes::runegraver_runes_per_day(self.character.level),
                });
            }
            _ => {}
        }

        if class.has_thief_skills() {
            self.attachments.push(ClassAttachment::ThiefSkills {
                skills: classes::thief_skills_at_level(self.character.level),
            });
        }
    }

    /// Step 6: attach the class abilities whose minimum level is reached.
    pub fn attach_class_abilities(&mut self, class: ClassKind) {
        self.class_abilities = class.abilities_at_level(self.character.level);
    }

    /// Berserker hide or similar natural AC, if any was attached.
    pub fn natural_ac(&self) -> i32 {
        self.attachments
            .iter()
            .find_map(|attachment| match attachment {
                ClassAttachment::NaturalArmour { natural_ac } => Some(*natural_ac),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Monk deflection or similar flat AC bonus, if any was attached.
    pub fn class_ac_bonus(&self) -> i32 {
        self.attachments
            .iter()
            .find_map(|attachment| match attachment {
                ClassAttachment::MartialArts { ac_bonus, .. } => Some(*ac_bonus),
                _ => None,
            })
            .unwrap_or(0)
    }

    fn bump_strength_feat(&mut self, bump: u8) {
        if let Some(percent) = self
            .extra_strength_feat
            .strip_suffix('%')
            .and_then(|s| s.parse::<u32>().ok())
        {
            self.extra_strength_feat = format!("{}%", percent + u32::from(bump));
        }
    }
}
