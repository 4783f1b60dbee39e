//! Attribute modifier tables
//!
//! Each of the six ability scores maps to a fixed, non-linear bracket table
//! (3, 4-6, 7-8, 9-12, 13-14, 15-16, 17, 18). The values are published table
//! lookups, not formulas; do not replace them with arithmetic
//! approximations. Scores outside 3..=18 are a caller contract violation
//! (validated upstream); the matches below clamp to the nearest bracket
//! rather than panic.

use serde::Serialize;

use crate::entities::AbilityScores;

/// Strength-derived combat values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthAttributes {
    /// Added to melee to-hit rolls
    pub melee_modifier: i32,
    /// Added to melee damage
    pub damage_adjustment: i32,
    /// Test of strength, chance-in-six
    pub test: &'static str,
    /// Extraordinary feat of strength
    pub extraordinary_feat: &'static str,
}

pub fn strength(score: u8) -> StrengthAttributes {
    let (melee_modifier, damage_adjustment, test, extraordinary_feat) = match score {
        ..=3 => (-2, -2, "1:6", "0%"),
        4..=6 => (-1, -1, "1:6", "1%"),
        7..=8 => (0, -1, "2:6", "2%"),
        9..=12 => (0, 0, "2:6", "4%"),
        13..=14 => (1, 0, "3:6", "8%"),
        15..=16 => (1, 1, "3:6", "16%"),
        17 => (2, 2, "4:6", "24%"),
        _ => (2, 3, "5:6", "32%"),
    };
    StrengthAttributes {
        melee_modifier,
        damage_adjustment,
        test,
        extraordinary_feat,
    }
}

/// Dexterity-derived values. The numeric progression mirrors the strength
/// table: missile modifier tracks the melee column, defence adjustment the
/// damage column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DexterityAttributes {
    /// Added to missile to-hit rolls
    pub missile_modifier: i32,
    /// Subtracted from AC (lower AC is better)
    pub defence_adjustment: i32,
    pub test: &'static str,
    pub extraordinary_feat: &'static str,
}

pub fn dexterity(score: u8) -> DexterityAttributes {
    let (missile_modifier, defence_adjustment, test, extraordinary_feat) = match score {
        ..=3 => (-2, -2, "1:6", "0%"),
        4..=6 => (-1, -1, "1:6", "1%"),
        7..=8 => (0, -1, "2:6", "2%"),
        9..=12 => (0, 0, "2:6", "4%"),
        13..=14 => (1, 0, "3:6", "8%"),
        15..=16 => (1, 1, "3:6", "16%"),
        17 => (2, 2, "4:6", "24%"),
        _ => (2, 3, "5:6", "32%"),
    };
    DexterityAttributes {
        missile_modifier,
        defence_adjustment,
        test,
        extraordinary_feat,
    }
}

/// Constitution-derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstitutionAttributes {
    /// Added per hit die
    pub hit_point_modifier: i32,
    /// Chance to survive system-shock trauma
    pub trauma_survival: &'static str,
    pub test: &'static str,
    pub extraordinary_feat: &'static str,
}

pub fn constitution(score: u8) -> ConstitutionAttributes {
    let (hit_point_modifier, trauma_survival, test, extraordinary_feat) = match score {
        ..=3 => (-1, "45%", "1:6", "0%"),
        4..=6 => (-1, "55%", "1:6", "1%"),
        7..=8 => (0, "65%", "2:6", "2%"),
        9..=12 => (0, "75%", "2:6", "4%"),
        13..=14 => (1, "80%", "3:6", "8%"),
        15..=16 => (1, "85%", "3:6", "16%"),
        17 => (2, "90%", "4:6", "24%"),
        _ => (3, "95%", "5:6", "32%"),
    };
    ConstitutionAttributes {
        hit_point_modifier,
        trauma_survival,
        test,
        extraordinary_feat,
    }
}

/// Intelligence-derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntelligenceAttributes {
    /// Additional languages beyond the native tongue
    pub languages: u8,
    /// Arcane casters gain one bonus slot at this spell level
    pub bonus_spell_level: Option<u8>,
}

pub fn intelligence(score: u8) -> IntelligenceAttributes {
    let (languages, bonus_spell_level) = match score {
        ..=8 => (0, None),
        9..=12 => (1, None),
        13..=14 => (2, Some(1)),
        15..=16 => (3, Some(2)),
        17 => (4, Some(3)),
        _ => (5, Some(4)),
    };
    IntelligenceAttributes {
        languages,
        bonus_spell_level,
    }
}

/// Wisdom-derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WisdomAttributes {
    /// Applied to sorcery and device saving throws
    pub willpower_adjustment: i32,
    /// Divine casters gain one bonus slot at this spell level
    pub bonus_spell_level: Option<u8>,
}

pub fn wisdom(score: u8) -> WisdomAttributes {
    let (willpower_adjustment, bonus_spell_level) = match score {
        ..=3 => (-2, None),
        4..=6 => (-1, None),
        7..=8 => (0, None),
        9..=12 => (0, None),
        13..=14 => (1, Some(1)),
        15..=16 => (1, Some(2)),
        17 => (2, Some(3)),
        _ => (2, Some(4)),
    };
    WisdomAttributes {
        willpower_adjustment,
        bonus_spell_level,
    }
}

/// Charisma-derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharismaAttributes {
    /// Applied to encounter reaction rolls
    pub reaction_adjustment: i32,
    /// Maximum number of retained henchmen
    pub max_henchmen: u8,
    /// Applied to undead turning checks
    pub turning_adjustment: i32,
}

pub fn charisma(score: u8) -> CharismaAttributes {
    let (reaction_adjustment, max_henchmen, turning_adjustment) = match score {
        ..=3 => (-3, 1, -1),
        4..=6 => (-2, 2, -1),
        7..=8 => (-1, 3, 0),
        9..=12 => (0, 4, 0),
        13..=14 => (1, 6, 1),
        15..=16 => (1, 8, 1),
        17 => (2, 10, 2),
        _ => (3, 12, 3),
    };
    CharismaAttributes {
        reaction_adjustment,
        max_henchmen,
        turning_adjustment,
    }
}

/// All six ability tables evaluated for one set of scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeBlock {
    pub strength: StrengthAttributes,
    pub dexterity: DexterityAttributes,
    pub constitution: ConstitutionAttributes,
    pub intelligence: IntelligenceAttributes,
    pub wisdom: WisdomAttributes,
    pub charisma: CharismaAttributes,
}

impl AttributeBlock {
    pub fn derive(scores: &AbilityScores) -> Self {
        Self {
            strength: strength(scores.strength),
            dexterity: dexterity(scores.dexterity),
            constitution: constitution(scores.constitution),
            intelligence: intelligence(scores.intelligence),
            wisdom: wisdom(scores.wisdom),
            charisma: charisma(scores.charisma),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_18_bracket() {
        let s = strength(18);
        assert_eq!(s.melee_modifier, 2);
        assert_eq!(s.damage_adjustment, 3);
        assert_eq!(s.test, "5:6");
        assert_eq!(s.extraordinary_feat, "32%");
    }

    #[test]
    fn strength_brackets_are_stepwise() {
        assert_eq!(strength(3).melee_modifier, -2);
        assert_eq!(strength(6).melee_modifier, -1);
        assert_eq!(strength(7).damage_adjustment, -1);
        assert_eq!(strength(9).damage_adjustment, 0);
        assert_eq!(strength(12), strength(9));
        assert_eq!(strength(13).melee_modifier, 1);
        assert_eq!(strength(17).damage_adjustment, 2);
    }

    #[test]
    fn tables_are_idempotent_per_score() {
        for score in 3..=18u8 {
            assert_eq!(strength(score), strength(score));
            assert_eq!(dexterity(score), dexterity(score));
            assert_eq!(constitution(score), constitution(score));
            assert_eq!(intelligence(score), intelligence(score));
            assert_eq!(wisdom(score), wisdom(score));
            assert_eq!(charisma(score), charisma(score));
        }
    }

    #[test]
    fn intelligence_bonus_slot_brackets() {
        assert_eq!(intelligence(12).bonus_spell_level, None);
        assert_eq!(intelligence(13).bonus_spell_level, Some(1));
        assert_eq!(intelligence(14).bonus_spell_level, Some(1));
        assert_eq!(intelligence(16).bonus_spell_level, Some(2));
        assert_eq!(intelligence(17).bonus_spell_level, Some(3));
        assert_eq!(intelligence(18).bonus_spell_level, Some(4));
    }

    #[test]
    fn constitution_hp_modifier_progression() {
        assert_eq!(constitution(3).hit_point_modifier, -1);
        assert_eq!(constitution(10).hit_point_modifier, 0);
        assert_eq!(constitution(14).hit_point_modifier, 1);
        assert_eq!(constitution(18).hit_point_modifier, 3);
    }

    #[test]
    fn charisma_henchmen_scale_with_score() {
        let mut prev = 0;
        for score in 3..=18u8 {
            let h = charisma(score).max_henchmen;
            assert!(h >= prev, "henchmen must not decrease");
            prev = h;
        }
    }
}
