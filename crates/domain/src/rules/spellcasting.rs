//! Spell level progression and bonus-slot brackets
//!
//! Divine and arcane casters climb the spell-level ladder on different
//! schedules; both are step functions of character level, not formulas.

use crate::rules::attributes;
use crate::rules::classes::CasterKind;

/// Lowest valid spell slot level.
pub const SPELL_LEVEL_MIN: u8 = 1;
/// Highest valid spell slot level.
pub const SPELL_LEVEL_MAX: u8 = 9;

/// Highest spell level castable at a character level.
///
/// Divine casters reach each tier at lower levels than arcane casters.
pub fn max_castable_spell_level(kind: CasterKind, character_level: u8) -> u8 {
    match kind {
        CasterKind::Divine => match character_level {
            0 => 0,
            1..=2 => 1,
            3..=4 => 2,
            5..=8 => 3,
            9..=14 => 4,
            15..=16 => 5,
            _ => 6,
        },
        CasterKind::Arcane => match character_level {
            0 => 0,
            1..=2 => 1,
            3..=6 => 2,
            7..=10 => 3,
            11..=13 => 4,
            14..=16 => 5,
            _ => 6,
        },
    }
}

/// The slot level that gains one bonus slot from a high casting ability,
/// if any. Arcane casters read the intelligence bracket, divine casters the
/// wisdom bracket.
pub fn bonus_slot_level(kind: CasterKind, ability_score: u8) -> Option<u8> {
    match kind {
        CasterKind::Arcane => attributes::intelligence(ability_score).bonus_spell_level,
        CasterKind::Divine => attributes::wisdom(ability_score).bonus_spell_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divine_ladder_steps() {
        let steps: Vec<u8> = (1..=17u8)
            .map(|level| max_castable_spell_level(CasterKind::Divine, level))
            .collect();
        assert_eq!(steps[0], 1); // level 1
        assert_eq!(steps[2], 2); // level 3
        assert_eq!(steps[4], 3); // level 5
        assert_eq!(steps[8], 4); // level 9
        assert_eq!(steps[14], 5); // level 15
        assert_eq!(steps[16], 6); // level 17
    }

    #[test]
    fn arcane_ladder_steps() {
        assert_eq!(max_castable_spell_level(CasterKind::Arcane, 1), 1);
        assert_eq!(max_castable_spell_level(CasterKind::Arcane, 3), 2);
        assert_eq!(max_castable_spell_level(CasterKind::Arcane, 7), 3);
        assert_eq!(max_castable_spell_level(CasterKind::Arcane, 11), 4);
        assert_eq!(max_castable_spell_level(CasterKind::Arcane, 14), 5);
        assert_eq!(max_castable_spell_level(CasterKind::Arcane, 17), 6);
    }

    #[test]
    fn divine_outpaces_arcane() {
        for level in 1..=17u8 {
            assert!(
                max_castable_spell_level(CasterKind::Divine, level)
                    >= max_castable_spell_level(CasterKind::Arcane, level)
            );
        }
    }

    #[test]
    fn arcane_bonus_slot_brackets() {
        assert_eq!(bonus_slot_level(CasterKind::Arcane, 12), None);
        assert_eq!(bonus_slot_level(CasterKind::Arcane, 14), Some(1));
        assert_eq!(bonus_slot_level(CasterKind::Arcane, 16), Some(2));
        assert_eq!(bonus_slot_level(CasterKind::Arcane, 17), Some(3));
        assert_eq!(bonus_slot_level(CasterKind::Arcane, 18), Some(4));
    }
}
