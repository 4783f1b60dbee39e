//! Armor class combination
//!
//! Descending AC: the unarmored base is 9 and lower is better. Equipped
//! armor *replaces* the base; every other contribution is subtracted.

use serde::{Deserialize, Serialize};

/// Unarmored armor class.
pub const BASE_AC: i32 = 9;

/// The resolved inputs and final result of an AC computation.
///
/// If two items of one type are flagged equipped the caller keeps the last
/// one iterated; equip exclusivity belongs to the inventory layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorClassBreakdown {
    pub base_ac: i32,
    /// Replaces the base when armor is worn
    pub armor_ac: Option<i32>,
    pub shield_bonus: i32,
    /// Dexterity defence adjustment
    pub dexterity_mod: i32,
    /// Class-granted natural AC (Berserker hide)
    pub natural_ac: i32,
    /// +1 when an agile class is unarmored and not heavily encumbered
    pub agile_bonus: i32,
    /// Any other class-granted AC bonus (Monk deflection)
    pub other_bonuses: i32,
    pub final_ac: i32,
    pub armor_equipped: Option<String>,
    pub shield_equipped: Option<String>,
}

impl ArmorClassBreakdown {
    /// Combine the resolved inputs into the final AC.
    pub fn compute(mut self) -> Self {
        let mut ac = match self.armor_ac {
            Some(armor_ac) => armor_ac,
            None => self.base_ac,
        };
        ac -= self.shield_bonus;
        ac -= self.dexterity_mod;
        ac -= self.agile_bonus;
        ac -= self.natural_ac;
        ac -= self.other_bonuses;
        self.final_ac = ac;
        self
    }
}
