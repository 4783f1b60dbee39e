//! Weapon name parsing, attack rates, and mastery arithmetic
//!
//! Magic weapons encode their enchantment in the display name ("Longsword +1
//! of Fire"). The parsing below recovers a structured (base name, bonus,
//! suffix) triple once, so downstream components never re-parse strings.

use serde::{Deserialize, Serialize};

use crate::entities::MasteryLevel;

/// Named-weapon suffixes stripped when deriving the canonical family name.
const NAMED_SUFFIXES: &[&str] = &[
    " of Slaying",
    " of Fire",
    " of Frost",
    " of Lightning",
    " of Venom",
    " of Speed",
    " of Accuracy",
    " of Power",
];

/// A weapon display name resolved into its structured parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedWeaponName {
    /// Canonical family name used for mastery lookup
    pub base_name: String,
    /// Flat to-hit/damage bonus from a "+N" token, 0 if absent
    pub bonus: i32,
    /// The named suffix, if any (e.g. "of Fire")
    pub suffix: Option<String>,
}

/// Resolve a display name into (base name, bonus, suffix).
///
/// Idempotent: parsing an already extracted base name returns it unchanged
/// with a zero bonus.
pub fn parse_weapon_name(name: &str) -> ParsedWeaponName {
    let bonus = extract_bonus(name);

    let mut base = name;
    if let Some(idx) = base.find(" +") {
        base = &base[..idx];
    }

    let mut suffix = None;
    for candidate in NAMED_SUFFIXES {
        if let Some(idx) = base.find(candidate) {
            suffix = Some(candidate.trim().to_string());
            base = &base[..idx];
            break;
        }
    }

    ParsedWeaponName {
        base_name: base.trim().to_string(),
        bonus,
        suffix,
    }
}

/// Canonical family name alone; see [`parse_weapon_name`].
pub fn base_weapon_name(name: &str) -> String {
    parse_weapon_name(name).base_name
}

fn extract_bonus(name: &str) -> i32 {
    let Some(idx) = name.find(" +") else {
        return 0;
    };
    let token = &name[idx + 2..];
    let token = token.split_whitespace().next().unwrap_or("");
    token.parse().unwrap_or(0)
}

/// Attacks per round, written as attacks/rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackRate {
    OnePerTwo,
    OnePerOne,
    ThreePerTwo,
    TwoPerOne,
    FivePerTwo,
    ThreePerOne,
    /// Rates outside the standard progression pass through unchanged
    Other(String),
}

impl AttackRate {
    pub fn parse(s: &str) -> Self {
        match s {
            "1/2" => Self::OnePerTwo,
            "1/1" => Self::OnePerOne,
            "3/2" => Self::ThreePerTwo,
            "2/1" => Self::TwoPerOne,
            "5/2" => Self::FivePerTwo,
            "3/1" => Self::ThreePerOne,
            other => Self::Other(other.to_string()),
        }
    }

    /// One step along the mastery progression
    /// 1/2 -> 1/1 -> 3/2 -> 2/1 -> 5/2 -> 3/1; anything else is unchanged.
    pub fn improved(&self) -> Self {
        match self {
            Self::OnePerTwo => Self::OnePerOne,
            Self::OnePerOne => Self::ThreePerTwo,
            Self::ThreePerTwo => Self::TwoPerOne,
            Self::TwoPerOne => Self::FivePerTwo,
            Self::FivePerTwo => Self::ThreePerOne,
            Self::ThreePerOne => Self::ThreePerOne,
            Self::Other(s) => Self::Other(s.clone()),
        }
    }
}

impl std::fmt::Display for AttackRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnePerTwo => write!(f, "1/2"),
            Self::OnePerOne => write!(f, "1/1"),
            Self::ThreePerTwo => write!(f, "3/2"),
            Self::TwoPerOne => write!(f, "2/1"),
            Self::FivePerTwo => write!(f, "5/2"),
            Self::ThreePerOne => write!(f, "3/1"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Combat effects of a mastery grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryBonuses {
    pub to_hit: i32,
    pub damage: i32,
    pub improved_rate: bool,
    pub improved_critical: bool,
}

pub fn mastery_bonuses(level: MasteryLevel) -> MasteryBonuses {
    match level {
        MasteryLevel::Mastered => MasteryBonuses {
            to_hit: 1,
            damage: 1,
            improved_rate: false,
            improved_critical: false,
        },
        MasteryLevel::GrandMastery => MasteryBonuses {
            to_hit: 2,
            damage: 2,
            improved_rate: true,
            improved_critical: true,
        },
    }
}

/// Append a flat bonus to a damage dice string: "1d8" + 3 -> "1d8+3".
pub fn format_damage_with_bonus(base_damage: &str, bonus: i32) -> String {
    match bonus {
        0 => base_damage.to_string(),
        b if b > 0 => format!("{base_damage}+{b}"),
        b => format!("{base_damage}{b}"),
    }
}

/// Total mastery slots available to a class at a level: a base of 2 for the
/// warrior classes (1 otherwise), plus one at each of levels 4, 8, and 12.
pub fn mastery_slots(base_slots: u8, level: u8) -> u8 {
    let mut slots = base_slots;
    for threshold in [4u8, 8, 12] {
        if level >= threshold {
            slots += 1;
        }
    }
    slots
}

/// Grand mastery may be declared from level 4 on.
pub fn can_declare_grand_mastery(level: u8) -> bool {
    level >= 4
}
