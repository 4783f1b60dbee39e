//! Per-class rule profiles
//!
//! The class name on a character stays a free string; this module resolves it
//! into a [`ClassKind`] when recognized. Unrecognized names are not an error:
//! the sheet is then built from attributes alone, which keeps homebrew
//! classes readable.
//!
//! Everything here is a fixed lookup: save-bonus profiles, warrior/caster
//! classification, mastery slot rules, ability catalogs, thief skills, and
//! the small level-band tables for class-specific extras.

use serde::{Deserialize, Serialize};

use crate::entities::ClassAbility;

/// The classes of the ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Assassin,
    Barbarian,
    Bard,
    Berserker,
    Cataphract,
    Cleric,
    Cryomancer,
    Druid,
    Fighter,
    Huntsman,
    Illusionist,
    Legerdemainist,
    Magician,
    Monk,
    Necromancer,
    Paladin,
    Priest,
    Purloiner,
    Pyromancer,
    Ranger,
    Runegraver,
    Scout,
    Shaman,
    Thief,
    Warlock,
    Witch,
}

impl ClassKind {
    /// Resolve a stored class name. `None` means "unknown class": the caller
    /// skips class-specific enrichment instead of failing the request.
    pub fn parse(name: &str) -> Option<Self> {
        let kind = match name {
            "Assassin" => Self::Assassin,
            "Barbarian" => Self::Barbarian,
            "Bard" => Self::Bard,
            "Berserker" => Self::Berserker,
            "Cataphract" => Self::Cataphract,
            "Cleric" => Self::Cleric,
            "Cryomancer" => Self::Cryomancer,
            "Druid" => Self::Druid,
            "Fighter" => Self::Fighter,
            "Huntsman" => Self::Huntsman,
            "Illusionist" => Self::Illusionist,
            "Legerdemainist" => Self::Legerdemainist,
            "Magician" => Self::Magician,
            "Monk" => Self::Monk,
            "Necromancer" => Self::Necromancer,
            "Paladin" => Self::Paladin,
            "Priest" => Self::Priest,
            "Purloiner" => Self::Purloiner,
            "Pyromancer" => Self::Pyromancer,
            "Ranger" => Self::Ranger,
            "Runegraver" => Self::Runegraver,
            "Scout" => Self::Scout,
            "Shaman" => Self::Shaman,
            "Thief" => Self::Thief,
            "Warlock" => Self::Warlock,
            "Witch" => Self::Witch,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Assassin => "Assassin",
            Self::Barbarian => "Barbarian",
            Self::Bard => "Bard",
            Self::Berserker => "Berserker",
            Self::Cataphract => "Cataphract",
            Self::Cleric => "Cleric",
            Self::Cryomancer => "Cryomancer",
            Self::Druid => "Druid",
            Self::Fighter => "Fighter",
            Self::Huntsman => "Huntsman",
            Self::Illusionist => "Illusionist",
            Self::Legerdemainist => "Legerdemainist",
            Self::Magician => "Magician",
            Self::Monk => "Monk",
            Self::Necromancer => "Necromancer",
            Self::Paladin => "Paladin",
            Self::Priest => "Priest",
            Self::Purloiner => "Purloiner",
            Self::Pyromancer => "Pyromancer",
            Self::Ranger => "Ranger",
            Self::Runegraver => "Runegraver",
            Self::Scout => "Scout",
            Self::Shaman => "Shaman",
            Self::Thief => "Thief",
            Self::Warlock => "Warlock",
            Self::Witch => "Witch",
        }
    }
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The five fixed saving-throw bonus categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveBonuses {
    pub death: i32,
    pub transformation: i32,
    pub device: i32,
    pub sorcery: i32,
    pub avoidance: i32,
}

impl ClassKind {
    /// The fixed per-class saving-throw bonus profile. Applied after the
    /// categories are reset to zero; a lookup, not a formula.
    pub fn save_profile(&self) -> SaveBonuses {
        let (death, transformation, device, sorcery, avoidance) = match self {
            Self::Fighter => (2, 2, 0, 0, 0),
            Self::Barbarian => (2, 2, 2, 2, 2),
            Self::Berserker => (2, 2, 0, 0, 0),
            Self::Cataphract => (2, 2, 0, 0, 0),
            Self::Huntsman => (2, 0, 0, 0, 2),
            Self::Paladin => (2, 2, 0, 0, 0),
            Self::Ranger => (2, 0, 0, 0, 2),
            Self::Cleric => (0, 2, 0, 2, 0),
            Self::Druid => (0, 2, 0, 2, 0),
            Self::Priest => (0, 2, 0, 2, 0),
            Self::Shaman => (0, 2, 0, 2, 0),
            Self::Magician
            | Self::Cryomancer
            | Self::Illusionist
            | Self::Necromancer
            | Self::Pyromancer
            | Self::Warlock
            | Self::Witch => (0, 0, 2, 2, 0),
            Self::Runegraver => (2, 0, 2, 0, 0),
            Self::Bard => (0, 0, 2, 0, 2),
            Self::Monk => (2, 0, 0, 0, 2),
            Self::Thief | Self::Legerdemainist | Self::Purloiner => (0, 0, 2, 0, 2),
            Self::Assassin | Self::Scout => (2, 0, 0, 0, 2),
        };
        SaveBonuses {
            death,
            transformation,
            device,
            sorcery,
            avoidance,
        }
    }

    /// Warrior-type classes: improved melee attack rate at level 7+ and two
    /// base mastery slots.
    pub fn is_warrior(&self) -> bool {
        matches!(
            self,
            Self::Fighter
                | Self::Ranger
                | Self::Paladin
                | Self::Barbarian
                | Self::Berserker
                | Self::Cataphract
                | Self::Huntsman
        )
    }

    /// Classes granted the +1 defence bonus while unarmored and not heavily
    /// encumbered.
    pub fn is_agile(&self) -> bool {
        matches!(self, Self::Fighter | Self::Barbarian | Self::Thief)
    }

    /// Classes whose sheet carries the thief skill table.
    pub fn has_thief_skills(&self) -> bool {
        matches!(
            self,
            Self::Thief | Self::Legerdemainist | Self::Purloiner | Self::Assassin | Self::Scout
        )
    }

    /// Pure arcane scholars never train weapon mastery.
    pub fn can_master_weapons(&self) -> bool {
        !matches!(
            self,
            Self::Magician
                | Self::Cryomancer
                | Self::Illusionist
                | Self::Necromancer
                | Self::Pyromancer
                | Self::Witch
        )
    }

    /// Classes that may intensify one mastery into grand mastery.
    pub fn can_grand_master(&self) -> bool {
        matches!(
            self,
            Self::Fighter
                | Self::Ranger
                | Self::Paladin
                | Self::Barbarian
                | Self::Berserker
                | Self::Cataphract
        )
    }

    /// Hybrid casters merge a secondary slot table into the class row
    /// instead of replacing it.
    pub fn merges_secondary_spell_slots(&self) -> bool {
        matches!(self, Self::Ranger | Self::Shaman | Self::Bard)
    }

    /// Classes that compute an undead turning ability.
    pub fn has_turning_ability(&self) -> bool {
        matches!(self, Self::Cleric | Self::Paladin | Self::Necromancer)
    }

    /// The casting tradition backing this class, if any. Hybrids cast from a
    /// parent tradition (Paladin as Cleric, Ranger and Shaman as Druid, Bard
    /// as Magician).
    pub fn casting_class(&self) -> Option<CastingClass> {
        let casting = match self {
            Self::Cleric => CastingClass::Cleric,
            Self::Druid => CastingClass::Druid,
            Self::Priest => CastingClass::Priest,
            Self::Magician => CastingClass::Magician,
            Self::Cryomancer => CastingClass::Cryomancer,
            Self::Illusionist => CastingClass::Illusionist,
            Self::Necromancer => CastingClass::Necromancer,
            Self::Pyromancer => CastingClass::Pyromancer,
            Self::Warlock => CastingClass::Warlock,
            Self::Witch => CastingClass::Witch,
            Self::Paladin => CastingClass::Cleric,
            Self::Ranger => CastingClass::Druid,
            Self::Shaman => CastingClass::Druid,
            Self::Bard => CastingClass::Magician,
            _ => return None,
        };
        Some(casting)
    }
}

/// A casting tradition a spell can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastingClass {
    Magician,
    Cryomancer,
    Illusionist,
    Necromancer,
    Pyromancer,
    Witch,
    Warlock,
    Cleric,
    Druid,
    Priest,
}

/// Divine and arcane casters reach spell tiers on different schedules and
/// draw bonus slots from different abilities (wisdom vs. intelligence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CasterKind {
    Divine,
    Arcane,
}

impl CastingClass {
    pub fn kind(&self) -> CasterKind {
        match self {
            Self::Cleric | Self::Druid | Self::Priest => CasterKind::Divine,
            Self::Magician
            | Self::Cryomancer
            | Self::Illusionist
            | Self::Necromancer
            | Self::Pyromancer
            | Self::Witch
            | Self::Warlock => CasterKind::Arcane,
        }
    }

    /// Arcane casters keep their repertoire in spellbooks; divine casters
    /// receive their whole list in prayer.
    pub fn requires_spellbook(&self) -> bool {
        self.kind() == CasterKind::Arcane
    }
}

// ---------------------------------------------------------------------------
// Level-band class extras
// ---------------------------------------------------------------------------

/// Berserker toughened-hide AC while unarmored, by level band.
pub fn berserker_natural_ac(level: u8) -> i32 {
    match level {
        ..=3 => 8,
        4..=7 => 7,
        8..=11 => 6,
        _ => 5,
    }
}

/// Monk deflection bonus subtracted from AC, by level band.
pub fn monk_ac_bonus(level: u8) -> i32 {
    match level {
        ..=4 => 1,
        5..=8 => 2,
        _ => 3,
    }
}

/// Monk open-hand damage dice, by level band.
pub fn monk_unarmed_damage(level: u8) -> &'static str {
    match level {
        ..=3 => "1d4",
        4..=7 => "1d6",
        8..=11 => "1d8",
        _ => "1d10",
    }
}

/// Runegraver runes carved per day, by level band.
pub fn runegraver_runes_per_day(level: u8) -> u8 {
    match level {
        ..=2 => 1,
        3..=5 => 2,
        6..=8 => 3,
        9..=11 => 4,
        _ => 5,
    }
}

// ---------------------------------------------------------------------------
// Thief skills
// ---------------------------------------------------------------------------

/// One thief skill with the success chance for a specific level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThiefSkill {
    pub name: String,
    /// Governing ability score
    pub attribute: String,
    /// Chance-in-twelve, e.g. "7:12"
    pub success_chance: String,
}

/// (name, attribute, chance-in-twelve per level band 1-2/3-4/5-6/7-8/9-10/11+)
const THIEF_SKILL_TABLE: &[(&str, &str, [u8; 6])] = &[
    ("Climb", "Dexterity", [8, 8, 9, 9, 10, 10]),
    ("Decipher Script", "Intelligence", [0, 1, 2, 3, 4, 5]),
    ("Discern Noise", "Wisdom", [4, 5, 6, 7, 8, 9]),
    ("Hide", "Dexterity", [5, 6, 7, 8, 9, 10]),
    ("Manipulate Traps", "Dexterity", [3, 4, 5, 6, 7, 8]),
    ("Move Silently", "Dexterity", [5, 6, 7, 8, 9, 10]),
    ("Open Locks", "Dexterity", [3, 4, 5, 6, 7, 8]),
    ("Pick Pockets", "Dexterity", [4, 5, 6, 7, 8, 9]),
    ("Read Scrolls", "Intelligence", [0, 0, 0, 0, 5, 6]),
];

/// Thief skill chances at the given class level.
pub fn thief_skills_at_level(level: u8) -> Vec<ThiefSkill> {
    let band = usize::from(level.saturating_sub(1) / 2).min(5);
    THIEF_SKILL_TABLE
        .iter()
        .map(|(name, attribute, chances)| ThiefSkill {
            name: (*name).to_string(),
            attribute: (*attribute).to_string(),
            success_chance: format!("{}:12", chances[band]),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ability catalogs
// ---------------------------------------------------------------------------

impl ClassKind {
    /// The class's full ability catalog. Classes without a curated catalog
    /// return an empty list; the sheet then simply carries no ability
    /// entries.
    pub fn ability_catalog(&self) -> Vec<ClassAbility> {
        match self {
            Self::Fighter => fighter_abilities(),
            Self::Magician => magician_abilities(),
            Self::Cleric => cleric_abilities(),
            Self::Thief => thief_abilities(),
            Self::Barbarian => barbarian_abilities(),
            Self::Berserker => berserker_abilities(),
            Self::Monk => monk_abilities(),
            Self::Ranger => ranger_abilities(),
            Self::Paladin => paladin_abilities(),
            Self::Necromancer => necromancer_abilities(),
            Self::Bard => bard_abilities(),
            Self::Shaman => shaman_abilities(),
            Self::Druid => druid_abilities(),
            Self::Runegraver => runegraver_abilities(),
            _ => Vec::new(),
        }
    }

    /// The catalog filtered to abilities whose minimum level has been
    /// reached.
    pub fn abilities_at_level(&self, level: u8) -> Vec<ClassAbility> {
        self.ability_catalog()
            .into_iter()
            .filter(|ability| ability.min_level <= level)
            .collect()
    }
}

fn fighter_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Heroic Fighting",
            "When combatting opponents of 1 HD or less, double normal melee attacks \
             per round. At 7th level this extends to foes of 2 HD or less.",
            1,
        ),
        ClassAbility::new(
            "Weapon Mastery",
            "Mastery of two weapons (+1 to hit and +1 damage). Additional weapons may \
             be mastered at 4th, 8th, and 12th levels; attack rates improve with \
             mastered melee weapons.",
            1,
        ),
        ClassAbility::new(
            "Grand Mastery",
            "At 4th, 8th, or 12th level, a new mastery may instead intensify training \
             with an already mastered weapon (+2 to hit, +2 damage, increased attack \
             rate). Only one weapon may be grand mastered.",
            4,
        ),
    ]
}

fn magician_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Alchemy",
            "Identify potions by taste alone. At 7th level, concoct potions with the \
             assistance of an alchemist; by 11th level no assistance is required.",
            1,
        ),
        ClassAbility::new(
            "Familiar",
            "Summon a small animal of 1d3+1 hp to serve as a familiar, granting \
             remote senses, bonus hit points, and one extra memorized spell of each \
             available level per day.",
            1,
        ),
        ClassAbility::new(
            "Read Magic",
            "Decipher otherwise unintelligible magical inscriptions or symbols.",
            1,
        ),
        ClassAbility::new(
            "Scroll Use",
            "Decipher and invoke scrolls with spells from the magician spell list, \
             unless scribed by an ecclesiastical sorcerer.",
            1,
        ),
        ClassAbility::new(
            "Scroll Writing",
            "Scribe a known spell onto a scroll at a cost of 500 gp plus 100 gp per \
             spell level, requiring one week per spell level.",
            1,
        ),
        ClassAbility::new(
            "New Weapon Skill",
            "At 4th, 8th, and 12th levels, become skilled in a new weapon outside the \
             favoured list.",
            4,
        ),
    ]
}

fn cleric_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Turn Undead",
            "Repel or destroy undead creatures by channelling divine energy; \
             effectiveness increases with level and charisma.",
            1,
        ),
        ClassAbility::new(
            "Divine Spellcasting",
            "Cast divine spells granted in prayer; additional spells may be granted \
             for high wisdom.",
            2,
        ),
        ClassAbility::new(
            "Healing Hands",
            "Once per day per three levels, heal 1d6+1 hit points by touch; improves \
             at 6th and 9th levels.",
            3,
        ),
        ClassAbility::new(
            "Divine Blessing",
            "Bestow a +1 blessing on a person or object once per day for one hour.",
            6,
        ),
        ClassAbility::new(
            "Divine Intervention",
            "Once per week, call upon the deity for direct intervention in dire \
             circumstances.",
            9,
        ),
    ]
}

fn thief_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Thief Skills",
            "Climb sheer surfaces, hide in shadows, move silently, open locks, \
             manipulate traps, pick pockets, discern noise, and decipher script, each \
             with a chance-in-twelve that improves by level.",
            1,
        ),
        ClassAbility::new(
            "Backstab",
            "Attack an unaware opponent from behind at +4 to hit for double damage; \
             the multiplier improves at 5th and 9th levels.",
            1,
        ),
        ClassAbility::new(
            "Agile",
            "+1 defence bonus when unarmored or lightly armored and not heavily \
             encumbered.",
            1,
        ),
        ClassAbility::new(
            "Read Scrolls",
            "Decipher and invoke magician scrolls, albeit with a chance of mishap.",
            9,
        ),
    ]
}

fn barbarian_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Hardy Survivor",
            "+2 on all saving throws, a bonus struck from a life of privation and \
             peril.",
            1,
        ),
        ClassAbility::new(
            "Alertness",
            "Surprised only on 1-in-6; keen senses honed in the wild.",
            1,
        ),
        ClassAbility::new(
            "Run",
            "Base movement rate of 50 when unarmored or lightly armored.",
            1,
        ),
        ClassAbility::new(
            "Extraordinary Physical Prowess",
            "+8% on extraordinary feats of strength.",
            1,
        ),
        ClassAbility::new(
            "Leap",
            "Clear obstacles of notable height or breadth from a running start.",
            3,
        ),
    ]
}

fn berserker_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Berserk Rage",
            "Enter a fighting fury: +2 to hit and damage in melee, immune to fear, \
             cannot retreat. Usable once per day, more often at higher levels.",
            1,
        ),
        ClassAbility::new(
            "Natural Armour",
            "Toughened hide grants a natural armour class while unarmored, improving \
             at 4th, 8th, and 12th levels.",
            1,
        ),
        ClassAbility::new(
            "Weapon Mastery",
            "Mastery of two weapons, as the fighter ability.",
            1,
        ),
    ]
}

fn monk_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Empty Hand",
            "Unarmed strikes deal lethal damage, improving by level band.",
            1,
        ),
        ClassAbility::new(
            "Deflection",
            "A meditative defence bonus to AC while unarmored, improving at 5th and \
             9th levels.",
            1,
        ),
        ClassAbility::new(
            "Slow Fall",
            "Reduce falling damage by grabbing at surfaces within reach.",
            4,
        ),
        ClassAbility::new(
            "Feign Death",
            "Enter a cataleptic state indistinguishable from death for turns equal to \
             level.",
            7,
        ),
    ]
}

fn ranger_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Tracking",
            "Follow the trail of creatures across most terrain.",
            1,
        ),
        ClassAbility::new(
            "Otherworldly Enemies",
            "+1 damage per level against otherworldly and unnatural foes.",
            1,
        ),
        ClassAbility::new(
            "Ambusher",
            "Surprise opponents on 3-in-6 in wilderness settings.",
            1,
        ),
        ClassAbility::new(
            "Druidic Magic",
            "Cast a small complement of druid spells.",
            7,
        ),
    ]
}

fn paladin_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Lay on Hands",
            "Heal 2 hit points per level by touch once per day.",
            1,
        ),
        ClassAbility::new(
            "Divine Protection",
            "+2 on all saving throws; immune to disease.",
            1,
        ),
        ClassAbility::new(
            "Turn Undead",
            "Repel undead as a cleric of two levels lower.",
            3,
        ),
        ClassAbility::new(
            "Clerical Magic",
            "Cast a small complement of cleric spells.",
            9,
        ),
    ]
}

fn necromancer_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Command Undead",
            "Compel the service of undead creatures, as an evil cleric turns them.",
            1,
        ),
        ClassAbility::new(
            "Read Magic",
            "Decipher otherwise unintelligible magical inscriptions or symbols.",
            1,
        ),
        ClassAbility::new(
            "Scroll Use",
            "Decipher and invoke scrolls with spells from the necromancer spell list.",
            1,
        ),
        ClassAbility::new(
            "New Weapon Skill",
            "At 4th, 8th, and 12th levels, become skilled in a new weapon outside the \
             favoured list.",
            4,
        ),
    ]
}

fn bard_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Legend Lore",
            "Identify the general purpose and function of notable items and places.",
            1,
        ),
        ClassAbility::new(
            "Enchanting Music",
            "Charm listeners with song; fascinated audiences answer questions \
             favourably.",
            1,
        ),
        ClassAbility::new(
            "Thief Abilities",
            "Climb, hide, and move silently as a thief of equal level.",
            1,
        ),
        ClassAbility::new(
            "Arcane Magic",
            "Cast a small complement of magician spells.",
            2,
        ),
    ]
}

fn shaman_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Spirit Guide",
            "Commune with a totem spirit for omens and guidance once per day.",
            1,
        ),
        ClassAbility::new(
            "Dual Tradition",
            "Draw spells from both the druid and magician lists as granted by the \
             spirits.",
            1,
        ),
        ClassAbility::new(
            "Spirit Ward",
            "+2 saving throw bonus against the spells of otherworldly beings.",
            5,
        ),
    ]
}

fn druid_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Nature's Tongue",
            "Speak the secret language of druids and identify plants, animals, and \
             clean water.",
            1,
        ),
        ClassAbility::new(
            "Divine Spellcasting",
            "Cast druidic spells drawn from the wild.",
            2,
        ),
        ClassAbility::new(
            "Woodland Passage",
            "Move through natural undergrowth without trace at full speed.",
            3,
        ),
        ClassAbility::new(
            "Shape Change",
            "Assume the form of a natural animal thrice per day.",
            7,
        ),
    ]
}

fn runegraver_abilities() -> Vec<ClassAbility> {
    vec![
        ClassAbility::new(
            "Rune Carving",
            "Carve runes of power into wood, bone, or stone; the number of runes per \
             day increases with level.",
            1,
        ),
        ClassAbility::new(
            "Weapon Mastery",
            "Mastery of one weapon, favouring the spear and the axe.",
            1,
        ),
        ClassAbility::new(
            "Sacrifice",
            "Empower a carved rune with blood to double its potency.",
            6,
        ),
    ]
}
