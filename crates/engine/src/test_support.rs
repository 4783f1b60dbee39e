//! Shared fixtures for service tests.

use chrono::Utc;
use thuleria_domain::{
    AbilityScores, Armor, ArmorWeightClass, Character, CharacterId, ClassLevelData,
    InventoryEntryId, InventoryItem, ItemId, ItemKind, MasteryLevel, Spell, SpellId, SpellSlots,
    Spellbook, Treasure, TreasureId, UserId, Weapon, WeaponCategory, WeaponMastery,
};

pub fn character(class: &str, level: u8, abilities: AbilityScores) -> Character {
    Character::new(UserId::new(), "Vrolik of Vol", class, level, abilities, 10)
}

pub fn character_with_scores(
    class: &str,
    level: u8,
    strength: u8,
    constitution: u8,
) -> Character {
    character(
        class,
        level,
        AbilityScores {
            strength,
            dexterity: 10,
            constitution,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        },
    )
}

pub fn character_with_intelligence(class: &str, level: u8, intelligence: u8) -> Character {
    character(
        class,
        level,
        AbilityScores {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence,
            wisdom: 10,
            charisma: 10,
        },
    )
}

pub fn inventory_entry(
    character_id: CharacterId,
    kind: ItemKind,
    item_id: ItemId,
    quantity: u32,
    equipped: bool,
) -> InventoryItem {
    let now = Utc::now();
    InventoryItem {
        id: InventoryEntryId::new(),
        character_id,
        kind,
        item_id,
        quantity,
        equipped,
        slot: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn weapon_named(name: &str, weight: i32, id: ItemId) -> Weapon {
    let now = Utc::now();
    Weapon {
        id,
        name: name.to_string(),
        category: WeaponCategory::Melee,
        weapon_class: 2,
        cost: 10.0,
        weight,
        damage: "1d8".to_string(),
        damage_two_handed: None,
        rate_of_fire: None,
        range_short: None,
        range_medium: None,
        range_long: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn armor_named(
    name: &str,
    ac: i32,
    weight: i32,
    weight_class: ArmorWeightClass,
    id: ItemId,
) -> Armor {
    let now = Utc::now();
    Armor {
        id,
        name: name.to_string(),
        armor_type: name.to_string(),
        ac,
        cost: 30.0,
        damage_reduction: 0,
        weight,
        weight_class,
        movement_rate: 30,
        created_at: now,
        updated_at: now,
    }
}

pub fn shield_named(
    name: &str,
    defense_modifier: i32,
    weight: i32,
    id: ItemId,
) -> thuleria_domain::Shield {
    let now = Utc::now();
    thuleria_domain::Shield {
        id,
        name: name.to_string(),
        defense_modifier,
        cost: 10.0,
        weight,
        created_at: now,
        updated_at: now,
    }
}

pub fn treasure_with_gold(character_id: CharacterId, gold_coins: u32) -> Treasure {
    let now = Utc::now();
    Treasure {
        id: TreasureId::new(),
        character_id: Some(character_id),
        platinum_coins: 0,
        gold_coins,
        electrum_coins: 0,
        silver_coins: 0,
        copper_coins: 0,
        gems: None,
        art_objects: None,
        other_valuables: None,
        total_value_gold: f64::from(gold_coins),
        created_at: now,
        updated_at: now,
    }
}

pub fn class_row(
    class: &str,
    level: u8,
    hit_dice: &str,
    saving_throw: i32,
    fighting_ability: i32,
) -> ClassLevelData {
    ClassLevelData {
        class_name: class.to_string(),
        level,
        experience_points: 0,
        hit_dice: hit_dice.to_string(),
        saving_throw,
        fighting_ability,
        casting_ability: None,
        turning_ability: None,
        spell_slots: None,
    }
}

pub fn class_row_with_slots(class: &str, level: u8, slots: &[(u8, u8)]) -> ClassLevelData {
    let mut table = SpellSlots::default();
    for (slot_level, count) in slots {
        table.set_at_level(*slot_level, *count);
    }
    let mut row = class_row(class, level, "1d4", 16, 0);
    row.casting_ability = Some(i32::from(level));
    row.spell_slots = Some(table);
    row
}

pub fn mastery_for(
    character_id: CharacterId,
    base_name: &str,
    level: MasteryLevel,
) -> WeaponMastery {
    WeaponMastery::new(character_id, base_name, level)
}

pub fn arcane_spell(name: &str, magician_level: u8) -> Spell {
    let now = Utc::now();
    Spell {
        id: SpellId::new(),
        name: name.to_string(),
        magician_level,
        cryomancer_level: 0,
        illusionist_level: 0,
        necromancer_level: 0,
        pyromancer_level: 0,
        witch_level: 0,
        cleric_level: 0,
        druid_level: 0,
        range: "30 ft.".to_string(),
        duration: "Instantaneous".to_string(),
        area_of_effect: None,
        components: None,
        description: String::new(),
        created_at: now,
        updated_at: now,
    }
}

pub fn spellbook_with(id: ItemId, spells: Vec<SpellId>) -> Spellbook {
    let now = Utc::now();
    Spellbook {
        id,
        name: "Worm-eaten Grimoire".to_string(),
        description: String::new(),
        total_pages: 100,
        used_pages: 10,
        spells_stored: spells,
        value: 200,
        weight: 3.0,
        created_at: now,
        updated_at: now,
    }
}
