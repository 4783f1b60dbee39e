//! Inventory entries and carried treasure
//!
//! The rules engine never mutates an inventory; it reads the equipped and
//! carried entries to feed armor class, weapon stats, and encumbrance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, InventoryEntryId, ItemId, TreasureId};

/// Discriminates which catalog table an inventory entry points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Armor,
    Shield,
    Potion,
    Ring,
    SpellScroll,
    Container,
    Equipment,
    MagicItem,
    Spellbook,
    /// Unknown kind for forward compatibility
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Weapon => "weapon",
            Self::Armor => "armor",
            Self::Shield => "shield",
            Self::Potion => "potion",
            Self::Ring => "ring",
            Self::SpellScroll => "spell_scroll",
            Self::Container => "container",
            Self::Equipment => "equipment",
            Self::MagicItem => "magic_item",
            Self::Spellbook => "spellbook",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ItemKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weapon" => Ok(Self::Weapon),
            "armor" => Ok(Self::Armor),
            "shield" => Ok(Self::Shield),
            "potion" => Ok(Self::Potion),
            "ring" => Ok(Self::Ring),
            "spell_scroll" => Ok(Self::SpellScroll),
            "container" => Ok(Self::Container),
            "equipment" => Ok(Self::Equipment),
            "magic_item" => Ok(Self::MagicItem),
            "spellbook" => Ok(Self::Spellbook),
            _ => Ok(Self::Unknown),
        }
    }
}

/// One carried stack of a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryEntryId,
    pub character_id: CharacterId,
    pub kind: ItemKind,
    pub item_id: ItemId,
    pub quantity: u32,
    pub equipped: bool,
    pub slot: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn is_equipped_kind(&self, kind: ItemKind) -> bool {
        self.equipped && self.kind == kind
    }
}

/// Coin counts and qualitative valuables attached to a character.
///
/// Only coins contribute to encumbrance: fifty coins weigh one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treasure {
    pub id: TreasureId,
    pub character_id: Option<CharacterId>,
    pub platinum_coins: u32,
    pub gold_coins: u32,
    pub electrum_coins: u32,
    pub silver_coins: u32,
    pub copper_coins: u32,
    pub gems: Option<String>,
    pub art_objects: Option<String>,
    pub other_valuables: Option<String>,
    pub total_value_gold: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Treasure {
    pub fn total_coins(&self) -> u32 {
        self.platinum_coins
            + self.gold_coins
            + self.electrum_coins
            + self.silver_coins
            + self.copper_coins
    }

    /// Carried coin weight in weight units; gems and art are negligible.
    pub fn coin_weight(&self) -> f64 {
        f64::from(self.total_coins()) / 50.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn treasure(coins: [u32; 5]) -> Treasure {
        let now = Utc::now();
        Treasure {
            id: TreasureId::new(),
            character_id: None,
            platinum_coins: coins[0],
            gold_coins: coins[1],
            electrum_coins: coins[2],
            silver_coins: coins[3],
            copper_coins: coins[4],
            gems: None,
            art_objects: None,
            other_valuables: None,
            total_value_gold: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn fifty_coins_weigh_one_unit() {
        let t = treasure([10, 10, 10, 10, 10]);
        assert_eq!(t.total_coins(), 50);
        assert!((t.coin_weight() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn item_kind_round_trips_through_strings() {
        for kind in [
            ItemKind::Weapon,
            ItemKind::SpellScroll,
            ItemKind::MagicItem,
            ItemKind::Spellbook,
        ] {
            let parsed: ItemKind = kind.to_string().parse().expect("infallible");
            assert_eq!(parsed, kind);
        }
        let unknown: ItemKind = "relic".parse().expect("infallible");
        assert_eq!(unknown, ItemKind::Unknown);
    }
}
