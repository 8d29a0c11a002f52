use std::str::FromStr;

use game_content::{LootEntry, Rarity};
use game_core::LootItem;

/// Items that may drop on a victory.
pub trait LootTable: Send + Sync {
    /// Eligible loot pool for an opponent of the given rarity.
    fn eligible(&self, rarity: Option<&str>) -> Vec<LootItem>;
}

/// Loot table backed by a loaded loot pool.
pub struct ContentLootTable {
    entries: Vec<LootEntry>,
}

impl ContentLootTable {
    pub fn new(entries: Vec<LootEntry>) -> Self {
        Self { entries }
    }
}

impl LootTable for ContentLootTable {
    /// Unrestricted items always qualify. Restricted items need a known
    /// rarity they list.
    fn eligible(&self, rarity: Option<&str>) -> Vec<LootItem> {
        let rarity = rarity.and_then(|name| Rarity::from_str(name).ok());
        self.entries
            .iter()
            .filter(|entry| match rarity {
                Some(rarity) => entry.drops_from(rarity),
                None => entry.drops_from.is_empty(),
            })
            .map(LootEntry::item)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ContentLootTable {
        ContentLootTable::new(vec![
            LootEntry {
                id: "potion".into(),
                name: "Potion".into(),
                drops_from: Vec::new(),
            },
            LootEntry {
                id: "crown".into(),
                name: "Crown".into(),
                drops_from: vec![Rarity::Rare],
            },
        ])
    }

    #[test]
    fn pool_depends_on_rarity() {
        let ids = |items: Vec<LootItem>| -> Vec<String> {
            items.into_iter().map(|item| item.id).collect()
        };

        assert_eq!(ids(table().eligible(Some("rare"))), ["potion", "crown"]);
        assert_eq!(ids(table().eligible(Some("common"))), ["potion"]);
        assert_eq!(ids(table().eligible(Some("mythic"))), ["potion"]);
        assert_eq!(ids(table().eligible(None)), ["potion"]);
    }
}
