//! Catalog entry types shared by the loaders and the runtime.

use game_core::{
    CombatantSpec, LootItem, MonsterMeta, RawAttributes, SpellDefinition, SpellId, StatBlock,
};

/// How rare a monster is. Also gates which loot it can drop.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Template an AI opponent is built from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub id: String,
    pub name: String,
    pub race: String,
    pub rarity: Rarity,
    pub description: String,
    pub level: u32,
    pub attributes: RawAttributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<SpellId>,
}

impl MonsterTemplate {
    pub fn flavor(&self) -> MonsterMeta {
        MonsterMeta {
            race: self.race.clone(),
            rarity: self.rarity.to_string(),
            description: self.description.clone(),
        }
    }

    /// Seats this monster as the opponent of a new encounter.
    pub fn to_combatant(&self, spells: &SpellBook) -> CombatantSpec {
        CombatantSpec {
            name: self.name.clone(),
            source_id: self.id.clone(),
            stats: StatBlock::derive(&self.attributes, self.level),
            spells: spells.resolve(&self.spells),
            flavor: Some(self.flavor()),
        }
    }
}

/// A player character as stored by the character service.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterRecord {
    pub id: String,
    /// Principal allowed to fight with this character.
    pub owner: String,
    pub name: String,
    pub level: u32,
    pub attributes: RawAttributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<SpellId>,
}

impl CharacterRecord {
    pub fn to_combatant(&self, spells: &SpellBook) -> CombatantSpec {
        CombatantSpec {
            name: self.name.clone(),
            source_id: self.id.clone(),
            stats: StatBlock::derive(&self.attributes, self.level),
            spells: spells.resolve(&self.spells),
            flavor: None,
        }
    }
}

/// Loot pool entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub id: String,
    pub name: String,
    /// Monster rarities that may drop this item. Empty means any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub drops_from: Vec<Rarity>,
}

impl LootEntry {
    pub fn drops_from(&self, rarity: Rarity) -> bool {
        self.drops_from.is_empty() || self.drops_from.contains(&rarity)
    }

    pub fn item(&self) -> LootItem {
        LootItem::new(self.id.clone(), self.name.clone())
    }
}

/// Spell definitions indexed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpellBook {
    spells: Vec<SpellDefinition>,
}

impl SpellBook {
    pub fn new(mut spells: Vec<SpellDefinition>) -> Self {
        spells.sort_by_key(|spell| spell.id);
        Self { spells }
    }

    pub fn get(&self, id: SpellId) -> Option<&SpellDefinition> {
        self.spells
            .binary_search_by_key(&id, |spell| spell.id)
            .ok()
            .map(|index| &self.spells[index])
    }

    /// Definitions for `ids` in loadout order. Unknown ids are skipped.
    pub fn resolve(&self, ids: &[SpellId]) -> Vec<SpellDefinition> {
        ids.iter().filter_map(|id| self.get(*id)).cloned().collect()
    }

    /// First id in `ids` with no definition.
    pub fn first_missing(&self, ids: &[SpellId]) -> Option<SpellId> {
        ids.iter().copied().find(|id| self.get(*id).is_none())
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpellDefinition> {
        self.spells.iter()
    }
}

#[cfg(test)]
mod tests {
    use game_core::SpellTarget;

    use super::*;

    fn spell(id: u32, name: &str) -> SpellDefinition {
        SpellDefinition {
            id: SpellId(id),
            name: name.into(),
            target: SpellTarget::Enemy,
            range: 3,
            mana_cost: 4,
            damage: 6,
            cooldown: 1,
            effects: Vec::new(),
        }
    }

    #[test]
    fn spell_book_resolves_in_loadout_order() {
        let book = SpellBook::new(vec![spell(4, "Strike"), spell(1, "Fireball")]);

        let resolved = book.resolve(&[SpellId(4), SpellId(9), SpellId(1)]);
        let names: Vec<&str> = resolved.iter().map(|spell| spell.name.as_str()).collect();

        assert_eq!(names, ["Strike", "Fireball"]);
        assert_eq!(book.first_missing(&[SpellId(1), SpellId(9)]), Some(SpellId(9)));
        assert_eq!(book.first_missing(&[SpellId(1)]), None);
    }

    #[test]
    fn loot_gating_by_rarity() {
        let anything = LootEntry {
            id: "potion".into(),
            name: "Potion".into(),
            drops_from: Vec::new(),
        };
        let rare_only = LootEntry {
            id: "crown".into(),
            name: "Crown".into(),
            drops_from: vec![Rarity::Rare, Rarity::Epic],
        };

        assert!(anything.drops_from(Rarity::Common));
        assert!(!rare_only.drops_from(Rarity::Common));
        assert!(rare_only.drops_from(Rarity::Epic));
        assert_eq!(rare_only.item(), LootItem::new("crown", "Crown"));
    }

    #[test]
    fn monster_becomes_flavoured_combatant() {
        let goblin = MonsterTemplate {
            id: "goblin".into(),
            name: "Goblin".into(),
            race: "goblinoid".into(),
            rarity: Rarity::Common,
            description: "Small and mean.".into(),
            level: 2,
            attributes: RawAttributes::new().with("STR", 4.0).with("hp", 84.0),
            spells: vec![SpellId(1)],
        };
        let book = SpellBook::new(vec![spell(1, "Fireball")]);

        let spec = goblin.to_combatant(&book);

        assert_eq!(spec.stats.hp_max, 100);
        assert_eq!(spec.stats.level, 2);
        assert_eq!(spec.spells.len(), 1);
        let flavor = spec.flavor.expect("monster flavor");
        assert_eq!(flavor.rarity, "common");
        assert_eq!(flavor.race, "goblinoid");
    }
}
