use std::collections::HashMap;

use game_content::{CharacterRecord, SpellBook};
use game_core::{CombatantSpec, RawAttributes, SpellDefinition, StatBlock};

/// Everything the duel needs to know about a player character.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterSheet {
    pub id: String,
    /// Principal allowed to fight with this character.
    pub owner: String,
    pub name: String,
    pub level: u32,
    pub attributes: RawAttributes,
    /// Equipped spells in loadout order.
    pub spells: Vec<SpellDefinition>,
}

impl CharacterSheet {
    /// Derives stats and seats the character as the player side.
    pub fn to_combatant(&self) -> CombatantSpec {
        CombatantSpec {
            name: self.name.clone(),
            source_id: self.id.clone(),
            stats: StatBlock::derive(&self.attributes, self.level),
            spells: self.spells.clone(),
            flavor: None,
        }
    }
}

/// Source of character attributes, level, spell loadout and ownership.
pub trait CharacterOracle: Send + Sync {
    fn character(&self, character_id: &str) -> Option<CharacterSheet>;
}

/// Character oracle backed by a loaded roster.
pub struct ContentCharacterOracle {
    sheets: HashMap<String, CharacterSheet>,
}

impl ContentCharacterOracle {
    pub fn new(records: &[CharacterRecord], spells: &SpellBook) -> Self {
        let sheets = records
            .iter()
            .map(|record| {
                let sheet = CharacterSheet {
                    id: record.id.clone(),
                    owner: record.owner.clone(),
                    name: record.name.clone(),
                    level: record.level,
                    attributes: record.attributes.clone(),
                    spells: spells.resolve(&record.spells),
                };
                (record.id.clone(), sheet)
            })
            .collect();
        Self { sheets }
    }
}

impl CharacterOracle for ContentCharacterOracle {
    fn character(&self, character_id: &str) -> Option<CharacterSheet> {
        self.sheets.get(character_id).cloned()
    }
}
