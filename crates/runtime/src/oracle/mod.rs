//! External collaborators consulted when an encounter is created or ends.
//!
//! Character data, monster templates and loot pools live outside the combat
//! record. The traits here are the seams the service reads them through;
//! the `Content*` implementations back them with data loaded by
//! `game-content`.
mod characters;
mod loot;
mod monsters;

pub use characters::{CharacterOracle, CharacterSheet, ContentCharacterOracle};
pub use loot::{ContentLootTable, LootTable};
pub use monsters::{ContentMonsterCatalog, MonsterCatalog};
