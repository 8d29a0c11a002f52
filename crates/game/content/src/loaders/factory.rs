//! Content factory for loading every catalog from a data directory.

use std::path::{Path, PathBuf};

use game_core::{CombatConfig, SpellDefinition};

use crate::catalog::{CharacterRecord, LootEntry, MonsterTemplate, SpellBook};
use crate::loaders::{
    CharacterLoader, ConfigLoader, LoadResult, LootLoader, MonsterLoader, SpellLoader,
};

/// Content factory that loads all duel content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── spells.ron
/// ├── monsters.ron
/// ├── loot.ron
/// └── characters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

/// Every catalog of a data directory, cross-checked.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub config: CombatConfig,
    pub spells: SpellBook,
    pub monsters: Vec<MonsterTemplate>,
    pub loot: Vec<LootEntry>,
    pub characters: Vec<CharacterRecord>,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load spell definitions from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<Vec<SpellDefinition>> {
        SpellLoader::load(&self.data_dir.join("spells.ron"))
    }

    /// Load monster templates from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<Vec<MonsterTemplate>> {
        MonsterLoader::load(&self.data_dir.join("monsters.ron"))
    }

    /// Load the loot pool from `loot.ron`.
    pub fn load_loot(&self) -> LoadResult<Vec<LootEntry>> {
        LootLoader::load(&self.data_dir.join("loot.ron"))
    }

    /// Load the local character roster from `characters.ron`.
    pub fn load_characters(&self) -> LoadResult<Vec<CharacterRecord>> {
        CharacterLoader::load(&self.data_dir.join("characters.ron"))
    }

    /// Loads every catalog and checks that all spell references resolve.
    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let spells = SpellBook::new(self.load_spells()?);
        let monsters = self.load_monsters()?;
        let characters = self.load_characters()?;

        for monster in &monsters {
            if let Some(missing) = spells.first_missing(&monster.spells) {
                anyhow::bail!("Monster '{}' references unknown {}", monster.id, missing);
            }
        }
        for character in &characters {
            if let Some(missing) = spells.first_missing(&character.spells) {
                anyhow::bail!(
                    "Character '{}' references unknown {}",
                    character.id,
                    missing
                );
            }
        }

        Ok(ContentBundle {
            config: self.load_config()?,
            spells,
            monsters,
            loot: self.load_loot()?,
            characters,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const SPELLS: &str = r#"(spells: [
        (id: 1, name: "Fireball", target: enemy, range: 6, mana_cost: 5, damage: 5, cooldown: 2),
    ])"#;

    fn write_dir(monster_spells: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "gold_max = 40\n").unwrap();
        fs::write(dir.path().join("spells.ron"), SPELLS).unwrap();
        fs::write(
            dir.path().join("monsters.ron"),
            format!(
                r#"(monsters: [(id: "imp", name: "Imp", race: "demon", rarity: rare,
                    description: "Cackles.", level: 1, attributes: {{"str": 3.0}},
                    spells: {monster_spells})])"#
            ),
        )
        .unwrap();
        fs::write(
            dir.path().join("loot.ron"),
            r#"(items: [(id: "ember", name: "Ember")])"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("characters.ron"),
            r#"(characters: [(id: "char-1", owner: "alice", name: "Ayla", level: 1,
                attributes: {"str": 10.0}, spells: [1])])"#,
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_a_consistent_bundle() {
        let dir = write_dir("[1]");
        let bundle = ContentFactory::new(dir.path()).load_bundle().unwrap();

        assert_eq!(bundle.config.gold_max, 40);
        assert_eq!(bundle.spells.len(), 1);
        assert_eq!(bundle.monsters[0].name, "Imp");
        assert_eq!(bundle.loot[0].id, "ember");
        assert_eq!(bundle.characters[0].owner, "alice");
    }

    #[test]
    fn unknown_spell_reference_fails() {
        let dir = write_dir("[7]");
        let error = ContentFactory::new(dir.path()).load_bundle().unwrap_err();
        assert!(error.to_string().contains("imp"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let error = ContentFactory::new(dir.path()).load_spells().unwrap_err();
        assert!(error.to_string().contains("spells.ron"));
    }

    #[test]
    fn shipped_data_directory_loads() {
        let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data");
        let bundle = ContentFactory::new(data_dir).load_bundle().unwrap();

        assert!(!bundle.monsters.is_empty());
        assert!(!bundle.loot.is_empty());
        assert!(!bundle.spells.is_empty());
    }
}
