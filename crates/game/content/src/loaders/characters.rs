//! Character roster loader.
//!
//! Characters normally come from an external character service. The roster
//! file stands in for it in local runs and tests.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::CharacterRecord;
use crate::loaders::{LoadResult, read_file};

/// Character roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRoster {
    pub characters: Vec<CharacterRecord>,
}

pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterRecord>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterRecord>> {
        let roster: CharacterRoster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character roster RON: {}", e))?;

        let mut seen = HashSet::new();
        for character in &roster.characters {
            if !seen.insert(character.id.as_str()) {
                anyhow::bail!("Duplicate character id {}", character.id);
            }
        }

        Ok(roster.characters)
    }
}

#[cfg(test)]
mod tests {
    use game_core::SpellId;

    use super::*;

    #[test]
    fn parses_characters() {
        let characters = CharacterLoader::parse(
            r#"(characters: [
                (
                    id: "char-1",
                    owner: "alice",
                    name: "Ayla",
                    level: 3,
                    attributes: {"Strength": 10.0, "Intelligence": 3.0},
                    spells: [1, 3],
                ),
            ])"#,
        )
        .unwrap();

        assert_eq!(characters[0].owner, "alice");
        assert_eq!(characters[0].spells, vec![SpellId(1), SpellId(3)]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let roster = r#"(characters: [
            (id: "c", owner: "a", name: "A", level: 1, attributes: {}),
            (id: "c", owner: "b", name: "B", level: 1, attributes: {}),
        ])"#;
        assert!(CharacterLoader::parse(roster).is_err());
    }
}
