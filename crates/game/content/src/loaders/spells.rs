//! Spell catalog loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::SpellDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Spell catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCatalog {
    pub spells: Vec<SpellDefinition>,
}

/// Loader for the spell catalog.
pub struct SpellLoader;

impl SpellLoader {
    /// Load spell definitions from a RON file.
    ///
    /// Fails on duplicate spell ids.
    pub fn load(path: &Path) -> LoadResult<Vec<SpellDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SpellDefinition>> {
        let catalog: SpellCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for spell in &catalog.spells {
            if !seen.insert(spell.id) {
                anyhow::bail!("Duplicate spell id {} ({})", spell.id.0, spell.name);
            }
        }

        Ok(catalog.spells)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{SpellId, SpellTarget};

    use super::*;

    #[test]
    fn parses_spells_with_effects() {
        let spells = SpellLoader::parse(
            r#"(
                spells: [
                    (
                        id: 1,
                        name: "Fireball",
                        target: enemy,
                        range: 6,
                        mana_cost: 5,
                        damage: 5,
                        cooldown: 2,
                        effects: [(code: "ignite", duration_rounds: 2, magnitude: 1)],
                    ),
                    (
                        id: 3,
                        name: "Heal",
                        target: ally,
                        range: 4,
                        mana_cost: 6,
                        damage: 10,
                        cooldown: 2,
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(spells.len(), 2);
        assert_eq!(spells[0].id, SpellId(1));
        assert_eq!(spells[0].effects[0].code, "ignite");
        assert_eq!(spells[1].target, SpellTarget::Ally);
        assert!(spells[1].effects.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let error = SpellLoader::parse(
            r#"(spells: [
                (id: 1, name: "A", target: enemy, range: 1, mana_cost: 0, damage: 1, cooldown: 0),
                (id: 1, name: "B", target: enemy, range: 1, mana_cost: 0, damage: 1, cooldown: 0),
            ])"#,
        )
        .unwrap_err();

        assert!(error.to_string().contains("Duplicate spell id 1"));
    }
}
