//! Monster template loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::MonsterTemplate;
use crate::loaders::{LoadResult, read_file};

/// Monster roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterRoster {
    pub monsters: Vec<MonsterTemplate>,
}

/// Loader for monster templates.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load monster templates from a RON file. The roster must not be empty.
    pub fn load(path: &Path) -> LoadResult<Vec<MonsterTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<MonsterTemplate>> {
        let roster: MonsterRoster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster roster RON: {}", e))?;

        if roster.monsters.is_empty() {
            anyhow::bail!("Monster roster is empty");
        }

        Ok(roster.monsters)
    }
}
