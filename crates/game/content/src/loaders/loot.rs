//! Loot pool loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::LootEntry;
use crate::loaders::{LoadResult, read_file};

/// Loot pool structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootPool {
    pub items: Vec<LootEntry>,
}

/// Loader for the victory loot pool.
pub struct LootLoader;

impl LootLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<LootEntry>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<LootEntry>> {
        let pool: LootPool = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loot pool RON: {}", e))?;

        Ok(pool.items)
    }
}
