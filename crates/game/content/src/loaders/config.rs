//! Combat configuration loader.

use std::path::Path;

use game_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults. The gold range must be ordered and
    /// the loot chance must be a percentage. The board must seat both sides on
    /// distinct tiles.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.gold_min > config.gold_max {
            anyhow::bail!(
                "gold_min ({}) exceeds gold_max ({})",
                config.gold_min,
                config.gold_max
            );
        }
        if config.loot_chance_percent > 100 {
            anyhow::bail!(
                "loot_chance_percent must be at most 100, got {}",
                config.loot_chance_percent
            );
        }
        if config.board_width == 0 || config.board_height == 0 {
            anyhow::bail!("board dimensions must be positive");
        }
        if config.player_start() == config.enemy_start() {
            anyhow::bail!(
                "a {}x{} board cannot seat both combatants",
                config.board_width,
                config.board_height
            );
        }

        Ok(config)
    }
}
