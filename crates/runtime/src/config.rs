//! Runtime configuration and environment loading.
use std::env;
use std::path::PathBuf;

use game_core::CombatConfig;

/// Configuration of a [`CombatService`](crate::CombatService).
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Seed used for every new combat instead of a random one.
    pub fixed_seed: Option<u64>,
    /// Directory holding the content files.
    pub data_dir: PathBuf,
    /// Directory for file-backed combat records. In-memory when unset.
    pub store_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            fixed_seed: None,
            data_dir: PathBuf::from("data"),
            store_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Smallest board edge that seats both combatants on distinct tiles.
    pub const MIN_BOARD_EDGE: u32 = 2;

    pub fn new(combat: CombatConfig) -> Self {
        Self {
            combat,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_DATA_DIR` - Content directory (default: `data`)
    /// - `DUEL_STORE_DIR` - Directory for combat records (default: in-memory)
    /// - `DUEL_SEED` - Fixed combat seed for reproducible runs (default: random)
    /// - `DUEL_BOARD_WIDTH` / `DUEL_BOARD_HEIGHT` - Board size (default: 8, min 2)
    /// - `DUEL_LOOT_CHANCE` - Item drop chance in percent (default: 35, max 100)
    /// - `DUEL_LOG_RETENTION` - Rounds kept in the log (default: 50, min 1)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies `DUEL_*` variables on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = env::var_os("DUEL_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env::var_os("DUEL_STORE_DIR") {
            self.store_dir = Some(PathBuf::from(dir));
        }
        if let Some(seed) = read_env::<u64>("DUEL_SEED") {
            self.fixed_seed = Some(seed);
        }

        if let Some(width) = read_env::<u32>("DUEL_BOARD_WIDTH") {
            self.combat.board_width = width.max(Self::MIN_BOARD_EDGE);
        }
        if let Some(height) = read_env::<u32>("DUEL_BOARD_HEIGHT") {
            self.combat.board_height = height.max(Self::MIN_BOARD_EDGE);
        }
        if let Some(chance) = read_env::<u32>("DUEL_LOOT_CHANCE") {
            self.combat.loot_chance_percent = chance.min(100);
        }
        if let Some(rounds) = read_env::<usize>("DUEL_LOG_RETENTION") {
            self.combat.log_retention_rounds = rounds.max(1);
        }

        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
