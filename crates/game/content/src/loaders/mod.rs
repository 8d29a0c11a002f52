//! Content loaders for reading duel data from files.
//!
//! Each loader parses one RON or TOML file into the catalog types of
//! [`crate::catalog`] or directly into `game-core` types.

pub mod characters;
pub mod config;
pub mod factory;
pub mod loot;
pub mod monsters;
pub mod spells;

pub use characters::CharacterLoader;
pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use loot::LootLoader;
pub use monsters::MonsterLoader;
pub use spells::SpellLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
