//! Data-driven duel content and its loaders.
//!
//! This crate houses the static catalogs a duel draws from:
//! - Spell definitions (RON)
//! - Monster templates with flavor text (RON)
//! - Loot pool entries gated by monster rarity (RON)
//! - Character records for local runs (RON)
//! - Combat configuration (TOML)
//!
//! Content is consumed by the runtime's catalogs and oracles. Combat state
//! only ever holds copies taken at encounter start.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CharacterRecord, LootEntry, MonsterTemplate, Rarity, SpellBook};

#[cfg(feature = "loaders")]
pub use loaders::{
    CharacterLoader, ConfigLoader, ContentBundle, ContentFactory, LootLoader, MonsterLoader,
    SpellLoader,
};
