//! Runtime orchestration for persistent duels.
//!
//! This crate wraps the pure `game-core` engine with everything a request
//! needs: loading and storing combat records, looking up characters and
//! opponents, and delivering rewards. Consumers build a [`CombatService`] and
//! call it once per client request.
//!
//! Modules are organized by responsibility:
//! - [`service`] hosts the request-level API and its builder
//! - [`api`] exposes the result and error types clients interact with
//! - [`oracle`] and [`repository`] provide data adapters
//! - [`rewards`] delivers granted rewards to the player's inventory
pub mod api;
pub mod config;
pub mod oracle;
pub mod repository;
pub mod rewards;
pub mod service;

pub use api::{CombatRef, Encounter, Result, RuntimeError};
pub use config::RuntimeConfig;
pub use oracle::{
    CharacterOracle, CharacterSheet, ContentCharacterOracle, ContentLootTable,
    ContentMonsterCatalog, LootTable, MonsterCatalog,
};
pub use repository::{
    CombatRecord, CombatRepository, FileCombatRepository, InMemoryCombatRepository,
    RepositoryError,
};
pub use rewards::{InMemoryRewardSink, RewardError, RewardGrant, RewardSink};
pub use service::{CombatService, CombatServiceBuilder};
