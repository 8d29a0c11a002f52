//! Repository layer for combat records.
//!
//! A combat record is the whole persisted unit of one duel: the engine state
//! plus ownership and a version counter. Every accepted action replaces the
//! record in one versioned update.
//!
//! Static content (spells, monsters, loot) is handled by oracles, not
//! repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileCombatRepository;
pub use memory::InMemoryCombatRepository;
pub use traits::{CombatRecord, CombatRepository};
