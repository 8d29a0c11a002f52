//! Read-only collaborators injected into the engine.
//!
//! The engine never owns randomness, opponent behaviour or loot data. Callers
//! assemble a [`CombatEnv`] per action and pass it to
//! [`CombatEngine::submit`](crate::engine::CombatEngine::submit).
mod loot;
mod rng;
mod spells;

pub use loot::LootItem;
pub use rng::{FixedRng, PcgRng, RngOracle, RollStream, compute_seed};
pub use spells::{SpellDefinition, SpellEffectSpec, SpellId, SpellTarget};

use crate::ai::CombatPolicy;
use crate::config::CombatConfig;

/// Bundle of collaborators for one resolution.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub config: &'a CombatConfig,
    pub rng: &'a dyn RngOracle,
    pub policy: &'a dyn CombatPolicy,
    /// Items eligible to drop on a player victory.
    pub loot: &'a [LootItem],
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        config: &'a CombatConfig,
        rng: &'a dyn RngOracle,
        policy: &'a dyn CombatPolicy,
        loot: &'a [LootItem],
    ) -> Self {
        Self {
            config,
            rng,
            policy,
            loot,
        }
    }
}
