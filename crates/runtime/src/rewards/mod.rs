//! Delivery of victory rewards to the player's inventory and wallet.
//!
//! Rolling a reward happens inside the engine and is recorded on the combat.
//! Delivering it is a side effect on another system, so it runs after the
//! combat is committed and is keyed by combat id: the sink must treat a
//! repeated delivery for the same combat as already done.
mod memory;

pub use memory::InMemoryRewardSink;

use async_trait::async_trait;
use game_core::{CombatId, RewardPayload};
use thiserror::Error;

/// One reward addressed to a character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardGrant {
    /// Idempotency key.
    pub combat_id: CombatId,
    pub character_id: String,
    pub owner: String,
    pub payload: RewardPayload,
}

#[derive(Debug, Error)]
pub enum RewardError {
    #[error("reward sink unavailable: {0}")]
    Unavailable(String),

    #[error("reward sink rejected {combat_id}: {reason}")]
    Rejected { combat_id: CombatId, reason: String },
}

/// Receiver of granted rewards. Must be idempotent per combat id.
#[async_trait]
pub trait RewardSink: Send + Sync {
    async fn deliver(&self, grant: &RewardGrant) -> Result<(), RewardError>;
}
