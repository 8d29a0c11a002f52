//! Terminal combat record.

use super::{RoundEntry, Team};

/// Item granted as part of a reward.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardItem {
    pub id: String,
    pub name: String,
}

/// Rolled victory reward.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardPayload {
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item: Option<RewardItem>,
}

impl RewardPayload {
    /// Summary line appended to the round log.
    pub fn summary(&self) -> String {
        match &self.item {
            Some(item) => format!("Reward: {} gold and {}.", self.gold, item.name),
            None => format!("Reward: {} gold.", self.gold),
        }
    }
}

/// Opponent identity kept for review after the fight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentSummary {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultSummary {
    pub total_rounds: u32,
    pub rounds: Vec<RoundEntry>,
    pub opponent: OpponentSummary,
}

/// Created once when the combat finishes.
///
/// Only the reward reconciliation field changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    pub winner: Team,
    pub summary: ResultSummary,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: Option<RewardPayload>,
    /// Whether the reward reached the external sink.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward_delivered: bool,
}

impl CombatResult {
    /// True while a granted reward still has to be delivered.
    pub fn reward_pending(&self) -> bool {
        self.reward.is_some() && !self.reward_delivered
    }
}
