//! Opponent decision making.
//!
//! The engine asks a [`CombatPolicy`] for exactly one action whenever the AI
//! side acts. Policies only see the state and the freshly computed legal set;
//! the engine still validates whatever they return.

use crate::action::{Action, AvailableActions};
use crate::state::{CombatState, Team};

/// Strategy for choosing the AI participant's action.
pub trait CombatPolicy: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Picks one action from `available`. Must be deterministic.
    fn choose(&self, state: &CombatState, actor: Team, available: &AvailableActions) -> Action;
}

/// Default opponent: attack when adjacent, otherwise close the distance.
///
/// Priority:
/// 1. Melee attack if the target is in range
/// 2. The legal move minimizing Chebyshev distance to the target, first in
///    generation order on ties
/// 3. Wait
#[derive(Clone, Copy, Debug, Default)]
pub struct ChasePolicy;

impl CombatPolicy for ChasePolicy {
    fn name(&self) -> &'static str {
        "chase"
    }

    fn choose(&self, state: &CombatState, actor: Team, available: &AvailableActions) -> Action {
        if available.attack.is_some() {
            return Action::Attack;
        }

        let target = state.participant(actor.opponent()).position();
        available
            .moves
            .iter()
            .min_by_key(|to| to.chebyshev(target))
            .map(|to| Action::Move { to: *to })
            .unwrap_or(Action::Wait)
    }
}
