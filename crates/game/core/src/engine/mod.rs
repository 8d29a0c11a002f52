//! Turn sequencing.
//!
//! The [`CombatEngine`] is the only writer of [`CombatState`]. One call to
//! [`CombatEngine::submit`] resolves a full exchange:
//!
//! ```text
//! player action ─► enemy effects ─► enemy action ─► round + 1 ─► player effects
//!       │                │                │                           │
//!       └── defeat ──────┴──── defeat ────┴────────── defeat ─────────┴─► finished
//! ```
//!
//! Every submission runs through `pre_validate → apply → post_validate` on a
//! working copy. The caller's state is replaced only when all three succeed,
//! so a turn never partially commits.

mod errors;
mod turns;

pub use errors::{EngineError, TransitionPhase};

use crate::action::{self, Action, AvailableActions};
use crate::config::CombatConfig;
use crate::env::{CombatEnv, RollStream};
use crate::state::{CombatState, CombatStatus, RewardPayload, Team, Turn};

/// Summary of one resolved exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub player_action: Action,
    /// Opponent reply, absent when the combat ended before it acted.
    pub enemy_action: Option<Action>,
    pub status: CombatStatus,
    pub winner: Option<Team>,
    /// Reward granted during this exchange.
    pub reward: Option<RewardPayload>,
    pub round: u32,
}

/// Combat engine driving the turn state machine.
pub struct CombatEngine<'a> {
    state: &'a mut CombatState,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut CombatState) -> Self {
        Self { state }
    }

    /// Starts a pending combat.
    pub fn start(&mut self, config: &CombatConfig) -> Result<(), EngineError> {
        self.state
            .check_invariants()
            .map_err(|error| EngineError::invariant(TransitionPhase::PreValidate, error))?;
        match self.state.status {
            CombatStatus::Pending => {
                self.state.start(config);
                Ok(())
            }
            CombatStatus::Active => Ok(()),
            CombatStatus::Finished => Err(action::ActionError::CombatFinished.into()),
        }
    }

    /// Legal actions for `team`. Empty unless it is that side's turn.
    pub fn available_actions(&self, team: Team) -> Option<AvailableActions> {
        (self.state.status == CombatStatus::Active && self.state.meta.turn == Turn::from(team))
            .then(|| action::available_actions(self.state, team))
    }

    /// Resolves a player action and everything it triggers.
    pub fn submit(
        &mut self,
        env: &CombatEnv<'_>,
        player_action: Action,
    ) -> Result<TurnOutcome, EngineError> {
        self.ensure_player_turn()?;

        self.state
            .check_invariants()
            .map_err(|error| EngineError::invariant(TransitionPhase::PreValidate, error))?;
        action::validate(self.state, Team::Player, &player_action)?;

        let mut working = self.state.clone();
        working.meta.nonce += 1;
        let mut rolls = RollStream::new(env.rng, working.seed, working.meta.nonce);
        let outcome = turns::run_exchange(&mut working, env, &mut rolls, player_action)?;

        working
            .check_invariants()
            .map_err(|error| EngineError::invariant(TransitionPhase::PostValidate, error))?;

        *self.state = working;
        Ok(outcome)
    }

    /// Records that the granted reward reached the player.
    ///
    /// Returns false when there is no undelivered reward.
    pub fn mark_reward_delivered(&mut self) -> bool {
        match self.state.result.as_mut() {
            Some(result) if result.reward_pending() => {
                result.reward_delivered = true;
                true
            }
            _ => false,
        }
    }

    fn ensure_player_turn(&self) -> Result<(), action::ActionError> {
        match (self.state.status, self.state.meta.turn) {
            (CombatStatus::Pending, _) => Err(action::ActionError::CombatNotStarted),
            (CombatStatus::Finished, _) | (_, Turn::Finished) => {
                Err(action::ActionError::CombatFinished)
            }
            (CombatStatus::Active, Turn::Player) => Ok(()),
            (CombatStatus::Active, current) => Err(action::ActionError::NotYourTurn { current }),
        }
    }
}

#[cfg(test)]
mod tests;
