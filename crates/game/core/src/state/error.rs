//! Combat state invariant violations.
//!
//! These errors mean a stored combat is corrupt or the engine produced an
//! inconsistent state. They are never recoverable by the caller.

use crate::error::{ErrorKind, GameError};
use crate::state::{CombatStatus, ParticipantId, Position, Turn};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// Roster is not exactly one player participant and one AI participant.
    #[error("roster mismatch: {0}")]
    RosterMismatch(&'static str),

    #[error("participant {participant} at {position:?} is outside the board")]
    OutOfBounds {
        participant: ParticipantId,
        position: Position,
    },

    #[error("participants share tile {0:?}")]
    SharedTile(Position),

    #[error("participant {participant} has {value} {resource} with maximum {max}")]
    ResourceOverflow {
        participant: ParticipantId,
        resource: &'static str,
        value: u32,
        max: u32,
    },

    #[error("turn {turn} does not match status {status}")]
    TurnStatusMismatch { status: CombatStatus, turn: Turn },

    #[error("combat is {status} but a participant has no hp left")]
    DefeatedWhileActive { status: CombatStatus },

    #[error("combat finished without a defeated participant or result")]
    FinishedWithoutOutcome,

    #[error("round log is not strictly ascending")]
    RoundLogOrder,

    #[error("round log ends at round {found:?}, expected {expected}")]
    RoundLogHead { expected: u32, found: Option<u32> },

    #[error("reward recorded without a player victory")]
    RewardWithoutVictory,

    #[error("effect targets unknown participant {0}")]
    EffectTarget(ParticipantId),

    #[error("opponent policy chose an unavailable action: {0}")]
    PolicyChoseIllegalAction(String),
}

impl GameError for InvariantError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InternalInvariant
    }

    fn error_code(&self) -> &'static str {
        use InvariantError::*;
        match self {
            RosterMismatch(_) => "INVARIANT_ROSTER_MISMATCH",
            OutOfBounds { .. } => "INVARIANT_OUT_OF_BOUNDS",
            SharedTile(_) => "INVARIANT_SHARED_TILE",
            ResourceOverflow { .. } => "INVARIANT_RESOURCE_OVERFLOW",
            TurnStatusMismatch { .. } => "INVARIANT_TURN_STATUS_MISMATCH",
            DefeatedWhileActive { .. } => "INVARIANT_DEFEATED_WHILE_ACTIVE",
            FinishedWithoutOutcome => "INVARIANT_FINISHED_WITHOUT_OUTCOME",
            RoundLogOrder => "INVARIANT_ROUND_LOG_ORDER",
            RoundLogHead { .. } => "INVARIANT_ROUND_LOG_HEAD",
            RewardWithoutVictory => "INVARIANT_REWARD_WITHOUT_VICTORY",
            EffectTarget(_) => "INVARIANT_EFFECT_TARGET",
            PolicyChoseIllegalAction(_) => "INVARIANT_POLICY_ILLEGAL_ACTION",
        }
    }
}
