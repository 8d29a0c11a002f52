//! Action rejection errors.
//!
//! Every variant is raised before any mutation. The combat is unchanged and
//! the caller may retry with a different action.

use super::ActionKind;
use crate::env::SpellId;
use crate::error::{ErrorKind, GameError};
use crate::state::Turn;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Combat has not been started yet.
    #[error("combat has not started")]
    CombatNotStarted,

    /// Combat already finished.
    #[error("combat is already finished")]
    CombatFinished,

    /// Submitted while the other side is acting.
    #[error("not your turn (current turn: {current})")]
    NotYourTurn { current: Turn },

    /// Coordinates outside the board or not representable.
    #[error("coordinates ({x}, {y}) are outside the board")]
    OutOfBounds { x: i64, y: i64 },

    /// Participant is not allowed this kind of action.
    #[error("{0} actions are not available to this participant")]
    NotPermitted(ActionKind),

    /// Move target is not one of the adjacent tiles.
    #[error("move target is {distance} tiles away")]
    NotAdjacent { distance: u32 },

    /// Move target is the opponent's tile.
    #[error("tile is occupied")]
    Occupied,

    /// Opponent is beyond melee range.
    #[error("target is {distance} tiles away, beyond melee range")]
    TargetOutOfReach { distance: u32 },

    /// Spell is not in the caster's loadout.
    #[error("{0} is not equipped")]
    UnknownSpell(SpellId),

    #[error("insufficient mana: {required} required, {available} available")]
    InsufficientMana { required: u32, available: u32 },

    #[error("{spell} is on cooldown until round {ready_round}")]
    OnCooldown { spell: SpellId, ready_round: u32 },

    /// Target tile does not match the spell's target type.
    #[error("invalid spell target")]
    InvalidTarget,

    #[error("target is {distance} tiles away, spell range is {range}")]
    OutOfRange { distance: u32, range: u32 },
}

impl GameError for ActionError {
    fn kind(&self) -> ErrorKind {
        use ActionError::*;
        match self {
            CombatNotStarted | CombatFinished | NotYourTurn { .. } => ErrorKind::Conflict,
            OutOfBounds { .. } => ErrorKind::Validation,
            NotPermitted(_) | NotAdjacent { .. } | Occupied | TargetOutOfReach { .. } => {
                ErrorKind::IllegalAction
            }
            UnknownSpell(_)
            | InsufficientMana { .. }
            | OnCooldown { .. }
            | InvalidTarget
            | OutOfRange { .. } => ErrorKind::IllegalAction,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            CombatNotStarted => "ACTION_COMBAT_NOT_STARTED",
            CombatFinished => "ACTION_COMBAT_FINISHED",
            NotYourTurn { .. } => "ACTION_NOT_YOUR_TURN",
            OutOfBounds { .. } => "ACTION_OUT_OF_BOUNDS",
            NotPermitted(_) => "ACTION_NOT_PERMITTED",
            NotAdjacent { .. } => "ACTION_NOT_ADJACENT",
            Occupied => "ACTION_OCCUPIED",
            TargetOutOfReach { .. } => "ACTION_TARGET_OUT_OF_REACH",
            UnknownSpell(_) => "ACTION_UNKNOWN_SPELL",
            InsufficientMana { .. } => "ACTION_INSUFFICIENT_MANA",
            OnCooldown { .. } => "ACTION_ON_COOLDOWN",
            InvalidTarget => "ACTION_INVALID_TARGET",
            OutOfRange { .. } => "ACTION_OUT_OF_RANGE",
        }
    }
}
