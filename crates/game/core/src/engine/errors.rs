//! Error types for the turn pipeline.

use crate::action::ActionError;
use crate::error::{ErrorKind, GameError};
use crate::state::InvariantError;

/// Identifies which stage of the turn pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TransitionPhase {
    /// Loaded state checked before anything runs.
    PreValidate,
    /// Sequencing of the player action, effects and the opponent's reply.
    Apply,
    /// Resulting state checked before it replaces the original.
    PostValidate,
}

/// Errors surfaced while executing a turn through the combat engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The submitted action was refused. The combat is unchanged.
    #[error("action rejected: {0}")]
    Rejected(#[from] ActionError),

    /// The combat is corrupt or the turn produced an inconsistent state.
    #[error("{phase} failed: {error}")]
    Invariant {
        phase: TransitionPhase,
        error: InvariantError,
    },
}

impl EngineError {
    pub fn invariant(phase: TransitionPhase, error: InvariantError) -> Self {
        Self::Invariant { phase, error }
    }
}

impl GameError for EngineError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Rejected(error) => error.kind(),
            Self::Invariant { error, .. } => error.kind(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(error) => error.error_code(),
            Self::Invariant { error, .. } => error.error_code(),
        }
    }
}
