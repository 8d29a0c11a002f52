//! Unified error type surfaced by the runtime API.
//!
//! Wraps engine, repository and collaborator failures while keeping the
//! [`ErrorKind`] of the underlying error, so callers can map every failure
//! onto a response without inspecting variants.

use game_core::{ActionError, CombatId, EngineError, ErrorKind, GameError};
use thiserror::Error;

pub use crate::repository::RepositoryError;
use crate::rewards::RewardError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("character {0} not found")]
    CharacterNotFound(String),

    #[error("{0} not found")]
    CombatNotFound(CombatId),

    #[error("no opponent available for a level {level} character")]
    NoOpponent { level: u32 },

    #[error("reward delivery for {combat_id} failed")]
    RewardDelivery {
        combat_id: CombatId,
        #[source]
        source: RewardError,
    },

    #[error("combat service requires {0} to be configured before building")]
    MissingCollaborator(&'static str),
}

impl From<ActionError> for RuntimeError {
    fn from(error: ActionError) -> Self {
        Self::Engine(error.into())
    }
}

impl RuntimeError {
    /// Engine-level rejection, if this error is one.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            Self::Engine(EngineError::Rejected(error)) => Some(error),
            _ => None,
        }
    }
}

impl GameError for RuntimeError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Engine(error) => error.kind(),
            Self::Repository(error) => error.kind(),
            Self::CharacterNotFound(_) | Self::CombatNotFound(_) | Self::NoOpponent { .. } => {
                ErrorKind::NotFound
            }
            // Retryable through reward reconciliation.
            Self::RewardDelivery { .. } => ErrorKind::Conflict,
            Self::MissingCollaborator(_) => ErrorKind::InternalInvariant,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(error) => error.error_code(),
            Self::Repository(error) => error.error_code(),
            Self::CharacterNotFound(_) => "RUNTIME_CHARACTER_NOT_FOUND",
            Self::CombatNotFound(_) => "RUNTIME_COMBAT_NOT_FOUND",
            Self::NoOpponent { .. } => "RUNTIME_NO_OPPONENT",
            Self::RewardDelivery { .. } => "RUNTIME_REWARD_DELIVERY",
            Self::MissingCollaborator(_) => "RUNTIME_MISSING_COLLABORATOR",
        }
    }
}
