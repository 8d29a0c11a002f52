//! Error types raised by repository implementations.

use game_core::{CombatId, ErrorKind, GameError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("combat repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("{0} not found")]
    NotFound(CombatId),

    #[error("{0} already exists")]
    AlreadyExists(CombatId),

    #[error("character {character} already has active {existing}")]
    ActiveCombatExists {
        character: String,
        existing: CombatId,
    },

    #[error("stale write to {id}: expected version {expected}, found {found}")]
    VersionConflict { id: CombatId, expected: u64, found: u64 },
}

impl GameError for RepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_)
            | Self::ActiveCombatExists { .. }
            | Self::VersionConflict { .. } => ErrorKind::Conflict,
            Self::LockPoisoned | Self::Io(_) | Self::Json(_) => ErrorKind::InternalInvariant,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Json(_) => "REPOSITORY_JSON",
            Self::NotFound(_) => "REPOSITORY_NOT_FOUND",
            Self::AlreadyExists(_) => "REPOSITORY_ALREADY_EXISTS",
            Self::ActiveCombatExists { .. } => "REPOSITORY_ACTIVE_COMBAT_EXISTS",
            Self::VersionConflict { .. } => "REPOSITORY_VERSION_CONFLICT",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
