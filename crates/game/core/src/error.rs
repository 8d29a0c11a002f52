//! Common error infrastructure for game-core.
//!
//! This module provides shared types and traits used across all error types in game-core.
//! Domain-specific errors (e.g., [`ActionError`](crate::action::ActionError),
//! [`InvariantError`](crate::state::InvariantError)) are defined next to the
//! code that raises them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure domain has its own error type with specific variants
//! - **Taxonomy**: Every error maps onto one [`ErrorKind`] so callers can pick a response
//! - **No Partial Commits**: Errors raised before mutation leave the combat untouched

/// Classification of an error, used for categorization and recovery strategies.
///
/// - **Validation**: malformed or out-of-range input, rejected before mutation
/// - **IllegalAction**: well-formed action that is not currently available
/// - **NotFound**: unknown combat, participant or character
/// - **Conflict**: wrong-turn submission or combat already finished
/// - **InternalInvariant**: corrupt or missing state, must fail loudly
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    Validation,
    IllegalAction,
    NotFound,
    Conflict,
    InternalInvariant,
}

impl ErrorKind {
    /// Returns true if the caller may surface the message and retry safely.
    ///
    /// State is guaranteed unchanged for every recoverable kind.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation | Self::IllegalAction | Self::NotFound | Self::Conflict
        )
    }

    /// Returns true if this error indicates a bug or corrupted state.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::InternalInvariant)
    }
}

/// Common trait for all game-core errors.
///
/// This trait provides a uniform interface for error classification across
/// all error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify kind based on how the caller should react, not on impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the taxonomy bucket of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_invariant_errors_are_internal() {
        for kind in [
            ErrorKind::Validation,
            ErrorKind::IllegalAction,
            ErrorKind::NotFound,
            ErrorKind::Conflict,
        ] {
            assert!(kind.is_recoverable());
            assert!(!kind.is_internal());
        }
        assert!(ErrorKind::InternalInvariant.is_internal());
        assert!(!ErrorKind::InternalInvariant.is_recoverable());
    }

    #[test]
    fn kind_renders_snake_case() {
        assert_eq!(ErrorKind::IllegalAction.to_string(), "illegal_action");
        assert_eq!(ErrorKind::InternalInvariant.as_ref(), "internal_invariant");
    }
}
