//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration or infrastructure.

pub mod encounter;
pub mod errors;

pub use encounter::{CombatRef, Encounter};
pub use errors::{Result, RuntimeError};
