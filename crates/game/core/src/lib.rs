//! Deterministic duel rules and data types.
//!
//! `game-core` defines the canonical rules of a 1v1 tactical duel (stats,
//! actions, effects, turn sequencing, rewards) and exposes pure APIs that the
//! runtime wraps with persistence and external collaborators. All state
//! mutation flows through [`engine::CombatEngine`]; randomness and opponent
//! behaviour are injected through [`env::CombatEnv`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod reward;
pub mod state;
pub mod stats;
pub mod view;

pub use action::{
    Action, ActionError, ActionKind, ActionRequest, AvailableActions, SpellOption, TileRequest,
};
pub use ai::{ChasePolicy, CombatPolicy};
pub use config::CombatConfig;
pub use engine::{CombatEngine, EngineError, TransitionPhase, TurnOutcome};
pub use env::{
    CombatEnv, FixedRng, LootItem, PcgRng, RngOracle, SpellDefinition, SpellEffectSpec, SpellId,
    SpellTarget, compute_seed,
};
pub use error::{ErrorKind, GameError};
pub use state::{
    Board, CombatId, CombatMeta, CombatResult, CombatState, CombatStatus, CombatantSpec,
    EffectKind, EffectRecord, InvariantError, MonsterMeta, Participant, ParticipantId, Position,
    RewardItem, RewardPayload, RoundEntry, Team, Turn,
};
pub use stats::{RawAttributes, StatBlock};
pub use view::{CombatView, ParticipantView};
