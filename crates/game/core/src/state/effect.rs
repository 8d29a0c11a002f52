//! Timed effects attached to participants.
//!
//! Effects are keyed by their code. Codes this build does not understand
//! deserialize into [`EffectKind::Unknown`] and expire on their next tick.

use std::fmt;

use super::ParticipantId;

/// Identifier of an effect record, allocated in ascending order per combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EffectId(pub u32);

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect#{}", self.0)
    }
}

/// Tick payload, tagged by effect code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "code", rename_all = "snake_case"))]
pub enum EffectKind {
    /// Burning damage. A new ignite replaces the existing one.
    Ignite { damage_per_tick: u32 },
    /// Generic damage over time. Re-applying adds a stack.
    Dot { damage_per_tick: u32 },
    /// Healing over time. Re-applying adds a stack.
    Hot { heal_per_tick: u32 },
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

/// How a new application combines with an effect of the same code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stacking {
    Refresh,
    Stack,
    Independent,
}

impl EffectKind {
    /// Builds the payload for `code`, falling back to [`EffectKind::Unknown`].
    pub fn from_code(code: &str, per_tick: u32) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "ignite" => Self::Ignite {
                damage_per_tick: per_tick,
            },
            "dot" => Self::Dot {
                damage_per_tick: per_tick,
            },
            "hot" => Self::Hot {
                heal_per_tick: per_tick,
            },
            _ => Self::Unknown,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Ignite { .. } => "ignite",
            Self::Dot { .. } => "dot",
            Self::Hot { .. } => "hot",
            Self::Unknown => "unknown",
        }
    }

    pub const fn stacking(&self) -> Stacking {
        match self {
            Self::Ignite { .. } => Stacking::Refresh,
            Self::Dot { .. } | Self::Hot { .. } => Stacking::Stack,
            Self::Unknown => Stacking::Independent,
        }
    }

    pub fn same_code(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}

/// One timed effect on one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRecord {
    pub id: EffectId,
    /// Participant the effect ticks on.
    pub target: ParticipantId,
    /// Participant credited with the effect.
    pub source: ParticipantId,
    pub kind: EffectKind,
    pub stacks: u32,
    /// Round at which the effect runs out.
    pub expires_at_round: u32,
    /// Explicit tick counter. Takes precedence over `expires_at_round`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub remaining: Option<u32>,
}

impl EffectRecord {
    /// Ticks left at the start of `round`. Zero or below means expired.
    pub fn remaining_at(&self, round: u32) -> i64 {
        match self.remaining {
            Some(remaining) => i64::from(remaining),
            None => i64::from(self.expires_at_round) - i64::from(round),
        }
    }
}
