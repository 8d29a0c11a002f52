//! Spell definitions as resolved from a character's loadout.

use std::fmt;

/// Identifier of a spell definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpellId(pub u32);

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spell#{}", self.0)
    }
}

/// Which tile a spell may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpellTarget {
    /// The opponent's tile. Deals damage.
    Enemy,
    /// A friendly tile. In a duel the caster is its only ally. Heals.
    Ally,
    /// The caster's own tile. Heals.
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    SelfOnly,
}

impl SpellTarget {
    pub const fn is_hostile(self) -> bool {
        matches!(self, Self::Enemy)
    }
}

/// Timed effect attached to the target of a successful cast.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellEffectSpec {
    /// Effect code, e.g. `ignite`, `dot`, `hot`.
    pub code: String,
    /// Number of turn-start ticks.
    pub duration_rounds: u32,
    /// Per-tick amount per point of caster intelligence.
    pub magnitude: u32,
}

impl SpellEffectSpec {
    /// Per-tick amount for a caster: `max(1, magnitude * int)`.
    pub fn per_tick(&self, caster_intelligence: u32) -> u32 {
        self.magnitude.saturating_mul(caster_intelligence).max(1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: SpellId,
    pub name: String,
    pub target: SpellTarget,
    /// Maximum Chebyshev distance between caster and target tile.
    pub range: u32,
    pub mana_cost: u32,
    /// Base damage, or base healing for friendly spells.
    pub damage: u32,
    /// Rounds the spell stays unavailable after a cast.
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<SpellEffectSpec>,
}

impl SpellDefinition {
    /// Damage or healing dealt by a caster: `damage + int`.
    pub fn potency(&self, caster_intelligence: u32) -> u32 {
        self.damage.saturating_add(caster_intelligence)
    }
}
