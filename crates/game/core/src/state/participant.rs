//! Participants and their per-combat snapshots.

use super::{ParticipantId, Position, Team};
use crate::action::ActionKind;
use crate::env::{SpellDefinition, SpellId};
use crate::stats::StatBlock;

/// Hit points, mana and tile of a participant at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub hp: u32,
    pub mana: u32,
    pub position: Position,
}

/// Round from which a spell may be cast again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellCooldown {
    pub spell: SpellId,
    pub ready_round: u32,
}

/// Opponent flavor shown to the player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterMeta {
    pub race: String,
    pub rarity: String,
    pub description: String,
}

/// Combat-specific mutable state of a participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantSnapshot {
    pub stats: StatBlock,
    pub current: Vitals,
    /// Vitals at encounter start. Never mutated.
    pub initial: Vitals,
    pub spells: Vec<SpellDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldowns: Vec<SpellCooldown>,
    /// Action kinds this participant may ever use.
    pub actions: Vec<ActionKind>,
}

impl ParticipantSnapshot {
    pub fn new(
        stats: StatBlock,
        position: Position,
        spells: Vec<SpellDefinition>,
        actions: Vec<ActionKind>,
    ) -> Self {
        let vitals = Vitals {
            hp: stats.hp_max,
            mana: stats.mana_max,
            position,
        };
        Self {
            stats,
            current: vitals,
            initial: vitals,
            spells,
            cooldowns: Vec::new(),
            actions,
        }
    }

    pub fn permits(&self, kind: ActionKind) -> bool {
        self.actions.contains(&kind)
    }

    pub fn spell(&self, id: SpellId) -> Option<&SpellDefinition> {
        self.spells.iter().find(|spell| spell.id == id)
    }

    /// First round in which `spell` may be cast. Round 0 means always.
    pub fn ready_round(&self, spell: SpellId) -> u32 {
        self.cooldowns
            .iter()
            .find(|cooldown| cooldown.spell == spell)
            .map_or(0, |cooldown| cooldown.ready_round)
    }

    pub fn start_cooldown(&mut self, spell: SpellId, ready_round: u32) {
        match self.cooldowns.iter_mut().find(|c| c.spell == spell) {
            Some(cooldown) => cooldown.ready_round = ready_round,
            None => self.cooldowns.push(SpellCooldown { spell, ready_round }),
        }
    }
}

/// One combatant within a single combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub team: Team,
    pub is_ai: bool,
    /// Character or monster this participant was created from.
    pub source_id: String,
    pub snapshot: ParticipantSnapshot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flavor: Option<MonsterMeta>,
}

impl Participant {
    pub fn position(&self) -> Position {
        self.snapshot.current.position
    }

    pub fn hp(&self) -> u32 {
        self.snapshot.current.hp
    }

    pub fn hp_max(&self) -> u32 {
        self.snapshot.stats.hp_max
    }

    pub fn is_defeated(&self) -> bool {
        self.hp() == 0
    }

    /// Reduces hp, floored at zero. Returns the hp actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.snapshot.current.hp;
        self.snapshot.current.hp = before.saturating_sub(amount);
        before - self.snapshot.current.hp
    }

    /// Restores hp, capped at the maximum. Returns the hp actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.snapshot.current.hp;
        self.snapshot.current.hp = before.saturating_add(amount).min(self.hp_max());
        self.snapshot.current.hp.saturating_sub(before)
    }

    /// `(hp/max)` suffix used in log lines.
    pub fn hp_label(&self) -> String {
        format!("{}/{}", self.hp(), self.hp_max())
    }
}

/// Everything needed to seat one side of a new encounter.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatantSpec {
    pub name: String,
    pub source_id: String,
    pub stats: StatBlock,
    pub spells: Vec<SpellDefinition>,
    pub flavor: Option<MonsterMeta>,
}
