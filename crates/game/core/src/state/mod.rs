//! Authoritative combat state representation.
//!
//! A [`CombatState`] is the full persisted record of one duel: both
//! participants with their snapshots, active effects, match meta and the
//! terminal result. Runtime layers load it, hand it to the engine, and store
//! the whole record back. Nothing outside the engine mutates it.
mod common;
mod effect;
mod error;
mod meta;
mod participant;
mod result;

pub use common::{Board, CombatId, CombatStatus, ParticipantId, Position, Team, Turn};
pub use effect::{EffectId, EffectKind, EffectRecord, Stacking};
pub use error::InvariantError;
pub use meta::{CombatMeta, RoundEntry, RoundLog};
pub use participant::{
    CombatantSpec, MonsterMeta, Participant, ParticipantSnapshot, SpellCooldown, Vitals,
};
pub use result::{CombatResult, OpponentSummary, ResultSummary, RewardItem, RewardPayload};

use crate::action::ActionKind;
use crate::config::CombatConfig;

/// Canonical snapshot of one combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub id: CombatId,
    pub status: CombatStatus,
    pub board: Board,
    /// Seed drawn at encounter creation. Combined with `meta.nonce` per action.
    pub seed: u64,
    pub player: Participant,
    pub enemy: Participant,
    /// Active effects in ascending id order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectRecord>,
    pub meta: CombatMeta,
    #[cfg_attr(feature = "serde", serde(default))]
    pub result: Option<CombatResult>,
}

impl CombatState {
    /// Seats both sides on their opening tiles. The combat starts `Pending`.
    pub fn new(
        id: CombatId,
        seed: u64,
        config: &CombatConfig,
        player: CombatantSpec,
        enemy: CombatantSpec,
    ) -> Self {
        let player = Participant {
            id: ParticipantId::PLAYER,
            name: player.name,
            team: Team::Player,
            is_ai: false,
            source_id: player.source_id,
            snapshot: ParticipantSnapshot::new(
                player.stats,
                config.player_start(),
                player.spells,
                ActionKind::ALL.to_vec(),
            ),
            flavor: player.flavor,
        };
        let enemy = Participant {
            id: ParticipantId::ENEMY,
            name: enemy.name,
            team: Team::Enemy,
            is_ai: true,
            source_id: enemy.source_id,
            snapshot: ParticipantSnapshot::new(
                enemy.stats,
                config.enemy_start(),
                enemy.spells,
                ActionKind::MELEE.to_vec(),
            ),
            flavor: enemy.flavor,
        };

        Self {
            id,
            status: CombatStatus::Pending,
            board: config.board(),
            seed,
            player,
            enemy,
            effects: Vec::new(),
            meta: CombatMeta::new(),
            result: None,
        }
    }

    /// Moves a pending combat to round 1 with the player to act.
    ///
    /// Returns false if the combat was not pending.
    pub fn start(&mut self, config: &CombatConfig) -> bool {
        if self.status != CombatStatus::Pending {
            return false;
        }
        self.status = CombatStatus::Active;
        self.meta.turn = Turn::Player;
        self.meta.advance_round(config.log_retention_rounds);
        let line = format!("{} engages {}.", self.player.name, self.enemy.name);
        self.meta.log(line);
        true
    }

    pub fn is_finished(&self) -> bool {
        self.status == CombatStatus::Finished
    }

    pub fn participant(&self, team: Team) -> &Participant {
        match team {
            Team::Player => &self.player,
            Team::Enemy => &self.enemy,
        }
    }

    pub fn participant_mut(&mut self, team: Team) -> &mut Participant {
        match team {
            Team::Player => &mut self.player,
            Team::Enemy => &mut self.enemy,
        }
    }

    pub fn participant_by_id(&self, id: ParticipantId) -> Option<&Participant> {
        [&self.player, &self.enemy]
            .into_iter()
            .find(|participant| participant.id == id)
    }

    pub fn participant_by_id_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        if self.player.id == id {
            Some(&mut self.player)
        } else if self.enemy.id == id {
            Some(&mut self.enemy)
        } else {
            None
        }
    }

    /// Team of the participant that has been defeated, if any.
    pub fn defeated_team(&self) -> Option<Team> {
        if self.player.is_defeated() {
            Some(Team::Player)
        } else if self.enemy.is_defeated() {
            Some(Team::Enemy)
        } else {
            None
        }
    }

    pub fn allocate_effect_id(&mut self) -> EffectId {
        let id = EffectId(self.meta.next_effect_id);
        self.meta.next_effect_id = self.meta.next_effect_id.saturating_add(1);
        id
    }

    /// Effects ticking on `target`, in id order.
    pub fn effects_on(&self, target: ParticipantId) -> impl Iterator<Item = &EffectRecord> {
        self.effects.iter().filter(move |effect| effect.target == target)
    }

    /// Verifies every structural invariant of a stored combat.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.check_roster()?;

        for participant in [&self.player, &self.enemy] {
            let position = participant.position();
            if !self.board.contains(position) {
                return Err(InvariantError::OutOfBounds {
                    participant: participant.id,
                    position,
                });
            }
            let stats = &participant.snapshot.stats;
            let current = &participant.snapshot.current;
            if current.hp > stats.hp_max {
                return Err(InvariantError::ResourceOverflow {
                    participant: participant.id,
                    resource: "hp",
                    value: current.hp,
                    max: stats.hp_max,
                });
            }
            if current.mana > stats.mana_max {
                return Err(InvariantError::ResourceOverflow {
                    participant: participant.id,
                    resource: "mana",
                    value: current.mana,
                    max: stats.mana_max,
                });
            }
        }
        if self.player.position() == self.enemy.position() {
            return Err(InvariantError::SharedTile(self.player.position()));
        }

        self.check_lifecycle()?;
        self.check_log()?;

        if let Some(effect) = self
            .effects
            .iter()
            .find(|effect| self.participant_by_id(effect.target).is_none())
        {
            return Err(InvariantError::EffectTarget(effect.target));
        }

        Ok(())
    }

    fn check_roster(&self) -> Result<(), InvariantError> {
        if self.player.team != Team::Player || self.player.is_ai {
            return Err(InvariantError::RosterMismatch("player seat is not a human player"));
        }
        if self.enemy.team != Team::Enemy || !self.enemy.is_ai {
            return Err(InvariantError::RosterMismatch("enemy seat is not an AI opponent"));
        }
        if self.player.id == self.enemy.id {
            return Err(InvariantError::RosterMismatch("participants share an id"));
        }
        Ok(())
    }

    fn check_lifecycle(&self) -> Result<(), InvariantError> {
        let status = self.status;
        let turn = self.meta.turn;
        let consistent = match status {
            CombatStatus::Pending => turn == Turn::Player,
            CombatStatus::Active => turn != Turn::Finished,
            CombatStatus::Finished => turn == Turn::Finished,
        };
        if !consistent {
            return Err(InvariantError::TurnStatusMismatch { status, turn });
        }

        match status {
            CombatStatus::Pending | CombatStatus::Active => {
                if self.defeated_team().is_some() {
                    return Err(InvariantError::DefeatedWhileActive { status });
                }
            }
            CombatStatus::Finished => {
                if self.defeated_team().is_none() || self.result.is_none() {
                    return Err(InvariantError::FinishedWithoutOutcome);
                }
            }
        }

        if self.meta.reward.is_some()
            && self.result.as_ref().map(|result| result.winner) != Some(Team::Player)
        {
            return Err(InvariantError::RewardWithoutVictory);
        }
        Ok(())
    }

    fn check_log(&self) -> Result<(), InvariantError> {
        if !self.meta.log.is_strictly_ascending() {
            return Err(InvariantError::RoundLogOrder);
        }
        if self.status != CombatStatus::Pending {
            let found = self.meta.log.last_round();
            if found != Some(self.meta.round) {
                return Err(InvariantError::RoundLogHead {
                    expected: self.meta.round,
                    found,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::env::{SpellDefinition, SpellEffectSpec, SpellId, SpellTarget};
    use crate::stats::{RawAttributes, StatBlock};

    pub fn fireball() -> SpellDefinition {
        SpellDefinition {
            id: SpellId(1),
            name: "Fireball".into(),
            target: SpellTarget::Enemy,
            range: 6,
            mana_cost: 5,
            damage: 5,
            cooldown: 2,
            effects: vec![SpellEffectSpec {
                code: "ignite".into(),
                duration_rounds: 3,
                magnitude: 1,
            }],
        }
    }

    pub fn heal() -> SpellDefinition {
        SpellDefinition {
            id: SpellId(3),
            name: "Heal".into(),
            target: SpellTarget::Ally,
            range: 4,
            mana_cost: 6,
            damage: 10,
            cooldown: 2,
            effects: Vec::new(),
        }
    }

    pub fn combatant(
        name: &str,
        attributes: RawAttributes,
        spells: Vec<SpellDefinition>,
    ) -> CombatantSpec {
        CombatantSpec {
            name: name.into(),
            source_id: name.to_lowercase(),
            stats: StatBlock::derive(&attributes, 1),
            spells,
            flavor: None,
        }
    }

    /// Active 8x8 duel: player STR 10 / INT 3 / 20 mana, enemy with 100 hp.
    pub fn duel() -> CombatState {
        let config = CombatConfig::default();
        let player = combatant(
            "Ayla",
            RawAttributes::new()
                .with("strength", 10.0)
                .with("intelligence", 3.0)
                .with("mana", 14.0),
            vec![fireball(), heal()],
        );
        let enemy = combatant(
            "Goblin",
            RawAttributes::new().with("str", 4.0).with("hp", 84.0),
            Vec::new(),
        );
        let mut state = CombatState::new(CombatId(1), 42, &config, player, enemy);
        state.start(&config);
        state
    }
}
