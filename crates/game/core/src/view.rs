//! Client-safe projection of a combat.
//!
//! Views are built from a stored state and never mutate it. The available
//! action set is computed fresh and included only while the combat is active
//! and the player is to act.

use crate::action::{AvailableActions, available_actions};
use crate::config::CombatConfig;
use crate::env::{SpellId, SpellTarget};
use crate::state::{
    Board, CombatId, CombatResult, CombatState, CombatStatus, EffectId, MonsterMeta, Participant,
    ParticipantId, Position, RoundEntry, Team, Turn, Vitals,
};
use crate::stats::StatBlock;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellView {
    pub id: SpellId,
    pub name: String,
    pub target: SpellTarget,
    pub range: u32,
    pub mana_cost: u32,
    pub damage: u32,
    pub cooldown: u32,
    /// First round the spell can be cast again.
    pub ready_round: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantView {
    pub id: ParticipantId,
    pub name: String,
    pub team: Team,
    pub is_ai: bool,
    pub position: Position,
    pub hp: u32,
    pub hp_max: u32,
    pub mana: u32,
    pub mana_max: u32,
    pub stats: StatBlock,
    pub current: Vitals,
    pub initial: Vitals,
    pub flavor: Option<MonsterMeta>,
    pub spells: Vec<SpellView>,
}

impl ParticipantView {
    fn project(participant: &Participant) -> Self {
        let snapshot = &participant.snapshot;
        Self {
            id: participant.id,
            name: participant.name.clone(),
            team: participant.team,
            is_ai: participant.is_ai,
            position: snapshot.current.position,
            hp: snapshot.current.hp,
            hp_max: snapshot.stats.hp_max,
            mana: snapshot.current.mana,
            mana_max: snapshot.stats.mana_max,
            stats: snapshot.stats,
            current: snapshot.current,
            initial: snapshot.initial,
            flavor: participant.flavor.clone(),
            spells: snapshot
                .spells
                .iter()
                .map(|spell| SpellView {
                    id: spell.id,
                    name: spell.name.clone(),
                    target: spell.target,
                    range: spell.range,
                    mana_cost: spell.mana_cost,
                    damage: spell.damage,
                    cooldown: spell.cooldown,
                    ready_round: snapshot.ready_round(spell.id),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectView {
    pub id: EffectId,
    pub target: ParticipantId,
    pub source: ParticipantId,
    pub code: String,
    pub stacks: u32,
    pub remaining: i64,
}

/// Everything a player client is allowed to see.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatView {
    pub id: CombatId,
    pub status: CombatStatus,
    pub board: Board,
    pub round: u32,
    pub turn: Turn,
    pub player: ParticipantView,
    pub enemy: ParticipantView,
    pub effects: Vec<EffectView>,
    pub available_actions: Option<AvailableActions>,
    /// Most recent rounds, oldest first.
    pub rounds: Vec<RoundEntry>,
    pub result: Option<CombatResult>,
}

impl CombatView {
    /// Projects `state` for its player.
    pub fn for_player(state: &CombatState, config: &CombatConfig) -> Self {
        let round = state.meta.round;
        let available_actions = (state.status == CombatStatus::Active
            && state.meta.turn == Turn::Player)
            .then(|| available_actions(state, Team::Player));

        Self {
            id: state.id,
            status: state.status,
            board: state.board,
            round,
            turn: state.meta.turn,
            player: ParticipantView::project(&state.player),
            enemy: ParticipantView::project(&state.enemy),
            effects: state
                .effects
                .iter()
                .map(|effect| EffectView {
                    id: effect.id,
                    target: effect.target,
                    source: effect.source,
                    code: effect.kind.code().to_string(),
                    stacks: effect.stacks,
                    remaining: effect.remaining_at(round),
                })
                .collect(),
            available_actions,
            rounds: state
                .meta
                .log
                .recent(config.log_retention_rounds.max(1))
                .to_vec(),
            result: state.result.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::duel;

    #[test]
    fn actions_shown_only_on_player_turn() {
        let config = CombatConfig::default();
        let mut state = duel();
        let view = CombatView::for_player(&state, &config);
        let actions = view.available_actions.expect("player to act");
        assert!(actions.wait);
        assert_eq!(actions.spells.len(), 2);

        state.meta.turn = Turn::Enemy;
        assert!(CombatView::for_player(&state, &config).available_actions.is_none());
    }

    #[test]
    fn view_truncates_rounds() {
        let config = CombatConfig {
            log_retention_rounds: 3,
            ..CombatConfig::default()
        };
        let mut state = duel();
        for _ in 0..5 {
            state.meta.advance_round(50);
            state.meta.log("tick");
        }
        let view = CombatView::for_player(&state, &config);
        let rounds: Vec<u32> = view.rounds.iter().map(|entry| entry.round).collect();
        assert_eq!(rounds, vec![4, 5, 6]);
    }

    #[test]
    fn view_exposes_initial_and_current_vitals() {
        let config = CombatConfig::default();
        let mut state = duel();
        state.enemy.snapshot.current.hp = 70;
        let view = CombatView::for_player(&state, &config);
        assert_eq!(view.enemy.hp, 70);
        assert_eq!(view.enemy.initial.hp, 100);
        assert_eq!(view.player.spells[0].name, "Fireball");
    }
}
