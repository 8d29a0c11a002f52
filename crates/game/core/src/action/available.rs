//! Legal action computation.
//!
//! [`available_actions`] is what the client is shown; [`validate`] is what a
//! submission is checked against. Both run the same per-kind checks.

use arrayvec::ArrayVec;

use super::{Action, ActionError, ActionKind};
use crate::config::CombatConfig;
use crate::env::{SpellDefinition, SpellId, SpellTarget};
use crate::state::{Board, CombatState, ParticipantId, Position, Team};

/// A castable spell together with every tile it may currently target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellOption {
    pub spell: SpellId,
    pub name: String,
    pub mana_cost: u32,
    pub range: u32,
    pub targets: Vec<Position>,
}

/// Actions one side may take right now.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvailableActions {
    pub moves: ArrayVec<Position, { CombatConfig::MAX_NEIGHBOURS }>,
    /// Opponent in melee range.
    pub attack: Option<ParticipantId>,
    pub spells: Vec<SpellOption>,
    pub wait: bool,
}

impl AvailableActions {
    pub fn contains(&self, action: &Action) -> bool {
        match action {
            Action::Move { to } => self.moves.contains(to),
            Action::Attack => self.attack.is_some(),
            Action::Spell { spell, target } => self
                .spells
                .iter()
                .any(|option| option.spell == *spell && option.targets.contains(target)),
            Action::Wait => self.wait,
        }
    }

    /// Every concrete action, attacks first, then spells, moves and wait.
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        let attack = self.attack.map(|_| Action::Attack);
        let spells = self.spells.iter().flat_map(|option| {
            option.targets.iter().map(move |target| Action::Spell {
                spell: option.spell,
                target: *target,
            })
        });
        let moves = self.moves.iter().map(|to| Action::Move { to: *to });
        let wait = self.wait.then_some(Action::Wait);

        attack.into_iter().chain(spells).chain(moves).chain(wait)
    }
}

/// Adjacent on-board tiles around `from`, excluding `occupied`.
///
/// Generated row by row: `dy = -1..=1`, then `dx = -1..=1`.
pub fn move_targets(
    board: &Board,
    from: Position,
    occupied: Position,
) -> ArrayVec<Position, { CombatConfig::MAX_NEIGHBOURS }> {
    let mut targets = ArrayVec::new();
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let candidate = from.offset(dx, dy);
            if board.contains(candidate) && candidate != occupied {
                targets.push(candidate);
            }
        }
    }
    targets
}

/// Computes the legal action set of `team`. Pure: never cached, never mutates.
pub fn available_actions(state: &CombatState, team: Team) -> AvailableActions {
    let actor = state.participant(team);
    let snapshot = &actor.snapshot;

    let moves = if snapshot.permits(ActionKind::Move) {
        let opponent = state.participant(team.opponent());
        move_targets(&state.board, actor.position(), opponent.position())
    } else {
        ArrayVec::new()
    };

    let attack = check_attack(state, team)
        .ok()
        .map(|()| state.participant(team.opponent()).id);

    let spells = if snapshot.permits(ActionKind::Spell) {
        snapshot
            .spells
            .iter()
            .filter_map(|spell| {
                let target = candidate_target(state, team, spell);
                check_spell(state, team, spell.id, target)
                    .ok()
                    .map(|_| SpellOption {
                        spell: spell.id,
                        name: spell.name.clone(),
                        mana_cost: spell.mana_cost,
                        range: spell.range,
                        targets: vec![target],
                    })
            })
            .collect()
    } else {
        Vec::new()
    };

    AvailableActions {
        moves,
        attack,
        spells,
        wait: true,
    }
}

/// Checks a submitted action against the current state without mutating it.
pub fn validate(state: &CombatState, team: Team, action: &Action) -> Result<(), ActionError> {
    match *action {
        Action::Move { to } => check_move(state, team, to),
        Action::Attack => check_attack(state, team),
        Action::Spell { spell, target } => check_spell(state, team, spell, target).map(|_| ()),
        Action::Wait => Ok(()),
    }
}

fn check_move(state: &CombatState, team: Team, to: Position) -> Result<(), ActionError> {
    let actor = state.participant(team);
    if !actor.snapshot.permits(ActionKind::Move) {
        return Err(ActionError::NotPermitted(ActionKind::Move));
    }
    if !state.board.contains(to) {
        return Err(ActionError::OutOfBounds {
            x: i64::from(to.x),
            y: i64::from(to.y),
        });
    }
    let distance = actor.position().chebyshev(to);
    if distance != 1 {
        return Err(ActionError::NotAdjacent { distance });
    }
    if state.participant(team.opponent()).position() == to {
        return Err(ActionError::Occupied);
    }
    Ok(())
}

fn check_attack(state: &CombatState, team: Team) -> Result<(), ActionError> {
    let actor = state.participant(team);
    if !actor.snapshot.permits(ActionKind::Attack) {
        return Err(ActionError::NotPermitted(ActionKind::Attack));
    }
    let distance = actor
        .position()
        .chebyshev(state.participant(team.opponent()).position());
    if distance > CombatConfig::MELEE_RANGE {
        return Err(ActionError::TargetOutOfReach { distance });
    }
    Ok(())
}

fn check_spell(
    state: &CombatState,
    team: Team,
    spell: SpellId,
    target: Position,
) -> Result<&SpellDefinition, ActionError> {
    let actor = state.participant(team);
    let snapshot = &actor.snapshot;
    if !snapshot.permits(ActionKind::Spell) {
        return Err(ActionError::NotPermitted(ActionKind::Spell));
    }
    let definition = snapshot
        .spell(spell)
        .ok_or(ActionError::UnknownSpell(spell))?;

    let ready_round = snapshot.ready_round(spell);
    if state.meta.round < ready_round {
        return Err(ActionError::OnCooldown { spell, ready_round });
    }
    if snapshot.current.mana < definition.mana_cost {
        return Err(ActionError::InsufficientMana {
            required: definition.mana_cost,
            available: snapshot.current.mana,
        });
    }
    if !state.board.contains(target) || target != candidate_target(state, team, definition) {
        return Err(ActionError::InvalidTarget);
    }
    let distance = actor.position().chebyshev(target);
    if distance > definition.range {
        return Err(ActionError::OutOfRange {
            distance,
            range: definition.range,
        });
    }
    Ok(definition)
}

/// The only tile a spell can be aimed at in a duel.
fn candidate_target(state: &CombatState, team: Team, spell: &SpellDefinition) -> Position {
    match spell.target {
        SpellTarget::Enemy => state.participant(team.opponent()).position(),
        SpellTarget::Ally | SpellTarget::SelfOnly => state.participant(team).position(),
    }
}
