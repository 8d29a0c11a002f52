use super::Action;
use crate::combat::roll_attack_damage;
use crate::effect;
use crate::env::RollStream;
use crate::state::{CombatState, Team};

/// Applies a validated action for `team` and records it in the round log.
///
/// Callers must run [`validate`](super::validate) first; this function does
/// not re-check legality.
pub fn resolve(state: &mut CombatState, team: Team, action: &Action, rolls: &mut RollStream<'_>) {
    match *action {
        Action::Move { to } => {
            let actor = state.participant_mut(team);
            actor.snapshot.current.position = to;
            let line = format!("{} moves to {}.", actor.name, to.label());
            state.meta.log(line);
        }
        Action::Attack => {
            let (attacker_id, attacker_name, strength) = {
                let actor = state.participant(team);
                (actor.id, actor.name.clone(), actor.snapshot.stats.strength)
            };
            let damage = roll_attack_damage(strength, attacker_id, rolls);
            let defender = state.participant_mut(team.opponent());
            defender.take_damage(damage);
            let line = format!(
                "{attacker_name} attacks {} for {damage} damage ({} HP {}).",
                defender.name,
                defender.name,
                defender.hp_label()
            );
            state.meta.log(line);
        }
        Action::Spell { spell, .. } => {
            let round = state.meta.round;
            let caster = state.participant_mut(team);
            let Some(definition) = caster.snapshot.spell(spell).cloned() else {
                return;
            };
            caster.snapshot.current.mana =
                caster.snapshot.current.mana.saturating_sub(definition.mana_cost);
            caster
                .snapshot
                .start_cooldown(spell, round + definition.cooldown + 1);

            let caster_id = caster.id;
            let caster_name = caster.name.clone();
            let intelligence = caster.snapshot.stats.intelligence;
            let potency = definition.potency(intelligence);

            let target_team = if definition.target.is_hostile() {
                team.opponent()
            } else {
                team
            };
            let target = state.participant_mut(target_team);
            let line = if definition.target.is_hostile() {
                let dealt = target.take_damage(potency);
                format!(
                    "{caster_name} casts {} on {} for {dealt} damage ({} HP {}).",
                    definition.name,
                    target.name,
                    target.name,
                    target.hp_label()
                )
            } else {
                let restored = target.heal(potency);
                format!(
                    "{caster_name} casts {} and restores {restored} HP ({}).",
                    definition.name,
                    target.hp_label()
                )
            };
            let target_id = target.id;
            let survived = !target.is_defeated();
            state.meta.log(line);

            if survived {
                for spec in &definition.effects {
                    effect::attach(state, spec, caster_id, target_id, intelligence);
                }
            }
        }
        Action::Wait => {
            let line = format!("{} waits.", state.participant(team).name);
            state.meta.log(line);
        }
    }
}
