//! Status effect processor.
//!
//! Effects tick at the start of their target's turn, once per side per round.
//! For each effect on the acting participant, in id order:
//!
//! 1. Remaining ticks `<= 0` (or an unknown code): remove and log expiry
//! 2. Otherwise apply the tick payload and log it with source attribution
//! 3. If the target dropped to 0 hp: remove the effect, flag a lingering
//!    death and stop
//! 4. Otherwise decrement the counter and persist the new expiry

use crate::env::SpellEffectSpec;
use crate::state::{CombatState, EffectId, EffectKind, EffectRecord, ParticipantId, Stacking};

/// What happened during one turn-start pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub ticked: u32,
    pub expired: u32,
    /// Target died from an effect tick.
    pub killed: bool,
}

/// Attaches a spell effect to `target`, honouring the code's stacking rule.
///
/// Returns the id of the new or refreshed record.
pub fn attach(
    state: &mut CombatState,
    spec: &SpellEffectSpec,
    source: ParticipantId,
    target: ParticipantId,
    caster_intelligence: u32,
) -> EffectId {
    let kind = EffectKind::from_code(&spec.code, spec.per_tick(caster_intelligence));
    let duration = spec.duration_rounds;
    let expires_at_round = state.meta.round + duration;
    let target_name = state
        .participant_by_id(target)
        .map(|participant| participant.name.clone())
        .unwrap_or_default();

    match kind.stacking() {
        Stacking::Refresh => {
            state
                .effects
                .retain(|effect| !(effect.target == target && effect.kind.same_code(&kind)));
        }
        Stacking::Stack => {
            if let Some(existing) = state
                .effects
                .iter_mut()
                .find(|effect| effect.target == target && effect.kind.same_code(&kind))
            {
                existing.stacks += 1;
                existing.remaining = Some(duration);
                existing.expires_at_round = expires_at_round;
                let (id, stacks) = (existing.id, existing.stacks);
                state.meta.log(format!(
                    "{target_name}'s {} intensifies to {stacks} stacks.",
                    kind.code()
                ));
                return id;
            }
        }
        Stacking::Independent => {}
    }

    let id = state.allocate_effect_id();
    state.effects.push(EffectRecord {
        id,
        target,
        source,
        kind,
        stacks: 1,
        expires_at_round,
        remaining: Some(duration),
    });
    state.meta.log(format!(
        "{target_name} is afflicted by {} for {duration} rounds.",
        kind.code()
    ));
    id
}

/// Runs the turn-start pass for `target`.
pub fn process_turn_start(state: &mut CombatState, target: ParticipantId) -> TickReport {
    let mut report = TickReport::default();
    let round = state.meta.round;

    let mut ids: Vec<EffectId> = state.effects_on(target).map(|effect| effect.id).collect();
    ids.sort_unstable();

    for id in ids {
        let Some(index) = state.effects.iter().position(|effect| effect.id == id) else {
            continue;
        };
        let record = state.effects[index].clone();
        let remaining = record.remaining_at(round);
        let source_name = state
            .participant_by_id(record.source)
            .map(|participant| participant.name.clone())
            .unwrap_or_else(|| "an unknown source".to_string());
        let Some(participant) = state.participant_by_id_mut(target) else {
            break;
        };
        let target_name = participant.name.clone();

        if remaining <= 0 || record.kind == EffectKind::Unknown {
            state.effects.remove(index);
            let line = match record.kind {
                EffectKind::Unknown => {
                    format!("An unrecognised effect on {target_name} has expired.")
                }
                kind => format!("{} on {target_name} has expired.", kind.code()),
            };
            state.meta.log(line);
            report.expired += 1;
            continue;
        }

        let line = match record.kind {
            EffectKind::Ignite { damage_per_tick } | EffectKind::Dot { damage_per_tick } => {
                let dealt = participant.take_damage(damage_per_tick.saturating_mul(record.stacks));
                format!(
                    "{target_name} takes {dealt} {} damage from {source_name} (HP {}).",
                    record.kind.code(),
                    participant.hp_label()
                )
            }
            EffectKind::Hot { heal_per_tick } => {
                let restored = participant.heal(heal_per_tick.saturating_mul(record.stacks));
                format!(
                    "{target_name} recovers {restored} HP from {source_name}'s {} (HP {}).",
                    record.kind.code(),
                    participant.hp_label()
                )
            }
            EffectKind::Unknown => continue,
        };
        let defeated = participant.is_defeated();
        state.meta.log(line);
        report.ticked += 1;

        if defeated {
            state.effects.remove(index);
            state.meta.lingering_death = Some(target);
            state
                .meta
                .log(format!("{target_name} succumbs to lingering effects."));
            report.killed = true;
            break;
        }

        let left = (remaining - 1).max(0) as u32;
        let effect = &mut state.effects[index];
        effect.remaining = Some(left);
        effect.expires_at_round = round + 1 + left;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::duel;

    fn ignite(duration_rounds: u32) -> SpellEffectSpec {
        SpellEffectSpec {
            code: "ignite".into(),
            duration_rounds,
            magnitude: 1,
        }
    }

    #[test]
    fn ignite_ticks_for_its_duration_then_expires() {
        let mut state = duel();
        let (player, enemy) = (state.player.id, state.enemy.id);
        attach(&mut state, &ignite(3), player, enemy, 3);

        let mut ticks = 0;
        for _ in 0..5 {
            let report = process_turn_start(&mut state, enemy);
            ticks += report.ticked;
            state.meta.advance_round(50);
        }

        assert_eq!(ticks, 3);
        assert!(state.effects.is_empty());
        assert_eq!(state.enemy.hp(), 100 - 9);
        assert!(state.meta.log.lines().any(|line| line == "ignite on Goblin has expired."));
        assert_eq!(
            state
                .meta
                .log
                .lines()
                .filter(|line| line.contains("ignite damage from Ayla"))
                .count(),
            3
        );
    }

    #[test]
    fn ignite_refreshes_instead_of_stacking() {
        let mut state = duel();
        let (player, enemy) = (state.player.id, state.enemy.id);
        attach(&mut state, &ignite(2), player, enemy, 3);
        process_turn_start(&mut state, enemy);
        attach(&mut state, &ignite(3), player, enemy, 5);

        let on_enemy: Vec<_> = state.effects_on(enemy).collect();
        assert_eq!(on_enemy.len(), 1);
        assert_eq!(on_enemy[0].remaining, Some(3));
        assert_eq!(on_enemy[0].kind, EffectKind::Ignite { damage_per_tick: 5 });
    }

    #[test]
    fn dot_stacks_multiply_damage() {
        let mut state = duel();
        let (player, enemy) = (state.player.id, state.enemy.id);
        let dot = SpellEffectSpec {
            code: "dot".into(),
            duration_rounds: 2,
            magnitude: 1,
        };
        attach(&mut state, &dot, player, enemy, 2);
        attach(&mut state, &dot, player, enemy, 2);
        assert_eq!(state.effects.len(), 1);

        process_turn_start(&mut state, enemy);
        assert_eq!(state.enemy.hp(), 96);
    }

    #[test]
    fn lethal_tick_flags_lingering_death() {
        let mut state = duel();
        let (player, enemy) = (state.player.id, state.enemy.id);
        attach(&mut state, &ignite(3), player, enemy, 3);
        attach(
            &mut state,
            &SpellEffectSpec {
                code: "dot".into(),
                duration_rounds: 3,
                magnitude: 1,
            },
            player,
            enemy,
            3,
        );
        state.enemy.snapshot.current.hp = 2;

        let report = process_turn_start(&mut state, enemy);

        assert!(report.killed);
        assert_eq!(report.ticked, 1, "processing stops at the lethal tick");
        assert_eq!(state.meta.lingering_death, Some(enemy));
        assert_eq!(state.effects.len(), 1);
        assert!(state.enemy.is_defeated());
    }

    #[test]
    fn unknown_codes_expire_without_ticking() {
        let mut state = duel();
        let (player, enemy) = (state.player.id, state.enemy.id);
        let frost = SpellEffectSpec {
            code: "frostbite".into(),
            duration_rounds: 4,
            magnitude: 2,
        };
        attach(&mut state, &frost, player, enemy, 3);

        let report = process_turn_start(&mut state, enemy);

        assert_eq!(report, TickReport { ticked: 0, expired: 1, killed: false });
        assert!(state.effects.is_empty());
        assert_eq!(state.enemy.hp(), 100);
    }

    #[test]
    fn derived_remaining_used_without_counter() {
        let mut state = duel();
        let (player, enemy) = (state.player.id, state.enemy.id);
        attach(&mut state, &ignite(1), player, enemy, 3);
        state.effects[0].remaining = None;
        state.meta.advance_round(50);

        let report = process_turn_start(&mut state, enemy);
        assert_eq!(report.expired, 1);
        assert_eq!(report.ticked, 0);
    }

    #[test]
    fn heal_over_time_caps_at_maximum() {
        let mut state = duel();
        let player = state.player.id;
        state.player.snapshot.current.hp = 38;
        let hot = SpellEffectSpec {
            code: "hot".into(),
            duration_rounds: 2,
            magnitude: 2,
        };
        attach(&mut state, &hot, player, player, 3);

        process_turn_start(&mut state, player);
        assert_eq!(state.player.hp(), 40);
        assert_eq!(state.effects[0].remaining, Some(1));
    }
}
