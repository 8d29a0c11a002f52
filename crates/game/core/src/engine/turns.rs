//! Phase-by-phase sequencing of one exchange.

use super::{EngineError, TransitionPhase, TurnOutcome};
use crate::action::{self, Action};
use crate::effect;
use crate::env::{CombatEnv, RollStream};
use crate::reward;
use crate::state::{
    CombatResult, CombatState, CombatStatus, InvariantError, OpponentSummary, ResultSummary,
    RewardPayload, Team, Turn,
};

pub(super) fn run_exchange(
    state: &mut CombatState,
    env: &CombatEnv<'_>,
    rolls: &mut RollStream<'_>,
    player_action: Action,
) -> Result<TurnOutcome, EngineError> {
    let mut outcome = TurnOutcome {
        player_action,
        enemy_action: None,
        status: CombatStatus::Active,
        winner: None,
        reward: None,
        round: state.meta.round,
    };

    // Player phase.
    action::resolve(state, Team::Player, &player_action, rolls);
    if state.enemy.is_defeated() {
        return Ok(conclude(state, env, rolls, Team::Player, outcome));
    }

    // Enemy effect phase.
    state.meta.turn = Turn::Enemy;
    let enemy = state.enemy.id;
    if effect::process_turn_start(state, enemy).killed {
        return Ok(conclude(state, env, rolls, Team::Player, outcome));
    }

    // Enemy phase.
    let available = action::available_actions(state, Team::Enemy);
    let enemy_action = env.policy.choose(state, Team::Enemy, &available);
    action::validate(state, Team::Enemy, &enemy_action).map_err(|error| {
        EngineError::invariant(
            TransitionPhase::Apply,
            InvariantError::PolicyChoseIllegalAction(format!(
                "{} chose {enemy_action:?}: {error}",
                env.policy.name()
            )),
        )
    })?;
    action::resolve(state, Team::Enemy, &enemy_action, rolls);
    outcome.enemy_action = Some(enemy_action);
    if state.player.is_defeated() {
        return Ok(conclude(state, env, rolls, Team::Enemy, outcome));
    }

    // Player effect phase of the next round.
    state.meta.advance_round(env.config.log_retention_rounds);
    state.meta.turn = Turn::Player;
    outcome.round = state.meta.round;
    let player = state.player.id;
    if effect::process_turn_start(state, player).killed {
        return Ok(conclude(state, env, rolls, Team::Enemy, outcome));
    }

    Ok(outcome)
}

fn conclude(
    state: &mut CombatState,
    env: &CombatEnv<'_>,
    rolls: &mut RollStream<'_>,
    winner: Team,
    mut outcome: TurnOutcome,
) -> TurnOutcome {
    outcome.reward = finish(state, env, rolls, winner);
    outcome.status = state.status;
    outcome.winner = Some(winner);
    outcome.round = state.meta.round;
    outcome
}

/// Marks the combat terminal, rolls the reward and records the result.
fn finish(
    state: &mut CombatState,
    env: &CombatEnv<'_>,
    rolls: &mut RollStream<'_>,
    winner: Team,
) -> Option<RewardPayload> {
    state.status = CombatStatus::Finished;
    state.meta.turn = Turn::Finished;

    let line = format!(
        "{} is defeated. {} wins.",
        state.participant(winner.opponent()).name,
        state.participant(winner).name
    );
    state.meta.log(line);

    let granted = reward::grant(state, winner, env.config, env.loot, rolls);

    if state.result.is_none() {
        state.result = Some(CombatResult {
            winner,
            summary: ResultSummary {
                total_rounds: state.meta.round,
                rounds: state.meta.log.entries().to_vec(),
                opponent: OpponentSummary {
                    name: state.enemy.name.clone(),
                    rarity: state
                        .enemy
                        .flavor
                        .as_ref()
                        .map(|flavor| flavor.rarity.clone()),
                },
            },
            reward: state.meta.reward.clone(),
            reward_delivered: false,
        });
    }

    granted
}
