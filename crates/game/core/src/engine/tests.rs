use proptest::prelude::*;

use super::*;
use crate::action::ActionError;
use crate::ai::{ChasePolicy, CombatPolicy};
use crate::env::{LootItem, PcgRng, SpellEffectSpec, SpellId};
use crate::error::{ErrorKind, GameError};
use crate::state::fixtures::duel;
use crate::state::{InvariantError, Position};

/// Opponent that never does anything.
struct Idle;

impl CombatPolicy for Idle {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn choose(&self, _: &CombatState, _: Team, _: &AvailableActions) -> Action {
        Action::Wait
    }
}

/// Opponent that always tries to attack, in range or not.
struct Reckless;

impl CombatPolicy for Reckless {
    fn name(&self) -> &'static str {
        "reckless"
    }

    fn choose(&self, _: &CombatState, _: Team, _: &AvailableActions) -> Action {
        Action::Attack
    }
}

fn loot() -> Vec<LootItem> {
    vec![LootItem::new("iron_sword", "Iron Sword")]
}

fn submit(
    state: &mut CombatState,
    policy: &dyn CombatPolicy,
    action: Action,
) -> Result<TurnOutcome, EngineError> {
    let config = CombatConfig::default();
    let loot = loot();
    let rng = PcgRng;
    let env = CombatEnv::new(&config, &rng, policy, &loot);
    CombatEngine::new(state).submit(&env, action)
}

fn count_lines(state: &CombatState, needle: &str) -> usize {
    state
        .meta
        .log
        .lines()
        .filter(|line| line.contains(needle))
        .count()
}

#[test]
fn strength_ten_attack_leaves_83_to_87() {
    for seed in 0..64 {
        let mut state = duel();
        state.seed = seed;
        state.enemy.snapshot.current.position = Position::new(2, 4);

        let outcome = submit(&mut state, &Idle, Action::Attack);

        assert!(outcome.is_ok(), "seed {seed}: {outcome:?}");
        assert!((83..=87).contains(&state.enemy.hp()), "seed {seed}");
    }
}

#[test]
fn accepted_move_updates_position_and_logs() {
    let mut state = duel();
    state.player.snapshot.current.position = Position::new(2, 3);

    let to = Position::new(3, 4);
    let outcome = submit(&mut state, &Idle, Action::Move { to });

    assert!(outcome.is_ok());
    assert_eq!(state.player.position(), to);
    assert_eq!(count_lines(&state, "Ayla moves to (4, 5)."), 1);
    assert_eq!(state.meta.round, 2);
    assert_eq!(state.meta.turn, Turn::Player);
}

#[test]
fn insufficient_mana_leaves_state_untouched() {
    let mut state = duel();
    state.player.snapshot.spells[0].mana_cost = 20;
    state.player.snapshot.current.mana = 15;
    let before = state.clone();

    let target = state.enemy.position();
    let result = submit(
        &mut state,
        &Idle,
        Action::Spell {
            spell: SpellId(1),
            target,
        },
    );

    assert_eq!(
        result,
        Err(EngineError::Rejected(ActionError::InsufficientMana {
            required: 20,
            available: 15
        }))
    );
    assert_eq!(result.map(|_| ()).unwrap_err().kind(), ErrorKind::IllegalAction);
    assert_eq!(state, before);
}

#[test]
fn killing_blow_finishes_and_rewards_once() {
    let mut state = duel();
    state.enemy.snapshot.current.position = Position::new(2, 4);
    state.enemy.snapshot.current.hp = 5;

    let outcome = submit(&mut state, &Idle, Action::Attack).unwrap();

    assert_eq!(outcome.status, CombatStatus::Finished);
    assert_eq!(outcome.winner, Some(Team::Player));
    assert_eq!(outcome.enemy_action, None);
    assert_eq!(state.status, CombatStatus::Finished);
    assert_eq!(state.meta.turn, Turn::Finished);

    let reward = outcome.reward.clone().unwrap();
    assert!((12..=28).contains(&reward.gold));
    assert_eq!(state.meta.reward, Some(reward.clone()));
    let result = state.result.clone().unwrap();
    assert_eq!(result.winner, Team::Player);
    assert_eq!(result.reward, Some(reward));
    assert!(result.reward_pending());
    assert_eq!(result.summary.opponent.name, "Goblin");

    assert!(CombatEngine::new(&mut state).mark_reward_delivered());
    assert!(!CombatEngine::new(&mut state).mark_reward_delivered());
    assert!(!state.result.as_ref().unwrap().reward_pending());

    let before = state.clone();
    for _ in 0..3 {
        assert_eq!(
            submit(&mut state, &Idle, Action::Wait),
            Err(EngineError::Rejected(ActionError::CombatFinished))
        );
    }
    assert_eq!(state, before);
    assert_eq!(count_lines(&state, "Reward:"), 1);
}

#[test]
fn ignite_of_three_ticks_three_times() {
    let mut state = duel();
    state.player.snapshot.spells[0].effects = vec![SpellEffectSpec {
        code: "ignite".into(),
        duration_rounds: 3,
        magnitude: 1,
    }];
    let target = state.enemy.position();

    submit(
        &mut state,
        &Idle,
        Action::Spell {
            spell: SpellId(1),
            target,
        },
    )
    .unwrap();
    for _ in 0..4 {
        submit(&mut state, &Idle, Action::Wait).unwrap();
    }

    assert_eq!(count_lines(&state, "takes 3 ignite damage from Ayla"), 3);
    assert_eq!(count_lines(&state, "ignite on Goblin has expired."), 1);
    assert!(state.effects.is_empty());
    // 8 from the cast, 9 from the ticks.
    assert_eq!(state.enemy.hp(), 83);
}

#[test]
fn lingering_effect_can_end_the_fight() {
    let mut state = duel();
    state.enemy.snapshot.current.hp = 10;
    let target = state.enemy.position();

    let outcome = submit(
        &mut state,
        &Idle,
        Action::Spell {
            spell: SpellId(1),
            target,
        },
    )
    .unwrap();

    assert_eq!(outcome.winner, Some(Team::Player));
    assert_eq!(outcome.enemy_action, None);
    assert_eq!(state.meta.lingering_death, Some(state.enemy.id));
    assert!(state.meta.reward.is_some());
}

#[test]
fn opponent_can_win() {
    let mut state = duel();
    state.enemy.snapshot.current.position = Position::new(2, 4);
    state.player.snapshot.current.hp = 1;

    let outcome = submit(&mut state, &ChasePolicy, Action::Wait).unwrap();

    assert_eq!(outcome.enemy_action, Some(Action::Attack));
    assert_eq!(outcome.winner, Some(Team::Enemy));
    assert_eq!(outcome.reward, None);
    assert_eq!(state.meta.reward, None);
    assert_eq!(state.result.map(|result| result.winner), Some(Team::Enemy));
}

#[test]
fn wrong_turn_and_pending_are_conflicts() {
    let mut state = duel();
    state.meta.turn = Turn::Enemy;
    let error = submit(&mut state, &Idle, Action::Wait).unwrap_err();
    assert_eq!(
        error,
        EngineError::Rejected(ActionError::NotYourTurn {
            current: Turn::Enemy
        })
    );
    assert_eq!(error.kind(), ErrorKind::Conflict);

    let config = CombatConfig::default();
    let mut pending = duel();
    pending.status = CombatStatus::Pending;
    pending.meta = crate::state::CombatMeta::new();
    let error = submit(&mut pending, &Idle, Action::Wait).unwrap_err();
    assert_eq!(error, EngineError::Rejected(ActionError::CombatNotStarted));

    CombatEngine::new(&mut pending).start(&config).unwrap();
    assert_eq!(pending.status, CombatStatus::Active);
    assert!(submit(&mut pending, &Idle, Action::Wait).is_ok());
}

#[test]
fn illegal_policy_choice_is_an_invariant_failure() {
    let mut state = duel();
    let before = state.clone();

    let error = submit(&mut state, &Reckless, Action::Wait).unwrap_err();

    assert!(matches!(
        error,
        EngineError::Invariant {
            phase: TransitionPhase::Apply,
            error: InvariantError::PolicyChoseIllegalAction(_),
        }
    ));
    assert_eq!(error.kind(), ErrorKind::InternalInvariant);
    assert_eq!(state, before);
}

#[test]
fn corrupt_state_fails_before_resolution() {
    let mut state = duel();
    state.player.snapshot.current.hp = state.player.hp_max() + 1;

    let error = submit(&mut state, &Idle, Action::Wait).unwrap_err();

    assert!(matches!(
        error,
        EngineError::Invariant {
            phase: TransitionPhase::PreValidate,
            ..
        }
    ));
}

#[test]
fn available_actions_only_on_own_turn() {
    let mut state = duel();
    assert!(CombatEngine::new(&mut state)
        .available_actions(Team::Player)
        .is_some());
    assert!(CombatEngine::new(&mut state)
        .available_actions(Team::Enemy)
        .is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_duels_keep_invariants(seed: u64, choices in prop::collection::vec(any::<u8>(), 1..80)) {
        let mut state = duel();
        state.seed = seed;

        for choice in choices {
            if state.is_finished() {
                break;
            }
            let available = action::available_actions(&state, Team::Player);
            let actions: Vec<Action> = available.iter().collect();
            let action = actions[usize::from(choice) % actions.len()];
            let reward_before = state.meta.reward.clone();

            let outcome = submit(&mut state, &ChasePolicy, action);
            prop_assert!(outcome.is_ok(), "{:?}", outcome);
            prop_assert_eq!(state.check_invariants(), Ok(()));

            let someone_down = state.player.is_defeated() || state.enemy.is_defeated();
            prop_assert_eq!(state.is_finished(), someone_down);
            prop_assert!(state.meta.log.entries().len() <= 50);
            prop_assert_eq!(state.meta.log.last_round(), Some(state.meta.round));
            if reward_before.is_some() {
                prop_assert_eq!(&state.meta.reward, &reward_before);
            }
        }

        if let Some(result) = &state.result {
            let loser = state.participant(result.winner.opponent());
            prop_assert!(loser.is_defeated());
            prop_assert_eq!(result.reward.is_some(), result.winner == Team::Player);
        }
    }
}
