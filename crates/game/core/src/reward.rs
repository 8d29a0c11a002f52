//! Victory reward rolling.
//!
//! The reward ledger lives on [`CombatMeta::reward`](crate::state::CombatMeta).
//! Once it holds a payload no further rolls happen for that combat, however
//! many times victory handling runs.

use crate::config::CombatConfig;
use crate::env::{LootItem, RollStream};
use crate::state::{CombatState, RewardItem, RewardPayload, Team};

/// Rolls and records the reward for a player victory.
///
/// Returns the payload only when it was granted by this call.
pub fn grant(
    state: &mut CombatState,
    winner: Team,
    config: &CombatConfig,
    loot: &[LootItem],
    rolls: &mut RollStream<'_>,
) -> Option<RewardPayload> {
    if winner != Team::Player || state.meta.reward.is_some() {
        return None;
    }

    let player = state.player.id;
    let (low, high) = (
        config.gold_min.min(config.gold_max),
        config.gold_min.max(config.gold_max),
    );
    let gold = rolls.range(player, low, high);

    let item = if !loot.is_empty() && rolls.chance(player, config.loot_chance_percent) {
        rolls
            .index(player, loot.len())
            .and_then(|index| loot.get(index))
            .map(|item| RewardItem {
                id: item.id.clone(),
                name: item.name.clone(),
            })
    } else {
        None
    };

    let payload = RewardPayload { gold, item };
    state.meta.log(payload.summary());
    state.meta.reward = Some(payload.clone());
    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedRng, PcgRng};
    use crate::state::fixtures::duel;

    fn loot() -> Vec<LootItem> {
        vec![
            LootItem::new("rusty_sword", "Rusty Sword"),
            LootItem::new("health_potion_minor", "Health Potion (Minor)"),
        ]
    }

    #[test]
    fn grants_once() {
        let mut state = duel();
        let config = CombatConfig::default();
        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, state.seed, 1);

        let first = grant(&mut state, Team::Player, &config, &loot(), &mut rolls);
        let payload = first.clone().unwrap_or_else(|| panic!("first grant must pay out"));
        assert!((12..=28).contains(&payload.gold));

        for _ in 0..3 {
            assert_eq!(
                grant(&mut state, Team::Player, &config, &loot(), &mut rolls),
                None
            );
        }
        assert_eq!(state.meta.reward, first);
        let summaries = state
            .meta
            .log
            .lines()
            .filter(|line| line.starts_with("Reward:"))
            .count();
        assert_eq!(summaries, 1);
    }

    #[test]
    fn enemy_victory_pays_nothing() {
        let mut state = duel();
        let rng = PcgRng;
        let mut rolls = RollStream::new(&rng, 0, 0);
        assert_eq!(
            grant(&mut state, Team::Enemy, &CombatConfig::default(), &loot(), &mut rolls),
            None
        );
        assert!(state.meta.reward.is_none());
    }

    #[test]
    fn loot_roll_respects_chance() {
        let config = CombatConfig::default();

        // d100 rolls 1: always under the chance.
        let mut state = duel();
        let rng = FixedRng::MIN;
        let mut rolls = RollStream::new(&rng, 0, 0);
        let payload = grant(&mut state, Team::Player, &config, &loot(), &mut rolls);
        assert_eq!(
            payload.and_then(|payload| payload.item).map(|item| item.id),
            Some("rusty_sword".to_string())
        );

        // d100 rolls 100: never drops below a 100% chance.
        let mut state = duel();
        let rng = FixedRng(99);
        let mut rolls = RollStream::new(&rng, 0, 0);
        let payload = grant(&mut state, Team::Player, &config, &loot(), &mut rolls);
        assert_eq!(payload.and_then(|payload| payload.item), None);
    }

    #[test]
    fn empty_pool_grants_gold_only() {
        let mut state = duel();
        let rng = FixedRng::MIN;
        let mut rolls = RollStream::new(&rng, 0, 0);
        let payload = grant(&mut state, Team::Player, &CombatConfig::default(), &[], &mut rolls);
        assert_eq!(
            payload,
            Some(RewardPayload {
                gold: 12,
                item: None
            })
        );
    }
}
