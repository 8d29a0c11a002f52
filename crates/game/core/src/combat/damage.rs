//! Damage calculation.

use crate::config::CombatConfig;
use crate::env::RollStream;
use crate::state::ParticipantId;

/// Melee damage before variance: `ceil(1.5 * STR)`.
pub fn base_attack_damage(strength: u32) -> i64 {
    (i64::from(strength) * 3 + 1) / 2
}

/// Inclusive bounds of the rolled melee damage.
///
/// # Formula
///
/// ```text
/// damage = max(1, ceil(1.5 * STR) + uniform(-2, 2))
/// ```
pub fn attack_damage_bounds(strength: u32) -> (u32, u32) {
    let base = base_attack_damage(strength);
    let variance = i64::from(CombatConfig::DAMAGE_VARIANCE);
    (clamp_damage(base - variance), clamp_damage(base + variance))
}

/// Rolls melee damage for `attacker`.
pub fn roll_attack_damage(
    strength: u32,
    attacker: ParticipantId,
    rolls: &mut RollStream<'_>,
) -> u32 {
    let variance = rolls.range_i32(
        attacker,
        -CombatConfig::DAMAGE_VARIANCE,
        CombatConfig::DAMAGE_VARIANCE,
    );
    clamp_damage(base_attack_damage(strength) + i64::from(variance))
}

fn clamp_damage(value: i64) -> u32 {
    value.clamp(1, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedRng, PcgRng};
    use proptest::prelude::*;

    #[test]
    fn strength_ten_hits_for_thirteen_to_seventeen() {
        assert_eq!(base_attack_damage(10), 15);
        assert_eq!(attack_damage_bounds(10), (13, 17));
    }

    #[test]
    fn odd_strength_rounds_up() {
        assert_eq!(base_attack_damage(3), 5);
        assert_eq!(base_attack_damage(1), 2);
    }

    #[test]
    fn weak_attackers_still_deal_one() {
        let rng = FixedRng::MIN;
        let mut rolls = RollStream::new(&rng, 0, 0);
        assert_eq!(roll_attack_damage(1, ParticipantId::PLAYER, &mut rolls), 1);
    }

    proptest! {
        #[test]
        fn rolled_damage_within_bounds(strength in 1u32..500, seed: u64, nonce: u64) {
            let rng = PcgRng;
            let mut rolls = RollStream::new(&rng, seed, nonce);
            let damage = roll_attack_damage(strength, ParticipantId::PLAYER, &mut rolls);
            let base = base_attack_damage(strength);
            prop_assert!(damage >= 1);
            prop_assert!(i64::from(damage) >= base - 2);
            prop_assert!(i64::from(damage) <= base + 2);
        }
    }
}
