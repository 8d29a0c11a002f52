//! RNG oracle for deterministic random number generation.
//!
//! Every roll in a combat (damage variance, reward gold, loot) is drawn from
//! an [`RngOracle`] keyed by a seed derived from the combat seed, the action
//! nonce, the rolling participant and a per-action roll counter. Replaying an
//! action with the same inputs reproduces the same outcome.

use crate::state::ParticipantId;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % span) as u32
    }

    /// Signed variant of [`RngOracle::range`].
    fn range_i32(&self, seed: u64, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        let offset = u64::from(self.next_u32(seed)) % span;
        (i64::from(min) + offset as i64) as i32
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. The oracle is stateless: each call advances the supplied
/// seed by one step and permutes it.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Oracle returning the same raw value for every seed.
///
/// Useful for pinning outcomes: with value `v`, `range(min, max)` yields
/// `min + v % (max - min + 1)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRng(pub u32);

impl FixedRng {
    /// Lowest value of every range.
    pub const MIN: Self = Self(0);
}

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Compute deterministic seed from combat state components.
///
/// # Arguments
///
/// * `combat_seed` - Seed drawn once when the encounter is created
/// * `nonce` - Action sequence number (increments each accepted action)
/// * `actor` - Participant the roll is made for
/// * `context` - Distinguishes multiple rolls within the same action
pub fn compute_seed(combat_seed: u64, nonce: u64, actor: ParticipantId, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing.
    let mut hash = combat_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor.0).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Sequence of independent rolls for one accepted action.
pub struct RollStream<'a> {
    oracle: &'a dyn RngOracle,
    combat_seed: u64,
    nonce: u64,
    context: u32,
}

impl<'a> RollStream<'a> {
    pub fn new(oracle: &'a dyn RngOracle, combat_seed: u64, nonce: u64) -> Self {
        Self {
            oracle,
            combat_seed,
            nonce,
            context: 0,
        }
    }

    fn next_seed(&mut self, actor: ParticipantId) -> u64 {
        let seed = compute_seed(self.combat_seed, self.nonce, actor, self.context);
        self.context = self.context.wrapping_add(1);
        seed
    }

    pub fn range(&mut self, actor: ParticipantId, min: u32, max: u32) -> u32 {
        let seed = self.next_seed(actor);
        self.oracle.range(seed, min, max)
    }

    pub fn range_i32(&mut self, actor: ParticipantId, min: i32, max: i32) -> i32 {
        let seed = self.next_seed(actor);
        self.oracle.range_i32(seed, min, max)
    }

    /// Succeeds with probability `percent / 100`.
    pub fn chance(&mut self, actor: ParticipantId, percent: u32) -> bool {
        let seed = self.next_seed(actor);
        self.oracle.roll_d100(seed) <= percent
    }

    /// Uniform index into a collection of `len` elements.
    pub fn index(&mut self, actor: ParticipantId, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let max = u32::try_from(len - 1).unwrap_or(u32::MAX);
        Some(self.range(actor, 0, max) as usize)
    }
}
