//! Combat resolution formulas.
//!
//! Pure functions for damage values. Applying them to participants is the
//! resolver's job.
//!
//! - `base_attack_damage`: `ceil(1.5 * STR)`
//! - `roll_attack_damage`: base plus a uniform variance roll, never below 1

pub mod damage;

pub use damage::{attack_damage_bounds, base_attack_damage, roll_attack_damage};
