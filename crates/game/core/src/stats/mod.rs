//! Stat derivation.
//!
//! Converts raw attribute values and a level into the combat [`StatBlock`].
//! The derivation is a pure function: identical inputs always produce the
//! same block.
//!
//! ```text
//! primary  = max(1, round(base))
//! hp_max   = max(30, round(base_health + str * 4))
//! mana_max = max(0, round(base_mana + int * 2))
//! ```
//!
//! `speed` falls back to the agility value when no speed attribute exists.

pub mod attributes;

pub use attributes::{AttributeKind, RawAttributes};

use crate::config::CombatConfig;

/// Combat stats of one participant, fixed at encounter start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub level: u32,
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
    pub speed: u32,
    pub hp_max: u32,
    pub mana_max: u32,
}

impl StatBlock {
    /// Derives the stat block from raw attributes.
    pub fn derive(attributes: &RawAttributes, level: u32) -> Self {
        let base = |kind| attributes.get(kind).unwrap_or(0.0);

        let strength = primary(base(AttributeKind::Strength));
        let agility = primary(base(AttributeKind::Agility));
        let intelligence = primary(base(AttributeKind::Intelligence));
        let speed = match attributes.get(AttributeKind::Speed) {
            Some(value) => primary(value),
            None => agility,
        };

        let hp_max = (base(AttributeKind::Health) + f64::from(strength) * 4.0)
            .round()
            .max(CombatConfig::MIN_HP_MAX as f64);
        let mana_max = (base(AttributeKind::Mana) + f64::from(intelligence) * 2.0)
            .round()
            .max(0.0);

        Self {
            level,
            strength,
            agility,
            intelligence,
            speed,
            // `as` saturates on overflow.
            hp_max: hp_max as u32,
            mana_max: mana_max as u32,
        }
    }
}

fn primary(base: f64) -> u32 {
    base.round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_documented_formulas() {
        let attributes = RawAttributes::new()
            .with("strength", 10.0)
            .with("agility", 6.4)
            .with("intelligence", 4.5)
            .with("health", 50.0)
            .with("mana", 5.0);

        let stats = StatBlock::derive(&attributes, 3);

        assert_eq!(stats.level, 3);
        assert_eq!(stats.strength, 10);
        assert_eq!(stats.agility, 6);
        assert_eq!(stats.intelligence, 5);
        assert_eq!(stats.speed, 6, "speed falls back to agility");
        assert_eq!(stats.hp_max, 90);
        assert_eq!(stats.mana_max, 15);
    }

    #[test]
    fn empty_attributes_clamp_to_floors() {
        let stats = StatBlock::derive(&RawAttributes::new(), 1);
        assert_eq!(stats.strength, 1);
        assert_eq!(stats.agility, 1);
        assert_eq!(stats.intelligence, 1);
        assert_eq!(stats.speed, 1);
        assert_eq!(stats.hp_max, 30);
        assert_eq!(stats.mana_max, 2);
    }

    #[test]
    fn negative_bases_clamp() {
        let attributes = RawAttributes::new()
            .with("str", -4.0)
            .with("hp", -500.0)
            .with("mp", -100.0)
            .with("spd", 0.2);
        let stats = StatBlock::derive(&attributes, 1);
        assert_eq!(stats.strength, 1);
        assert_eq!(stats.speed, 1);
        assert_eq!(stats.hp_max, 30);
        assert_eq!(stats.mana_max, 0);
    }

    #[test]
    fn derivation_is_deterministic() {
        let attributes = RawAttributes::new().with("Str", 12.0).with("Speed", 9.0);
        assert_eq!(
            StatBlock::derive(&attributes, 2),
            StatBlock::derive(&attributes, 2)
        );
    }
}
