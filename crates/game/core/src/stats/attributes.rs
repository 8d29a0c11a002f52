//! Raw attribute input.
//!
//! Character sources name their attributes inconsistently (`STR`, `Strength`,
//! `dex`, `max_hp`...). Lookups here are case-insensitive and ignore
//! whitespace, underscores and dashes, then try a fixed list of aliases per
//! stat.

use std::collections::BTreeMap;

/// Attribute values keyed by their normalized name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")
)]
pub struct RawAttributes {
    values: BTreeMap<String, f64>,
}

/// Primary stats understood by the deriver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Strength,
    Agility,
    Intelligence,
    Speed,
    Health,
    Mana,
}

impl AttributeKind {
    /// Accepted names, most specific first.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Strength => &["strength", "str"],
            Self::Agility => &["agility", "agi", "dexterity", "dex"],
            Self::Intelligence => &["intelligence", "int"],
            Self::Speed => &["speed", "spd"],
            Self::Health => &["health", "hp"],
            Self::Mana => &["mana", "mp"],
        }
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl RawAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, replacing any value stored under the same normalized name.
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(normalize(name), value);
    }

    /// Looks up a stat through its aliases. Non-finite values are ignored.
    pub fn get(&self, kind: AttributeKind) -> Option<f64> {
        kind.aliases()
            .iter()
            .filter_map(|alias| self.values.get(*alias))
            .copied()
            .find(|value| value.is_finite())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, f64>> for RawAttributes {
    fn from(values: BTreeMap<String, f64>) -> Self {
        values
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect()
    }
}

impl From<RawAttributes> for BTreeMap<String, f64> {
    fn from(attributes: RawAttributes) -> Self {
        attributes.values
    }
}

impl<'a> FromIterator<(&'a str, f64)> for RawAttributes {
    fn from_iter<T: IntoIterator<Item = (&'a str, f64)>>(iter: T) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_separators() {
        let attributes = RawAttributes::new()
            .with("STR", 7.0)
            .with("Dexterity", 4.0)
            .with("Max_ Mana", 2.0)
            .with(" mp ", 9.0);

        assert_eq!(attributes.get(AttributeKind::Strength), Some(7.0));
        assert_eq!(attributes.get(AttributeKind::Agility), Some(4.0));
        assert_eq!(attributes.get(AttributeKind::Mana), Some(9.0));
        assert_eq!(attributes.get(AttributeKind::Speed), None);
    }

    #[test]
    fn full_name_wins_over_abbreviation() {
        let attributes: RawAttributes = [("int", 3.0), ("Intelligence", 11.0)]
            .into_iter()
            .collect();
        assert_eq!(attributes.get(AttributeKind::Intelligence), Some(11.0));
    }

    #[test]
    fn nan_falls_through_to_next_alias() {
        let attributes = RawAttributes::new()
            .with("agility", f64::NAN)
            .with("dex", 5.0);
        assert_eq!(attributes.get(AttributeKind::Agility), Some(5.0));
    }
}
