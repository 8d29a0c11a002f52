use game_content::{MonsterTemplate, SpellBook};
use game_core::CombatantSpec;

/// Opponent templates an encounter may draw from.
pub trait MonsterCatalog: Send + Sync {
    /// Opponents suited to a character of `level`, in a stable order.
    fn candidates(&self, level: u32) -> Vec<CombatantSpec>;
}

/// Monster catalog backed by loaded templates.
pub struct ContentMonsterCatalog {
    monsters: Vec<CombatantSpec>,
    levels: Vec<u32>,
}

impl ContentMonsterCatalog {
    /// Highest level above the character's that still counts as a fair fight.
    pub const LEVEL_HEADROOM: u32 = 2;

    pub fn new(templates: &[MonsterTemplate], spells: &SpellBook) -> Self {
        Self {
            monsters: templates
                .iter()
                .map(|template| template.to_combatant(spells))
                .collect(),
            levels: templates.iter().map(|template| template.level).collect(),
        }
    }
}

impl MonsterCatalog for ContentMonsterCatalog {
    /// Monsters at most [`Self::LEVEL_HEADROOM`] levels above `level`. Falls
    /// back to the whole catalog when none qualify.
    fn candidates(&self, level: u32) -> Vec<CombatantSpec> {
        let ceiling = level.saturating_add(Self::LEVEL_HEADROOM);
        let fair: Vec<CombatantSpec> = self
            .monsters
            .iter()
            .zip(&self.levels)
            .filter(|(_, monster_level)| **monster_level <= ceiling)
            .map(|(monster, _)| monster.clone())
            .collect();

        if fair.is_empty() {
            self.monsters.clone()
        } else {
            fair
        }
    }
}

#[cfg(test)]
mod tests {
    use game_content::Rarity;
    use game_core::RawAttributes;

    use super::*;

    fn template(id: &str, level: u32) -> MonsterTemplate {
        MonsterTemplate {
            id: id.into(),
            name: id.to_uppercase(),
            race: "beast".into(),
            rarity: Rarity::Common,
            description: String::new(),
            level,
            attributes: RawAttributes::new().with("str", 3.0),
            spells: Vec::new(),
        }
    }

    #[test]
    fn candidates_respect_level_headroom() {
        let catalog = ContentMonsterCatalog::new(
            &[template("rat", 1), template("wolf", 3), template("troll", 9)],
            &SpellBook::default(),
        );

        let names: Vec<String> = catalog
            .candidates(1)
            .into_iter()
            .map(|spec| spec.source_id)
            .collect();
        assert_eq!(names, ["rat", "wolf"]);
    }

    #[test]
    fn falls_back_to_everything() {
        let catalog =
            ContentMonsterCatalog::new(&[template("troll", 9)], &SpellBook::default());
        assert_eq!(catalog.candidates(1).len(), 1);
    }
}
