//! Scripted stand-in for a human player.

use game_core::{Action, ActionRequest, CombatView, SpellId, SpellTarget};

/// Picks the player's next action from what the view offers.
///
/// Priority: heal when below `heal_below_percent`, then the strongest
/// offensive spell, then melee, then step towards the opponent, then wait.
#[derive(Clone, Copy, Debug)]
pub struct Pilot {
    pub heal_below_percent: u32,
}

impl Default for Pilot {
    fn default() -> Self {
        Self {
            heal_below_percent: 40,
        }
    }
}

impl Pilot {
    /// Returns `None` when the player cannot act in this view.
    pub fn choose(&self, view: &CombatView) -> Option<ActionRequest> {
        let actions = view.available_actions.as_ref()?;
        let me = view.player.position;
        let foe = view.enemy.position;
        let target_of = |spell: SpellId| {
            view.player
                .spells
                .iter()
                .find(|known| known.id == spell)
                .map(|known| (known.target, known.damage))
        };

        let hurt = view.player.hp * 100 < view.player.hp_max * self.heal_below_percent;
        if hurt
            && let Some(heal) = actions.spells.iter().find(|option| {
                matches!(
                    target_of(option.spell),
                    Some((SpellTarget::Ally | SpellTarget::SelfOnly, _))
                ) && option.targets.contains(&me)
            })
        {
            return Some(
                Action::Spell {
                    spell: heal.spell,
                    target: me,
                }
                .into(),
            );
        }

        let strongest = actions
            .spells
            .iter()
            .filter(|option| option.targets.contains(&foe))
            .filter_map(|option| match target_of(option.spell) {
                Some((SpellTarget::Enemy, damage)) => Some((option.spell, damage)),
                _ => None,
            })
            .max_by_key(|(_, damage)| *damage);
        if let Some((spell, _)) = strongest {
            return Some(Action::Spell { spell, target: foe }.into());
        }

        if actions.attack.is_some() {
            return Some(ActionRequest::Attack);
        }

        let closer = actions
            .moves
            .iter()
            .copied()
            .filter(|tile| tile.chebyshev(foe) < me.chebyshev(foe))
            .min_by_key(|tile| tile.chebyshev(foe));
        Some(match closer {
            Some(to) => Action::Move { to }.into(),
            None => ActionRequest::Wait,
        })
    }
}
