//! Action domain.
//!
//! - [`ActionRequest`]: wire form submitted by clients, raw coordinates
//! - [`Action`]: validated, board-checked form consumed by the engine
//! - [`AvailableActions`]: legal actions for one side, derived fresh from state
//! - [`resolve`]: applies an already validated action
//!
//! Legality is a pure query over the current state. The same checks back both
//! the advertised action set and the validation of submitted actions, so the
//! two cannot diverge.

mod available;
mod error;
mod resolve;

pub use available::{AvailableActions, SpellOption, available_actions, move_targets, validate};
pub use error::ActionError;
pub use resolve::resolve;

use crate::env::SpellId;
use crate::state::{Board, Position};

/// Kind of action a participant may be allowed to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    Move,
    Attack,
    Spell,
    Wait,
}

impl ActionKind {
    /// Full action set of player-controlled combatants.
    pub const ALL: [Self; 4] = [Self::Move, Self::Attack, Self::Spell, Self::Wait];
    /// Action set of AI opponents.
    pub const MELEE: [Self; 3] = [Self::Move, Self::Attack, Self::Wait];
}

/// Board-checked action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Action {
    Move { to: Position },
    /// Melee attack on the opponent.
    Attack,
    Spell { spell: SpellId, target: Position },
    Wait,
}

impl Action {
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Move { .. } => ActionKind::Move,
            Self::Attack => ActionKind::Attack,
            Self::Spell { .. } => ActionKind::Spell,
            Self::Wait => ActionKind::Wait,
        }
    }
}

/// Raw tile coordinates as submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileRequest {
    pub x: i64,
    pub y: i64,
}

/// Action as submitted by a client.
///
/// `{"type":"move","x":3,"y":4}`, `{"type":"attack"}`,
/// `{"type":"spell","spell_id":1,"target":{"x":6,"y":3}}`, `{"type":"wait"}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ActionRequest {
    Move {
        x: i64,
        y: i64,
    },
    Attack,
    Spell {
        spell_id: SpellId,
        target: TileRequest,
    },
    Wait,
}

impl ActionRequest {
    /// Converts raw coordinates into on-board positions.
    pub fn into_action(self, board: &Board) -> Result<Action, ActionError> {
        let tile = |x: i64, y: i64| {
            board
                .checked_position(x, y)
                .ok_or(ActionError::OutOfBounds { x, y })
        };
        Ok(match self {
            Self::Move { x, y } => Action::Move { to: tile(x, y)? },
            Self::Attack => Action::Attack,
            Self::Spell { spell_id, target } => Action::Spell {
                spell: spell_id,
                target: tile(target.x, target.y)?,
            },
            Self::Wait => Action::Wait,
        })
    }
}

impl From<Action> for ActionRequest {
    fn from(action: Action) -> Self {
        match action {
            Action::Move { to } => Self::Move {
                x: i64::from(to.x),
                y: i64::from(to.y),
            },
            Action::Attack => Self::Attack,
            Action::Spell { spell, target } => Self::Spell {
                spell_id: spell,
                target: TileRequest {
                    x: i64::from(target.x),
                    y: i64::from(target.y),
                },
            },
            Action::Wait => Self::Wait,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_coordinates_are_board_checked() {
        let board = Board::new(8, 8);
        assert_eq!(
            ActionRequest::Move { x: 3, y: 4 }.into_action(&board),
            Ok(Action::Move {
                to: Position::new(3, 4)
            })
        );
        assert_eq!(
            ActionRequest::Move { x: 8, y: 4 }.into_action(&board),
            Err(ActionError::OutOfBounds { x: 8, y: 4 })
        );
        assert_eq!(
            ActionRequest::Spell {
                spell_id: SpellId(1),
                target: TileRequest { x: -1, y: 0 },
            }
            .into_action(&board),
            Err(ActionError::OutOfBounds { x: -1, y: 0 })
        );
        assert_eq!(ActionRequest::Wait.into_action(&board), Ok(Action::Wait));
    }
}
