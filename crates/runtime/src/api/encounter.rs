//! Results of opening an encounter.

use game_core::{CombatId, CombatStatus, CombatView};
use serde::{Deserialize, Serialize};

/// Pointer to a stored combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRef {
    pub id: CombatId,
    pub status: CombatStatus,
    pub round: u32,
}

/// Outcome of [`CombatService::create_encounter`](crate::CombatService::create_encounter).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "combat", rename_all = "snake_case")]
pub enum Encounter {
    /// A new combat was created and started.
    Created(Box<CombatView>),
    /// The character is already fighting. Nothing was created.
    Existing(CombatRef),
}

impl Encounter {
    pub fn combat_id(&self) -> CombatId {
        match self {
            Self::Created(view) => view.id,
            Self::Existing(combat) => combat.id,
        }
    }
}
