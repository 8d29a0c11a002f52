//! Repository contract for persisting combats.

use game_core::{CombatId, CombatState, CombatStatus};
use serde::{Deserialize, Serialize};

use super::Result;

/// Persisted form of one combat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatRecord {
    pub state: CombatState,
    /// Principal that owns the player character.
    pub owner: String,
    pub character_id: String,
    /// Incremented on every successful update.
    pub version: u64,
}

impl CombatRecord {
    pub fn new(state: CombatState, owner: impl Into<String>, character_id: impl Into<String>) -> Self {
        Self {
            state,
            owner: owner.into(),
            character_id: character_id.into(),
            version: 0,
        }
    }

    pub fn id(&self) -> CombatId {
        self.state.id
    }

    /// True while the combat can still accept actions.
    pub fn is_open(&self) -> bool {
        self.state.status != CombatStatus::Finished
    }
}

/// Storage for combat records.
///
/// Implementations must make [`update`](Self::update) a compare-and-swap on
/// the record version so concurrent writers cannot both commit.
pub trait CombatRepository: Send + Sync {
    /// Reserves a fresh combat id.
    fn allocate_id(&self) -> Result<CombatId>;

    /// Gives back an id from [`allocate_id`](Self::allocate_id) that never
    /// reached [`create`](Self::create).
    fn release_id(&self, _id: CombatId) -> Result<()> {
        Ok(())
    }

    /// Stores a new record. Fails if the id is taken or the character is
    /// already in an open combat.
    fn create(&self, record: &CombatRecord) -> Result<()>;

    fn load(&self, id: CombatId) -> Result<Option<CombatRecord>>;

    /// Open combat of a character, if any.
    fn find_active_for_character(&self, character_id: &str) -> Result<Option<CombatRecord>>;

    /// Replaces the stored record if its version still equals
    /// `record.version`. Returns the new version.
    fn update(&self, record: &CombatRecord) -> Result<u64>;
}
