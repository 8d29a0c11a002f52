//! In-memory CombatRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use game_core::CombatId;

use super::{CombatRecord, CombatRepository, RepositoryError, Result};

#[derive(Default)]
struct Records {
    by_id: HashMap<CombatId, CombatRecord>,
    last_id: u64,
}

/// In-memory implementation of CombatRepository.
#[derive(Default)]
pub struct InMemoryCombatRepository {
    records: RwLock<Records>,
}

impl InMemoryCombatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .map(|records| records.by_id.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CombatRepository for InMemoryCombatRepository {
    fn allocate_id(&self) -> Result<CombatId> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.last_id += 1;
        Ok(CombatId(records.last_id))
    }

    fn create(&self, record: &CombatRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        if records.by_id.contains_key(&record.id()) {
            return Err(RepositoryError::AlreadyExists(record.id()));
        }
        if let Some(existing) = records
            .by_id
            .values()
            .find(|stored| stored.character_id == record.character_id && stored.is_open())
        {
            return Err(RepositoryError::ActiveCombatExists {
                character: record.character_id.clone(),
                existing: existing.id(),
            });
        }

        records.last_id = records.last_id.max(record.id().0);
        records.by_id.insert(record.id(), record.clone());
        Ok(())
    }

    fn load(&self, id: CombatId) -> Result<Option<CombatRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.by_id.get(&id).cloned())
    }

    fn find_active_for_character(&self, character_id: &str) -> Result<Option<CombatRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records
            .by_id
            .values()
            .find(|record| record.character_id == character_id && record.is_open())
            .cloned())
    }

    fn update(&self, record: &CombatRecord) -> Result<u64> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let stored = records
            .by_id
            .get_mut(&record.id())
            .ok_or(RepositoryError::NotFound(record.id()))?;

        if stored.version != record.version {
            return Err(RepositoryError::VersionConflict {
                id: record.id(),
                expected: record.version,
                found: stored.version,
            });
        }

        *stored = record.clone();
        stored.version += 1;
        Ok(stored.version)
    }
}
