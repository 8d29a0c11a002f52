//! File-based CombatRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use game_core::CombatId;

use super::{CombatRecord, CombatRepository, RepositoryError, Result};

/// File-based implementation of CombatRepository.
///
/// Stores each combat as `combat_{id}.json`. Writes go to a temp file that
/// is renamed over the target, so a reader never sees a half-written record.
/// A process-local mutex serializes writers for the version check.
pub struct FileCombatRepository {
    base_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCombatRepository {
    /// Create a new file-based repository rooted at `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    fn record_path(&self, id: CombatId) -> PathBuf {
        self.base_dir.join(format!("combat_{}.json", id.0))
    }

    fn read_record(&self, path: &Path) -> Result<CombatRecord> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| RepositoryError::Json(e.to_string()))
    }

    fn write_record(&self, record: &CombatRecord) -> Result<()> {
        let path = self.record_path(record.id());
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            combat = %record.id(),
            version = record.version,
            "Saved combat to {}",
            path.display()
        );
        Ok(())
    }

    /// Ids of every stored combat, ascending.
    pub fn list_ids(&self) -> Result<Vec<CombatId>> {
        self.ids_with_suffix(".json")
    }

    fn ids_with_suffix(&self, suffix: &str) -> Result<Vec<CombatId>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id_str) = filename
                    .strip_prefix("combat_")
                    .and_then(|s| s.strip_suffix(suffix))
                && let Ok(id) = id_str.parse::<u64>()
            {
                ids.push(CombatId(id));
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    fn reservation_path(&self, id: CombatId) -> PathBuf {
        self.base_dir.join(format!("combat_{}.reserved", id.0))
    }

    fn records(&self) -> Result<Vec<CombatRecord>> {
        self.list_ids()?
            .into_iter()
            .map(|id| self.read_record(&self.record_path(id)))
            .collect()
    }
}

impl CombatRepository for FileCombatRepository {
    fn allocate_id(&self) -> Result<CombatId> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let stored = self.list_ids()?.last().map_or(0, |id| id.0);
        let reserved = self.ids_with_suffix(".reserved")?.last().map_or(0, |id| id.0);
        let id = CombatId(stored.max(reserved) + 1);

        // Placeholder until the record is created.
        fs::write(self.reservation_path(id), b"")?;
        Ok(id)
    }

    fn release_id(&self, id: CombatId) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let reserved = self.reservation_path(id);
        if reserved.exists() {
            fs::remove_file(reserved)?;
        }
        Ok(())
    }

    fn create(&self, record: &CombatRecord) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        if self.record_path(record.id()).exists() {
            return Err(RepositoryError::AlreadyExists(record.id()));
        }
        if let Some(existing) = self
            .records()?
            .into_iter()
            .find(|stored| stored.character_id == record.character_id && stored.is_open())
        {
            return Err(RepositoryError::ActiveCombatExists {
                character: record.character_id.clone(),
                existing: existing.id(),
            });
        }

        self.write_record(record)?;
        let reserved = self.reservation_path(record.id());
        if reserved.exists() {
            fs::remove_file(reserved)?;
        }
        Ok(())
    }

    fn load(&self, id: CombatId) -> Result<Option<CombatRecord>> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }
        self.read_record(&path).map(Some)
    }

    fn find_active_for_character(&self, character_id: &str) -> Result<Option<CombatRecord>> {
        Ok(self
            .records()?
            .into_iter()
            .find(|record| record.character_id == character_id && record.is_open()))
    }

    fn update(&self, record: &CombatRecord) -> Result<u64> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let stored = self
            .load(record.id())?
            .ok_or(RepositoryError::NotFound(record.id()))?;
        if stored.version != record.version {
            return Err(RepositoryError::VersionConflict {
                id: record.id(),
                expected: record.version,
                found: stored.version,
            });
        }

        let mut next = record.clone();
        next.version += 1;
        self.write_record(&next)?;
        Ok(next.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_ignore_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("combat_7.json.tmp"), "x").unwrap();
        let repo = FileCombatRepository::new(dir.path()).unwrap();

        assert!(repo.list_ids().unwrap().is_empty());
        assert_eq!(repo.allocate_id().unwrap(), CombatId(1));
        assert_eq!(repo.allocate_id().unwrap(), CombatId(2));
    }

    #[test]
    fn released_ids_are_reused() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCombatRepository::new(dir.path()).unwrap();

        let id = repo.allocate_id().unwrap();
        assert!(repo.reservation_path(id).exists());

        repo.release_id(id).unwrap();
        assert!(!repo.reservation_path(id).exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(repo.allocate_id().unwrap(), id);
    }
}
