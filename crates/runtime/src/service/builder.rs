use std::sync::Arc;

use game_content::ContentBundle;
use game_core::{ChasePolicy, CombatPolicy, PcgRng};

use super::{CombatService, KeyedLocks};
use crate::api::{Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::oracle::{
    CharacterOracle, ContentCharacterOracle, ContentLootTable, ContentMonsterCatalog, LootTable,
    MonsterCatalog,
};
use crate::repository::{CombatRepository, FileCombatRepository, InMemoryCombatRepository};
use crate::rewards::RewardSink;

/// Builder for [`CombatService`].
///
/// Character, monster and loot sources plus a reward sink are required. The
/// repository defaults to files under `store_dir` when configured, otherwise
/// memory. The opponent policy defaults to [`ChasePolicy`].
pub struct CombatServiceBuilder {
    config: RuntimeConfig,
    repository: Option<Arc<dyn CombatRepository>>,
    characters: Option<Arc<dyn CharacterOracle>>,
    monsters: Option<Arc<dyn MonsterCatalog>>,
    loot: Option<Arc<dyn LootTable>>,
    rewards: Option<Arc<dyn RewardSink>>,
    policy: Option<Arc<dyn CombatPolicy>>,
}

impl CombatServiceBuilder {
    pub(super) fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            repository: None,
            characters: None,
            monsters: None,
            loot: None,
            rewards: None,
            policy: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn repository(mut self, repository: Arc<dyn CombatRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn characters(mut self, characters: impl CharacterOracle + 'static) -> Self {
        self.characters = Some(Arc::new(characters));
        self
    }

    pub fn monsters(mut self, monsters: impl MonsterCatalog + 'static) -> Self {
        self.monsters = Some(Arc::new(monsters));
        self
    }

    pub fn loot(mut self, loot: impl LootTable + 'static) -> Self {
        self.loot = Some(Arc::new(loot));
        self
    }

    pub fn rewards(mut self, rewards: Arc<dyn RewardSink>) -> Self {
        self.rewards = Some(rewards);
        self
    }

    pub fn policy(mut self, policy: impl CombatPolicy + 'static) -> Self {
        self.policy = Some(Arc::new(policy));
        self
    }

    /// Sets character, monster and loot sources from loaded content.
    pub fn content(self, bundle: &ContentBundle) -> Self {
        self.characters(ContentCharacterOracle::new(
            &bundle.characters,
            &bundle.spells,
        ))
        .monsters(ContentMonsterCatalog::new(&bundle.monsters, &bundle.spells))
        .loot(ContentLootTable::new(bundle.loot.clone()))
    }

    pub fn build(self) -> Result<CombatService> {
        let repository = match (self.repository, &self.config.store_dir) {
            (Some(repository), _) => repository,
            (None, Some(dir)) => Arc::new(FileCombatRepository::new(dir)?),
            (None, None) => Arc::new(InMemoryCombatRepository::new()),
        };

        Ok(CombatService {
            repository,
            characters: self
                .characters
                .ok_or(RuntimeError::MissingCollaborator("a character oracle"))?,
            monsters: self
                .monsters
                .ok_or(RuntimeError::MissingCollaborator("a monster catalog"))?,
            loot: self
                .loot
                .ok_or(RuntimeError::MissingCollaborator("a loot table"))?,
            rewards: self
                .rewards
                .ok_or(RuntimeError::MissingCollaborator("a reward sink"))?,
            policy: self.policy.unwrap_or_else(|| Arc::new(ChasePolicy)),
            config: Arc::new(self.config),
            rng: PcgRng,
            combat_locks: KeyedLocks::default(),
            character_locks: KeyedLocks::default(),
        })
    }
}
