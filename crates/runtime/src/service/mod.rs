//! Combat service: the request-level API around the engine.
//!
//! Each call rebuilds the combat from the repository, runs the engine, and
//! persists the whole record in one versioned update:
//!
//! ```text
//! lock(combat) ─► load ─► check owner ─► engine.submit ─► repo.update ─► deliver reward
//!                                              │
//!                                              └── rejected: nothing stored
//! ```
//!
//! Writes to one combat are serialized with a per-id async lock. The version
//! check in the repository catches writers outside this process.
mod builder;
mod locks;

pub use builder::CombatServiceBuilder;

use std::sync::Arc;

use game_core::env::RollStream;
use game_core::{
    ActionRequest, CombatEngine, CombatEnv, CombatId, CombatPolicy, CombatState, CombatView,
    CombatantSpec, EngineError, GameError, ParticipantId, PcgRng, TransitionPhase,
};
use tracing::{debug, error, info, warn};

use crate::api::{CombatRef, Encounter, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::oracle::{CharacterOracle, CharacterSheet, LootTable, MonsterCatalog};
use crate::repository::{CombatRecord, CombatRepository};
use crate::rewards::{RewardGrant, RewardSink};
use locks::KeyedLocks;

/// Entry point for creating, reading and playing combats.
///
/// Cheap to clone; clones share repositories, collaborators and locks.
#[derive(Clone)]
pub struct CombatService {
    config: Arc<RuntimeConfig>,
    repository: Arc<dyn CombatRepository>,
    characters: Arc<dyn CharacterOracle>,
    monsters: Arc<dyn MonsterCatalog>,
    loot: Arc<dyn LootTable>,
    rewards: Arc<dyn RewardSink>,
    policy: Arc<dyn CombatPolicy>,
    rng: PcgRng,
    combat_locks: KeyedLocks<CombatId>,
    character_locks: KeyedLocks<String>,
}

impl CombatService {
    pub fn builder() -> CombatServiceBuilder {
        CombatServiceBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Opens a duel for `character_id`, or points at the one already running.
    pub async fn create_encounter(&self, principal: &str, character_id: &str) -> Result<Encounter> {
        let sheet = self
            .characters
            .character(character_id)
            .filter(|sheet| sheet.owner == principal)
            .ok_or_else(|| RuntimeError::CharacterNotFound(character_id.to_string()))?;

        let _guard = self.character_locks.lock(&sheet.id).await;

        if let Some(existing) = self.repository.find_active_for_character(&sheet.id)? {
            info!(
                combat = %existing.id(),
                character = %sheet.id,
                "Character already in combat"
            );
            return Ok(Encounter::Existing(CombatRef {
                id: existing.id(),
                status: existing.state.status,
                round: existing.state.meta.round,
            }));
        }

        let seed = self.config.fixed_seed.unwrap_or_else(rand::random);
        let opponent = {
            let mut candidates = self.monsters.candidates(sheet.level);
            // Nonce 0 is never used by an action.
            let mut rolls = RollStream::new(&self.rng, seed, 0);
            let pick = rolls
                .index(ParticipantId::ENEMY, candidates.len())
                .ok_or(RuntimeError::NoOpponent { level: sheet.level })?;
            candidates.swap_remove(pick)
        };

        let id = self.repository.allocate_id()?;
        let record = match self.open_record(id, seed, principal, &sheet, opponent) {
            Ok(record) => record,
            Err(error) => {
                if let Err(release) = self.repository.release_id(id) {
                    warn!(combat = %id, error = %release, "Failed to release combat id");
                }
                return Err(error);
            }
        };

        info!(
            combat = %id,
            character = %sheet.id,
            opponent = %record.state.enemy.name,
            seed,
            "Encounter created"
        );
        Ok(Encounter::Created(Box::new(self.view(&record.state))))
    }

    /// Seats both sides, starts the combat and stores it under `id`.
    fn open_record(
        &self,
        id: CombatId,
        seed: u64,
        principal: &str,
        sheet: &CharacterSheet,
        opponent: CombatantSpec,
    ) -> Result<CombatRecord> {
        let mut state = CombatState::new(
            id,
            seed,
            &self.config.combat,
            sheet.to_combatant(),
            opponent,
        );
        CombatEngine::new(&mut state)
            .start(&self.config.combat)
            .inspect_err(|error| self.report(id, error))?;

        let record = CombatRecord::new(state, principal, sheet.id.as_str());
        self.repository.create(&record)?;
        Ok(record)
    }

    /// Current view of a combat owned by `principal`. Never mutates.
    ///
    /// A stored combat that breaks its invariants is an error, not a view.
    pub async fn get_combat(&self, combat_id: CombatId, principal: &str) -> Result<CombatView> {
        let record = self.load_checked(combat_id, principal)?;
        Ok(self.view(&record.state))
    }

    /// Validates and resolves one player action plus everything it triggers.
    ///
    /// Rejected actions leave the stored combat untouched. A reward that
    /// cannot be delivered right away stays pending on the result and is
    /// picked up by [`reconcile_reward`](Self::reconcile_reward).
    pub async fn submit_action(
        &self,
        combat_id: CombatId,
        principal: &str,
        request: ActionRequest,
    ) -> Result<CombatView> {
        let _guard = self.combat_locks.lock(&combat_id).await;
        let mut record = self.load_owned(combat_id, principal)?;

        let outcome = {
            let action = request
                .into_action(&record.state.board)
                .map_err(EngineError::from)
                .inspect_err(|error| self.report(combat_id, error))?;

            let rarity = record
                .state
                .enemy
                .flavor
                .as_ref()
                .map(|flavor| flavor.rarity.as_str());
            let loot = self.loot.eligible(rarity);
            let env = CombatEnv::new(&self.config.combat, &self.rng, self.policy.as_ref(), &loot);

            CombatEngine::new(&mut record.state)
                .submit(&env, action)
                .inspect_err(|error| self.report(combat_id, error))?
        };

        record.version = self.repository.update(&record)?;

        debug!(
            combat = %combat_id,
            round = outcome.round,
            player_action = ?outcome.player_action,
            enemy_action = ?outcome.enemy_action,
            "Exchange resolved"
        );

        if let Some(winner) = outcome.winner {
            info!(combat = %combat_id, %winner, rounds = outcome.round, "Combat finished");
        }
        if outcome.reward.is_some()
            && let Err(error) = self.deliver_reward(&mut record).await
        {
            warn!(
                combat = %combat_id,
                code = error.error_code(),
                %error,
                "Reward delivery failed, left pending"
            );
        }

        Ok(self.view(&record.state))
    }

    /// Retries delivery of a granted but undelivered reward.
    ///
    /// Delivers nothing when the reward already arrived or none was granted.
    pub async fn reconcile_reward(&self, combat_id: CombatId, principal: &str) -> Result<CombatView> {
        let _guard = self.combat_locks.lock(&combat_id).await;
        let mut record = self.load_checked(combat_id, principal)?;

        if !self.deliver_reward(&mut record).await? {
            debug!(combat = %combat_id, "No pending reward");
        }

        Ok(self.view(&record.state))
    }

    /// Sends the pending reward and records the delivery.
    ///
    /// Returns false when nothing was pending.
    async fn deliver_reward(&self, record: &mut CombatRecord) -> Result<bool> {
        let Some(payload) = record
            .state
            .result
            .as_ref()
            .filter(|result| result.reward_pending())
            .and_then(|result| result.reward.clone())
        else {
            return Ok(false);
        };

        let grant = RewardGrant {
            combat_id: record.id(),
            character_id: record.character_id.clone(),
            owner: record.owner.clone(),
            payload,
        };
        self.rewards
            .deliver(&grant)
            .await
            .map_err(|source| RuntimeError::RewardDelivery {
                combat_id: grant.combat_id,
                source,
            })?;

        CombatEngine::new(&mut record.state).mark_reward_delivered();
        record.version = self.repository.update(record)?;

        info!(
            combat = %grant.combat_id,
            character = %grant.character_id,
            gold = grant.payload.gold,
            item = ?grant.payload.item.as_ref().map(|item| item.id.as_str()),
            "Reward delivered"
        );
        Ok(true)
    }

    /// Loads a combat, hiding combats of other principals as not found.
    fn load_owned(&self, combat_id: CombatId, principal: &str) -> Result<CombatRecord> {
        self.repository
            .load(combat_id)?
            .filter(|record| record.owner == principal)
            .ok_or(RuntimeError::CombatNotFound(combat_id))
    }

    /// Like [`load_owned`](Self::load_owned), but rejects corrupt combats.
    fn load_checked(&self, combat_id: CombatId, principal: &str) -> Result<CombatRecord> {
        let record = self.load_owned(combat_id, principal)?;
        record
            .state
            .check_invariants()
            .map_err(|error| EngineError::invariant(TransitionPhase::PreValidate, error))
            .inspect_err(|error| self.report(combat_id, error))?;
        Ok(record)
    }

    fn view(&self, state: &CombatState) -> CombatView {
        CombatView::for_player(state, &self.config.combat)
    }

    fn report(&self, combat_id: CombatId, error: &EngineError) {
        if error.kind().is_internal() {
            error!(
                combat = %combat_id,
                code = error.error_code(),
                %error,
                "Combat invariant violated"
            );
        } else {
            warn!(
                combat = %combat_id,
                code = error.error_code(),
                %error,
                "Action rejected"
            );
        }
    }
}
