//! In-memory reward sink for tests and local runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use game_core::CombatId;
use tokio::sync::Mutex;

use super::{RewardError, RewardGrant, RewardSink};

/// Records deliveries in memory. Can be told to fail a number of calls.
#[derive(Default)]
pub struct InMemoryRewardSink {
    delivered: Mutex<HashMap<CombatId, RewardGrant>>,
    failures_left: AtomicU32,
    calls: AtomicU32,
}

impl InMemoryRewardSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink whose first `count` deliveries fail as unavailable.
    pub fn failing(count: u32) -> Self {
        Self {
            failures_left: AtomicU32::new(count),
            ..Self::default()
        }
    }

    pub async fn delivered(&self, combat_id: CombatId) -> Option<RewardGrant> {
        self.delivered.lock().await.get(&combat_id).cloned()
    }

    pub async fn delivery_count(&self) -> usize {
        self.delivered.lock().await.len()
    }

    /// Gold credited to a character across all combats.
    pub async fn gold_for(&self, character_id: &str) -> u32 {
        self.delivered
            .lock()
            .await
            .values()
            .filter(|grant| grant.character_id == character_id)
            .map(|grant| grant.payload.gold)
            .sum()
    }

    /// Number of delivery attempts, including failed and repeated ones.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RewardSink for InMemoryRewardSink {
    async fn deliver(&self, grant: &RewardGrant) -> Result<(), RewardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(RewardError::Unavailable("simulated outage".into()));
        }

        let mut delivered = self.delivered.lock().await;
        match delivered.get(&grant.combat_id) {
            Some(existing) if existing.payload != grant.payload => Err(RewardError::Rejected {
                combat_id: grant.combat_id,
                reason: "different payload already delivered".into(),
            }),
            Some(_) => Ok(()),
            None => {
                delivered.insert(grant.combat_id, grant.clone());
                Ok(())
            }
        }
    }
}
