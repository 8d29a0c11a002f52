//! Match-level bookkeeping: round counter, active turn and the narrative log.

use super::{ParticipantId, RewardPayload, Turn};

/// Log lines recorded during one round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundEntry {
    pub round: u32,
    pub lines: Vec<String>,
}

/// Round log with strictly ascending round numbers.
///
/// Lines are always appended to the newest entry, so entries for round N
/// only grow while N is the current round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoundLog {
    entries: Vec<RoundEntry>,
}

impl RoundLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new entry for `round` and prunes to the newest `retention` rounds.
    ///
    /// Returns false (and changes nothing) if `round` does not follow the newest entry.
    pub fn open_round(&mut self, round: u32, retention: usize) -> bool {
        if self.last_round().is_some_and(|last| round <= last) {
            return false;
        }
        self.entries.push(RoundEntry {
            round,
            lines: Vec::new(),
        });
        self.prune(retention);
        true
    }

    /// Appends a line to the newest round. Ignored if no round is open.
    pub fn push(&mut self, line: impl Into<String>) {
        if let Some(entry) = self.entries.last_mut() {
            entry.lines.push(line.into());
        }
    }

    /// Drops the oldest entries beyond `retention`. The newest entry always stays.
    pub fn prune(&mut self, retention: usize) {
        let keep = retention.max(1);
        if self.entries.len() > keep {
            let excess = self.entries.len() - keep;
            self.entries.drain(..excess);
        }
    }

    pub fn last_round(&self) -> Option<u32> {
        self.entries.last().map(|entry| entry.round)
    }

    pub fn entries(&self) -> &[RoundEntry] {
        &self.entries
    }

    /// The newest `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> &[RoundEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    pub fn is_strictly_ascending(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].round < pair[1].round)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|entry| entry.lines.iter().map(String::as_str))
    }
}

/// Match-level state stored with every combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatMeta {
    /// Current round, starting at 1 once the combat is active.
    pub round: u32,
    pub turn: Turn,
    /// Number of accepted actions. Feeds the per-action RNG seed.
    pub nonce: u64,
    pub next_effect_id: u32,
    pub log: RoundLog,
    /// Reward ledger. Set once on player victory and never rolled again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: Option<RewardPayload>,
    /// Participant killed by a start-of-turn effect tick, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lingering_death: Option<ParticipantId>,
}

impl CombatMeta {
    pub fn new() -> Self {
        Self {
            round: 0,
            turn: Turn::Player,
            nonce: 0,
            next_effect_id: 1,
            log: RoundLog::new(),
            reward: None,
            lingering_death: None,
        }
    }

    /// Advances to the next round and opens its log entry.
    pub fn advance_round(&mut self, retention: usize) {
        self.round += 1;
        self.log.open_round(self.round, retention);
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.log.push(line);
    }
}

impl Default for CombatMeta {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_land_in_current_round() {
        let mut meta = CombatMeta::new();
        meta.advance_round(50);
        meta.log("first");
        meta.advance_round(50);
        meta.log("second");

        let entries = meta.log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].lines, vec!["first".to_string()]);
        assert_eq!(entries[1].round, 2);
        assert_eq!(entries[1].lines, vec!["second".to_string()]);
        assert_eq!(meta.log.last_round(), Some(meta.round));
    }

    #[test]
    fn rejects_non_ascending_round() {
        let mut log = RoundLog::new();
        assert!(log.open_round(3, 50));
        assert!(!log.open_round(3, 50));
        assert!(!log.open_round(2, 50));
        assert_eq!(log.entries().len(), 1);
    }

    #[test]
    fn prunes_oldest_first() {
        let mut log = RoundLog::new();
        for round in 1..=60 {
            log.open_round(round, 50);
            log.push(format!("round {round}"));
        }
        assert_eq!(log.entries().len(), 50);
        assert_eq!(log.entries()[0].round, 11);
        assert_eq!(log.last_round(), Some(60));
        assert!(log.is_strictly_ascending());
        assert_eq!(log.recent(3)[0].round, 58);
    }
}
