use crate::state::{Board, Position};

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Board width in tiles.
    pub board_width: u32,
    /// Board height in tiles.
    pub board_height: u32,
    /// Lower bound of the gold reward (inclusive).
    pub gold_min: u32,
    /// Upper bound of the gold reward (inclusive).
    pub gold_max: u32,
    /// Chance (0-100) that a victory also drops one item from the loot pool.
    pub loot_chance_percent: u32,
    /// Number of most recent rounds kept in the round log.
    pub log_retention_rounds: usize,
}

impl CombatConfig {
    // ===== compile-time constants =====
    /// Chebyshev distance at which melee attacks connect.
    pub const MELEE_RANGE: u32 = 1;
    /// Maximum number of tiles adjacent to any position.
    pub const MAX_NEIGHBOURS: usize = 8;
    /// Half-width of the uniform damage variance roll.
    pub const DAMAGE_VARIANCE: i32 = 2;
    /// Floor applied to derived maximum health.
    pub const MIN_HP_MAX: i64 = 30;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOARD_SIZE: u32 = 8;
    pub const DEFAULT_GOLD_MIN: u32 = 12;
    pub const DEFAULT_GOLD_MAX: u32 = 28;
    pub const DEFAULT_LOOT_CHANCE_PERCENT: u32 = 35;
    pub const DEFAULT_LOG_RETENTION_ROUNDS: usize = 50;

    pub fn new() -> Self {
        Self {
            board_width: Self::DEFAULT_BOARD_SIZE,
            board_height: Self::DEFAULT_BOARD_SIZE,
            gold_min: Self::DEFAULT_GOLD_MIN,
            gold_max: Self::DEFAULT_GOLD_MAX,
            loot_chance_percent: Self::DEFAULT_LOOT_CHANCE_PERCENT,
            log_retention_rounds: Self::DEFAULT_LOG_RETENTION_ROUNDS,
        }
    }

    pub fn with_board(mut self, width: u32, height: u32) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    pub fn board(&self) -> Board {
        Board::new(self.board_width, self.board_height)
    }

    /// Opening tile of the player: second column, vertical middle.
    pub fn player_start(&self) -> Position {
        self.board().clamp(Position::new(1, (self.board_height / 2) as i32))
    }

    /// Opening tile of the opponent: mirrored across the board.
    pub fn enemy_start(&self) -> Position {
        self.board().clamp(Position::new(
            self.board_width as i32 - 2,
            (self.board_height / 2) as i32 - 1,
        ))
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
