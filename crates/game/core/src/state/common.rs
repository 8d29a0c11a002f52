use std::fmt;

/// Unique identifier of one combat instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatId(pub u64);

impl fmt::Display for CombatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "combat-{}", self.0)
    }
}

/// Identifier of a participant, unique within one combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParticipantId(pub u32);

impl ParticipantId {
    /// Participant slot reserved for the player-controlled combatant.
    pub const PLAYER: Self = Self(1);
    /// Participant slot reserved for the AI-controlled combatant.
    pub const ENEMY: Self = Self(2);
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in zero-based tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: `max(|dx|, |dy|)`.
    pub fn chebyshev(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Renders the tile as players see it, with one-based coordinates.
    pub fn label(self) -> String {
        format!("({}, {})", self.x + 1, self.y + 1)
    }
}

/// Rectangular combat grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    pub width: u32,
    pub height: u32,
}

impl Board {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as i64) < self.width as i64
            && (position.y as i64) < self.height as i64
    }

    /// Clamps a position onto the board. Boards are at least one tile wide.
    pub fn clamp(&self, position: Position) -> Position {
        let max_x = self.width.max(1) as i32 - 1;
        let max_y = self.height.max(1) as i32 - 1;
        Position::new(position.x.clamp(0, max_x), position.y.clamp(0, max_y))
    }

    /// Converts raw request coordinates into an on-board position.
    pub fn checked_position(&self, x: i64, y: i64) -> Option<Position> {
        let x = i32::try_from(x).ok()?;
        let y = i32::try_from(y).ok()?;
        let position = Position::new(x, y);
        self.contains(position).then_some(position)
    }
}

/// Side of the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Currently acting side, or `Finished` once the combat is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Turn {
    Player,
    Enemy,
    Finished,
}

impl Turn {
    pub const fn team(self) -> Option<Team> {
        match self {
            Self::Player => Some(Team::Player),
            Self::Enemy => Some(Team::Enemy),
            Self::Finished => None,
        }
    }
}

impl From<Team> for Turn {
    fn from(team: Team) -> Self {
        match team {
            Team::Player => Self::Player,
            Team::Enemy => Self::Enemy,
        }
    }
}

/// Lifecycle of a combat: `pending -> active -> finished`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatStatus {
    Pending,
    Active,
    Finished,
}
