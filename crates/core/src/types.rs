use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tile coordinate. `x` grows east, `y` grows south; the origin is the
/// north-west corner where the player always spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// One step in `direction`, without any bounds clamping.
    pub fn step(self, direction: Direction) -> Pos {
        let (dx, dy) = direction.delta();
        Pos { x: self.x + dx, y: self.y + dy }
    }

    pub fn in_bounds(self, size: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < size && (self.y as usize) < size
    }

    /// Orthogonal neighbours inside a `size` x `size` board, in N, S, E, W order.
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Pos> {
        Direction::ALL
            .into_iter()
            .map(move |direction| self.step(direction))
            .filter(move |pos| pos.in_bounds(size))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Ordered by action index.
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// Index of this direction in a policy's discrete action space.
    pub fn action_index(self) -> usize {
        self as usize
    }

    pub fn from_action_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::South => "SOUTH",
            Self::East => "EAST",
            Self::West => "WEST",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    PlayerWon,
    WumpusKilled,
    #[serde(rename = "PlayerLost_Pit")]
    PlayerLostPit,
    #[serde(rename = "PlayerLost_Wumpus")]
    PlayerLostWumpus,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != Self::Ongoing
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ongoing => "Ongoing",
            Self::PlayerWon => "PlayerWon",
            Self::WumpusKilled => "WumpusKilled",
            Self::PlayerLostPit => "PlayerLost_Pit",
            Self::PlayerLostWumpus => "PlayerLost_Wumpus",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Senses {
    pub breeze: bool,
    pub stench: bool,
    pub shine: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    Move(Direction),
    Shoot(Direction),
}

impl PlayerAction {
    pub fn direction(self) -> Direction {
        match self {
            Self::Move(direction) | Self::Shoot(direction) => direction,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

/// Rejected game or session configuration. Never produced once a game exists.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board size must be at least 2, got {size}")]
    InvalidSize { size: usize },
    #[error("board size {size} exceeds the largest supported size {max}")]
    SizeTooLarge { size: usize, max: usize },
    #[error("{num_pits} pits do not fit on the board (at most {max})")]
    TooManyPits { num_pits: usize, max: usize },
    #[error("session grid size {size} is outside {min}..={max}")]
    GridOutOfRange { size: usize, min: usize, max: usize },
    #[error("position {pos:?} is off the board")]
    OutOfBounds { pos: Pos },
    #[error("more than one entity placed at {pos:?}")]
    OverlappingEntities { pos: Pos },
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A turn the session refused to resolve. The game state is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("game is already over")]
    GameOver,
    #[error("no arrows remaining")]
    NoArrows,
    #[error("unknown session {0:?}")]
    UnknownSession(SessionId),
}
