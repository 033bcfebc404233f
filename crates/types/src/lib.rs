//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic attached, so they can be used by
//! the engine, by persistence, and by any input or rendering adapter.
//!
//! # Board Dimensions
//!
//! The classic 2048 playfield:
//!
//! - **Size**: 4 rows x 4 columns (indexed 0-3)
//! - **Cells**: 16, stored row-major
//!
//! # Tile Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `WIN_TILE` | 2048 | Merging into this value wins the game |
//! | `FOUR_CHANCE_PERCENT` | 10 | Chance that a spawned tile is a 4 instead of a 2 |
//! | `START_TILES` | 2 | Tiles placed on a fresh board |
//!
//! # Examples
//!
//! ```
//! use twenty48_types::{Direction, BOARD_SIZE, WIN_TILE};
//!
//! // Parse from a direction name or a browser key name (case-insensitive)
//! assert_eq!(Direction::from_str("left"), Some(Direction::Left));
//! assert_eq!(Direction::from_str("ArrowUp"), Some(Direction::Up));
//!
//! // Strict parsing reports invalid input
//! assert!("sideways".parse::<Direction>().is_err());
//!
//! assert_eq!(BOARD_SIZE, 4);
//! assert_eq!(WIN_TILE, 2048);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board side length in cells (4)
pub const BOARD_SIZE: usize = 4;

/// Total number of cells on the board (16)
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Tile value that wins the game when produced by a merge
pub const WIN_TILE: u32 = 2048;

/// Percent chance that a spawned tile is a 4 (otherwise a 2)
pub const FOUR_CHANCE_PERCENT: u8 = 10;

/// Number of tiles placed when a game starts
pub const START_TILES: usize = 2;

/// Value of an empty cell
pub const EMPTY: Cell = 0;

/// A cell on the board
///
/// - `0`: Empty cell
/// - any other value: a tile, always a power of two >= 2
pub type Cell = u32;

/// The four slide directions
///
/// The direction names the *near edge*: the side of the board tiles slide toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in clockwise order starting from `Up`
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts direction names and the arrow key names a hosting page relays.
    ///
    /// # Examples
    ///
    /// ```
    /// use twenty48_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("arrowright"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Some(Direction::Up),
            "right" | "arrowright" => Some(Direction::Right),
            "down" | "arrowdown" => Some(Direction::Down),
            "left" | "arrowleft" => Some(Direction::Left),
            _ => None,
        }
    }

    /// Convert from a numeric index (0=Up, 1=Right, 2=Down, 3=Left)
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }

    /// True for `Left`/`Right`, which slide along rows
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::from_str(s).ok_or_else(|| InvalidDirection(s.to_string()))
    }
}

/// Rejected direction input (a caller contract violation, not a game condition)
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid direction: {0:?}")]
pub struct InvalidDirection(pub String);
