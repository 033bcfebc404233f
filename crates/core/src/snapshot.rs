use serde::{Deserialize, Serialize};

use crate::types::{Cell, BOARD_SIZE};

/// Coarse game phase derived from the terminal flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Over,
}

impl GameStatus {
    /// `Won` takes precedence: a won game never also reports `Over`.
    pub fn from_flags(has_won: bool, is_over: bool) -> Self {
        if has_won {
            GameStatus::Won
        } else if is_over {
            GameStatus::Over
        } else {
            GameStatus::Playing
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Outcome of a single move request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    pub moved: bool,
    pub score_gained: u32,
    pub board: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    pub score: u32,
    pub best_score: u32,
    pub has_won: bool,
    pub is_over: bool,
}

impl MoveResult {
    pub fn status(&self) -> GameStatus {
        GameStatus::from_flags(self.has_won, self.is_over)
    }
}

/// Full read-only view of the engine for rendering adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    pub score: u32,
    pub best_score: u32,
    pub has_won: bool,
    pub is_over: bool,
    pub status: GameStatus,
    pub moves: u32,
    pub max_tile: Cell,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.status.is_terminal()
    }
}
