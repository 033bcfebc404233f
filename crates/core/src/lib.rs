//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the 2048 rules and state management. It has no
//! dependencies on rendering, input devices, or page embedding, making it:
//!
//! - **Deterministic**: Same tile source seed produces identical games
//! - **Testable**: Randomness and persistence are injected
//! - **Portable**: Any adapter (terminal, browser bridge, headless runner) drives it
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 grid with single-pass slide/merge and move detection
//! - [`game_state`]: [`GameEngine`] state machine (score, best score, win/over flags)
//! - [`rng`]: Injectable tile randomness and a seeded LCG
//! - [`snapshot`]: Read-only views handed to rendering adapters
//! - [`store`]: Best-score persistence
//! - [`config`]: Win tile and spawn odds
//!
//! # Game Rules
//!
//! - A move slides all tiles toward one edge; equal neighbours merge once per move
//! - Each merge adds the merged value to the score
//! - A move that changed the board spawns a 2 (90%) or a 4 (10%) in a random empty cell
//! - Producing the 2048 tile wins and ends play; a full board with no equal
//!   neighbours ends the game
//!
//! # Example
//!
//! ```
//! use twenty48_core::{EngineConfig, GameEngine, MemoryStore, SimpleRng};
//! use twenty48_core::types::Direction;
//!
//! let mut game = GameEngine::new(EngineConfig::default(), SimpleRng::new(12345), MemoryStore::default());
//! assert_eq!(game.board().tile_count(), 2);
//!
//! let result = game.move_tiles(Direction::Left);
//! assert!(result.score >= result.score_gained);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod rng;
pub mod snapshot;
pub mod store;

pub use twenty48_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, SlideOutcome};
pub use config::EngineConfig;
pub use error::{EngineError, StoreError};
pub use game_state::GameEngine;
pub use rng::{RandTiles, SimpleRng, TileSource};
pub use snapshot::{GameSnapshot, GameStatus, MoveResult};
pub use store::{BestScoreStore, JsonFileStore, MemoryStore};
