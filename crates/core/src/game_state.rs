//! Game state module - the 2048 engine
//!
//! [`GameEngine`] owns the board, the running score, the persisted best score and
//! the terminal flags. It is mutated only through [`GameEngine::reset`],
//! [`GameEngine::move_tiles`] and [`GameEngine::check_game_over`] (which can only
//! set the over flag); everything else is a read-only view.
//!
//! Randomness (tile spawns) and persistence (best score) are injected, so a game
//! driven by a seeded [`TileSource`] is fully deterministic.

use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::rng::TileSource;
use crate::snapshot::{GameSnapshot, GameStatus, MoveResult};
use crate::store::BestScoreStore;
use crate::types::{Direction, START_TILES};
use crate::Board;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine<T, S> {
    board: Board,
    score: u32,
    best_score: u32,
    has_won: bool,
    is_over: bool,
    /// Held while a move's merge/spawn/game-over effects are applied.
    locked: bool,
    /// Moves that changed the board since the last reset.
    moves: u32,
    config: EngineConfig,
    tiles: T,
    store: S,
}

impl<T: TileSource, S: BestScoreStore> GameEngine<T, S> {
    /// Create an engine, restore the best score and start a fresh game
    pub fn new(config: EngineConfig, tiles: T, store: S) -> Self {
        let best_score = match store.load() {
            Ok(best) => best,
            Err(e) => {
                warn!("could not load best score, starting from 0: {}", e);
                0
            }
        };

        let mut engine = Self {
            board: Board::new(),
            score: 0,
            best_score,
            has_won: false,
            is_over: false,
            locked: false,
            moves: 0,
            config,
            tiles,
            store,
        };
        engine.reset();
        engine
    }

    /// Discard the current game and start a new one with two random tiles
    ///
    /// The best score survives resets.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.has_won = false;
        self.is_over = false;
        self.locked = false;
        self.moves = 0;

        for _ in 0..START_TILES {
            self.spawn_random_tile();
        }
        debug!("new game started, best score {}", self.best_score);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::from_flags(self.has_won, self.is_over)
    }

    /// Whether `move_tiles(direction)` would be accepted and change the board
    pub fn can_move(&self, direction: Direction) -> bool {
        self.accepts_moves() && self.board.slide(direction).board != self.board
    }

    fn accepts_moves(&self) -> bool {
        !self.locked && !self.is_over && !self.has_won
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.rows(),
            score: self.score,
            best_score: self.best_score,
            has_won: self.has_won,
            is_over: self.is_over,
            status: self.status(),
            moves: self.moves,
            max_tile: self.board.max_tile(),
        }
    }

    fn result(&self, moved: bool, score_gained: u32) -> MoveResult {
        MoveResult {
            moved,
            score_gained,
            board: self.board.rows(),
            score: self.score,
            best_score: self.best_score,
            has_won: self.has_won,
            is_over: self.is_over,
        }
    }

    /// Slide every line toward `direction`, merge, then spawn if anything changed
    ///
    /// A no-op (`moved == false`) while locked, after a win, or after game over.
    /// A move that changes nothing leaves board, score and flags untouched.
    pub fn move_tiles(&mut self, direction: Direction) -> MoveResult {
        if !self.accepts_moves() {
            return self.result(false, 0);
        }
        self.locked = true;

        let outcome = self.board.slide(direction);
        let moved = outcome.board != self.board;

        if moved {
            self.board = outcome.board;
            self.score = self.score.saturating_add(outcome.gained);
            self.moves += 1;

            if !self.has_won && outcome.produced(self.config.win_tile) {
                self.has_won = true;
                info!("reached {} with score {}", self.config.win_tile, self.score);
            }

            self.spawn_random_tile();
            self.check_game_over();
        }

        self.update_best_score();
        self.locked = false;

        self.result(moved, if moved { outcome.gained } else { 0 })
    }

    /// Parse a direction name (or arrow key name) and move
    ///
    /// Unknown names are rejected without touching the game.
    pub fn move_named(&mut self, name: &str) -> Result<MoveResult, EngineError> {
        let direction: Direction = name.parse()?;
        Ok(self.move_tiles(direction))
    }

    /// Place a 2 (or, with the configured odds, a 4) in a random empty cell
    ///
    /// Returns the filled position, or `None` when the board is full.
    pub(crate) fn spawn_random_tile(&mut self) -> Option<(u8, u8)> {
        let empty = self.board.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let pick = self.tiles.pick_cell(empty.len()).min(empty.len() - 1);
        let (row, col) = empty[pick];
        let value = self.config.spawn_value(self.tiles.roll_percent());
        self.board.set(row as usize, col as usize, value);
        debug!("spawned {} at ({}, {})", value, row, col);
        Some((row, col))
    }

    /// Flag the game as over when no slide can change the board
    ///
    /// A won game is never flagged over. Returns the resulting `is_over`.
    pub fn check_game_over(&mut self) -> bool {
        if !self.is_over && !self.has_won && !self.board.has_available_moves() {
            self.is_over = true;
            debug!("no moves left, final score {}", self.score);
        }
        self.is_over
    }

    fn update_best_score(&mut self) {
        if self.score <= self.best_score {
            return;
        }
        self.best_score = self.score;
        match self.store.save(self.best_score) {
            Ok(()) => info!("new best score {}", self.best_score),
            Err(e) => warn!("could not persist best score {}: {}", self.best_score, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::rng::SimpleRng;
    use crate::store::MemoryStore;
    use crate::types::{Cell, BOARD_SIZE};
    use std::collections::VecDeque;

    /// Replays scripted draws; falls back to cell 0 and a 2.
    #[derive(Debug, Clone, Default)]
    struct Scripted {
        cells: VecDeque<usize>,
        rolls: VecDeque<u8>,
    }

    impl Scripted {
        fn new(cells: &[usize], rolls: &[u8]) -> Self {
            Self {
                cells: cells.iter().copied().collect(),
                rolls: rolls.iter().copied().collect(),
            }
        }
    }

    impl TileSource for Scripted {
        fn pick_cell(&mut self, _count: usize) -> usize {
            self.cells.pop_front().unwrap_or(0)
        }

        fn roll_percent(&mut self) -> u8 {
            self.rolls.pop_front().unwrap_or(50)
        }
    }

    struct FailingStore;

    impl BestScoreStore for FailingStore {
        fn load(&self) -> Result<u32, StoreError> {
            Err(StoreError::Io(std::io::Error::other("unavailable")))
        }

        fn save(&mut self, _best: u32) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
    }

    type TestEngine = GameEngine<Scripted, MemoryStore>;

    fn engine_with(rows: [[Cell; BOARD_SIZE]; BOARD_SIZE], best: u32) -> TestEngine {
        let mut engine = GameEngine::new(
            EngineConfig::default(),
            Scripted::default(),
            MemoryStore::new(best),
        );
        engine.board = Board::from_rows(rows);
        engine
    }

    #[test]
    fn test_new_game_has_two_tiles() {
        let engine = GameEngine::new(
            EngineConfig::default(),
            SimpleRng::new(12345),
            MemoryStore::default(),
        );
        assert_eq!(engine.board().tile_count(), 2);
        assert!(engine
            .board()
            .cells()
            .iter()
            .all(|&v| v == 0 || v == 2 || v == 4));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.status(), GameStatus::Playing);
        assert!(!engine.is_locked());
    }

    #[test]
    fn test_reset_clears_game_keeps_best() {
        let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);
        engine.move_tiles(Direction::Left);
        assert_eq!(engine.score(), 4);

        engine.has_won = true;
        engine.reset();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.best_score(), 4);
        assert!(!engine.has_won());
        assert!(!engine.is_over());
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.board().tile_count(), 2);
    }

    #[test]
    fn test_move_left_merges_pair() {
        let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);
        // Spawn into the last empty cell in row-major order.
        engine.tiles = Scripted::new(&[14], &[50]);

        let result = engine.move_tiles(Direction::Left);
        assert!(result.moved);
        assert_eq!(result.score_gained, 4);
        assert_eq!(result.board[0], [4, 0, 0, 0]);
        assert_eq!(result.board[3], [0, 0, 0, 2]);
        assert_eq!(engine.score(), 4);
        assert_eq!(engine.moves(), 1);
    }

    #[test]
    fn test_single_pass_merge_each_direction() {
        let row = [[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]];

        let mut left = engine_with(row, 0);
        assert_eq!(left.move_tiles(Direction::Left).board[0][..2], [4, 4]);

        let mut right = engine_with(row, 0);
        let r = right.move_tiles(Direction::Right);
        assert_eq!(r.board[0][2..], [4, 4]);
        assert_eq!(r.score_gained, 8);

        let column = [[2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0]];
        let mut up = engine_with(column, 0);
        let u = up.move_tiles(Direction::Up);
        assert_eq!((u.board[0][0], u.board[1][0]), (4, 4));

        let mut down = engine_with(column, 0);
        let d = down.move_tiles(Direction::Down);
        assert_eq!((d.board[2][0], d.board[3][0]), (4, 4));
    }

    #[test]
    fn test_unchanged_move_is_noop() {
        let rows = [[2, 4, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]];
        let mut engine = engine_with(rows, 0);
        let before = engine.snapshot();

        let result = engine.move_tiles(Direction::Left);
        assert!(!result.moved);
        assert_eq!(result.score_gained, 0);
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.store().writes(), 0);
    }

    #[test]
    fn test_spawn_never_overwrites() {
        let mut engine = engine_with([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]], 0);
        engine.tiles = Scripted::new(&[0], &[5]);
        let pos = engine.spawn_random_tile();
        assert_eq!(pos, Some((1, 0)));
        assert_eq!(engine.board().get(1, 0), Some(4));
        assert_eq!(engine.board().get(0, 0), Some(2));
    }

    #[test]
    fn test_spawn_on_full_board_is_noop() {
        let rows = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        let mut engine = engine_with(rows, 0);
        assert_eq!(engine.spawn_random_tile(), None);
        assert_eq!(engine.board().rows(), rows);
    }

    #[test]
    fn test_game_over_after_spawn_fills_last_cell() {
        let rows = [
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [8, 16, 32, 0],
        ];
        let mut engine = engine_with(rows, 0);
        engine.tiles = Scripted::new(&[0], &[50]);
        assert!(!engine.check_game_over());

        let result = engine.move_tiles(Direction::Right);
        assert!(result.moved);
        assert_eq!(result.board[3], [2, 8, 16, 32]);
        assert!(result.is_over);
        assert_eq!(engine.status(), GameStatus::Over);

        for dir in Direction::ALL {
            let blocked = engine.move_tiles(dir);
            assert!(!blocked.moved);
            assert_eq!(blocked.board[3], [2, 8, 16, 32]);
        }
    }

    #[test]
    fn test_full_board_without_merges_is_over() {
        let rows = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        let mut engine = engine_with(rows, 0);
        for dir in Direction::ALL {
            assert!(!engine.move_tiles(dir).moved);
        }
        // Nothing moved, so nothing spawned and nobody re-evaluated yet.
        assert!(!engine.is_over());
        assert!(engine.check_game_over());
    }

    #[test]
    fn test_full_board_with_merge_is_not_over() {
        let rows = [[2, 2, 4, 8], [4, 8, 16, 32], [8, 16, 32, 64], [16, 32, 64, 128]];
        let mut engine = engine_with(rows, 0);
        assert!(!engine.check_game_over());
        assert!(engine.can_move(Direction::Left));
        assert!(!engine.can_move(Direction::Up));
    }

    #[test]
    fn test_reaching_win_tile_blocks_moves() {
        let rows = [[1024, 1024, 0, 0], [2, 0, 0, 0], [0; 4], [0; 4]];
        let mut engine = engine_with(rows, 0);
        // Empty cells after the slide, row-major: (0,1) (0,2) (0,3) (1,1) (1,2) ...
        engine.tiles = Scripted::new(&[4], &[5]);

        let result = engine.move_tiles(Direction::Left);
        assert!(result.moved);
        assert!(result.has_won);
        assert!(!result.is_over);
        assert_eq!(result.score_gained, 2048);
        assert_eq!(engine.status(), GameStatus::Won);

        // The winning move still spawns.
        assert_eq!(engine.board().tile_count(), 3);
        assert_eq!(engine.board().get(1, 2), Some(4));
        assert_eq!(result.board[0], [2048, 0, 0, 0]);
        assert_eq!(result.board[1], [2, 0, 4, 0]);

        let before = engine.snapshot();
        let after = engine.move_tiles(Direction::Right);
        assert!(!after.moved);
        assert_eq!(engine.snapshot(), before);
        assert!(!engine.can_move(Direction::Right));
    }

    #[test]
    fn test_won_game_never_flags_over() {
        let mut engine = engine_with([[2048, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]], 0);
        engine.has_won = true;
        assert!(!engine.check_game_over());
        assert_eq!(engine.status(), GameStatus::Won);
    }

    #[test]
    fn test_locked_engine_rejects_moves() {
        let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);
        engine.locked = true;
        let result = engine.move_tiles(Direction::Left);
        assert!(!result.moved);
        assert_eq!(result.board[0], [2, 2, 0, 0]);
        assert!(!engine.can_move(Direction::Left));
    }

    #[test]
    fn test_lock_released_after_move() {
        let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);
        engine.move_tiles(Direction::Left);
        assert!(!engine.is_locked());
    }

    #[test]
    fn test_best_score_persists_only_when_beaten() {
        let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 100);
        engine.score = 90;
        engine.move_tiles(Direction::Left);
        assert_eq!(engine.score(), 94);
        assert_eq!(engine.best_score(), 100);
        assert_eq!(engine.store().writes(), 0);

        engine.score = 246;
        engine.board = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        engine.move_tiles(Direction::Left);
        assert_eq!(engine.score(), 250);
        assert_eq!(engine.best_score(), 250);
        assert_eq!(engine.store().best(), 250);
        assert_eq!(engine.store().writes(), 1);
    }

    #[test]
    fn test_best_score_survives_lower_game() {
        let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);
        engine.score = 246;
        engine.move_tiles(Direction::Left);
        assert_eq!(engine.score(), 250);
        assert_eq!(engine.store().best(), 250);

        engine.reset();
        engine.board = Board::from_rows([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        engine.move_tiles(Direction::Left);
        assert_eq!(engine.score(), 8);
        assert_eq!(engine.best_score(), 250);
        assert_eq!(engine.store().best(), 250);
        assert_eq!(engine.store().writes(), 1);
    }

    #[test]
    fn test_best_score_restored_from_store() {
        let engine = GameEngine::new(
            EngineConfig::default(),
            SimpleRng::new(1),
            MemoryStore::new(100),
        );
        assert_eq!(engine.best_score(), 100);
    }

    #[test]
    fn test_store_failures_do_not_abort() {
        let mut engine = GameEngine::new(EngineConfig::default(), Scripted::default(), FailingStore);
        assert_eq!(engine.best_score(), 0);

        engine.board = Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let result = engine.move_tiles(Direction::Left);
        assert!(result.moved);
        assert_eq!(result.best_score, 4);
    }

    #[test]
    fn test_move_named() {
        let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);
        let err = engine.move_named("diagonal").unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
        assert_eq!(engine.board().rows()[0], [2, 2, 0, 0]);

        let result = engine.move_named("ArrowLeft").unwrap();
        assert!(result.moved);
        assert_eq!(result.board[0][0], 4);
    }

    #[test]
    fn test_configured_win_tile() {
        let config = EngineConfig {
            win_tile: 8,
            ..EngineConfig::default()
        };
        let mut engine = GameEngine::new(config, Scripted::default(), MemoryStore::default());
        engine.board = Board::from_rows([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(engine.move_tiles(Direction::Left).has_won);
    }
}
