//! Board module - manages the 4x4 tile grid
//!
//! Cells are stored in a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) where row ranges 0..3 (top to bottom) and col ranges
//! 0..3 (left to right). An empty cell holds `0`; every tile is a power of two >= 2.
//!
//! Sliding treats the board as four independent lines. Each line is read starting
//! at the near edge (the edge named by the direction), compacted, and merged in a
//! single pass so that a tile takes part in at most one merge per slide.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{Cell, Direction, BOARD_SIZE, CELL_COUNT, EMPTY};

/// Result of sliding a board without spawning a new tile
#[derive(Debug, Clone, PartialEq)]
pub struct SlideOutcome {
    /// The board after compaction and merging
    pub board: Board,
    /// Sum of all merged tile values (the score this slide awards)
    pub gained: u32,
    /// Value of every tile produced by a merge, in line scan order
    pub merged: ArrayVec<Cell, 8>,
}

impl SlideOutcome {
    /// True when any merge produced exactly `value`
    pub fn produced(&self, value: Cell) -> bool {
        self.merged.contains(&value)
    }
}

/// The game board - 4 rows x 4 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; CELL_COUNT],
        }
    }

    /// Build a board from rows (top to bottom)
    pub fn from_rows(rows: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                board.cells[row * BOARD_SIZE + col] = value;
            }
        }
        board
    }

    /// Copy the board out as rows (top to bottom)
    pub fn rows(&self) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        let mut out = [[EMPTY; BOARD_SIZE]; BOARD_SIZE];
        for (idx, &value) in self.cells.iter().enumerate() {
            out[idx / BOARD_SIZE][idx % BOARD_SIZE] = value;
        }
        out
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return None;
        }
        Some(row * BOARD_SIZE + col)
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [EMPTY; CELL_COUNT];
    }

    /// Positions of all empty cells in row-major order
    pub fn empty_cells(&self) -> ArrayVec<(u8, u8), CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &value)| value == EMPTY)
            .map(|(idx, _)| ((idx / BOARD_SIZE) as u8, (idx % BOARD_SIZE) as u8))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value == EMPTY).count()
    }

    pub fn tile_count(&self) -> usize {
        CELL_COUNT - self.empty_count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&value| value != EMPTY)
    }

    /// Largest tile on the board (0 when empty)
    pub fn max_tile(&self) -> Cell {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    /// Sum of all tile values
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&value| value as u64).sum()
    }

    /// Check whether any slide could change the board
    ///
    /// A move exists while an empty cell remains or two horizontally or
    /// vertically adjacent cells hold equal values.
    pub fn has_available_moves(&self) -> bool {
        if !self.is_full() {
            return true;
        }

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let value = self.cells[row * BOARD_SIZE + col];
                if row + 1 < BOARD_SIZE && self.cells[(row + 1) * BOARD_SIZE + col] == value {
                    return true;
                }
                if col + 1 < BOARD_SIZE && self.cells[row * BOARD_SIZE + col + 1] == value {
                    return true;
                }
            }
        }

        false
    }

    /// Flat indices of one line, ordered from the near edge outward
    ///
    /// `line` selects the row (Left/Right) or column (Up/Down).
    fn line_indices(direction: Direction, line: usize) -> [usize; BOARD_SIZE] {
        let mut out = [0usize; BOARD_SIZE];
        for (i, slot) in out.iter_mut().enumerate() {
            let far = BOARD_SIZE - 1 - i;
            *slot = match direction {
                Direction::Left => line * BOARD_SIZE + i,
                Direction::Right => line * BOARD_SIZE + far,
                Direction::Up => i * BOARD_SIZE + line,
                Direction::Down => far * BOARD_SIZE + line,
            };
        }
        out
    }

    /// Slide all tiles toward the near edge of `direction`, merging equal pairs
    ///
    /// Pure: the receiver is untouched and no tile is spawned.
    pub fn slide(&self, direction: Direction) -> SlideOutcome {
        let mut board = *self;
        let mut gained = 0u32;
        let mut merged = ArrayVec::new();

        for line in 0..BOARD_SIZE {
            let indices = Self::line_indices(direction, line);
            let mut values = [EMPTY; BOARD_SIZE];
            for (slot, &idx) in values.iter_mut().zip(indices.iter()) {
                *slot = self.cells[idx];
            }

            let (out, line_gained) = merge_line(values, &mut merged);
            gained = gained.saturating_add(line_gained);

            for (&value, &idx) in out.iter().zip(indices.iter()) {
                board.cells[idx] = value;
            }
        }

        SlideOutcome {
            board,
            gained,
            merged,
        }
    }
}

/// Compact and merge one line read from the near edge
///
/// Returns the new line and the points awarded. Merged values are appended to
/// `merged`.
pub(crate) fn merge_line(
    line: [Cell; BOARD_SIZE],
    merged: &mut ArrayVec<Cell, 8>,
) -> ([Cell; BOARD_SIZE], u32) {
    let mut out = [EMPTY; BOARD_SIZE];
    let mut write = 0usize;
    let mut gained = 0u32;
    // Tile waiting for a possible partner; a merged tile never waits.
    let mut pending: Option<Cell> = None;

    for value in line.into_iter().filter(|&v| v != EMPTY) {
        match pending {
            Some(held) if held == value => {
                let doubled = held.saturating_mul(2);
                out[write] = doubled;
                write += 1;
                gained = gained.saturating_add(doubled);
                // At most two merges per line, eight per board.
                let _ = merged.try_push(doubled);
                pending = None;
            }
            Some(held) => {
                out[write] = held;
                write += 1;
                pending = Some(value);
            }
            None => pending = Some(value),
        }
    }

    if let Some(held) = pending {
        out[write] = held;
    }

    (out, gained)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let value = self.cells[row * BOARD_SIZE + col];
                if col > 0 {
                    f.write_str(" ")?;
                }
                if value == EMPTY {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", value)?;
                }
            }
            if row + 1 < BOARD_SIZE {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
