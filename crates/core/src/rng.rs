//! RNG module - random tile placement
//!
//! Spawning needs two random draws: which empty cell to fill and whether the new
//! tile is a 2 or a 4. Both are routed through [`TileSource`] so the engine can be
//! driven by a seeded generator in tests and replays, or by the thread RNG in play.
//!
//! Also provides a simple LCG for deterministic testing.

use rand::rngs::ThreadRng;
use rand::Rng;

/// Source of randomness for tile spawns
pub trait TileSource {
    /// Pick an index in `0..count` (count is always >= 1)
    fn pick_cell(&mut self, count: usize) -> usize;

    /// Roll a percentage in `0..100`
    fn roll_percent(&mut self) -> u8;
}

impl<T: TileSource + ?Sized> TileSource for Box<T> {
    fn pick_cell(&mut self, count: usize) -> usize {
        (**self).pick_cell(count)
    }

    fn roll_percent(&mut self) -> u8 {
        (**self).roll_percent()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Current generator state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TileSource for SimpleRng {
    fn pick_cell(&mut self, count: usize) -> usize {
        self.next_range(count.max(1) as u32) as usize
    }

    fn roll_percent(&mut self) -> u8 {
        self.next_range(100) as u8
    }
}

/// Adapter driving spawns from any `rand` generator
#[derive(Debug, Clone)]
pub struct RandTiles<R>(pub R);

impl RandTiles<ThreadRng> {
    /// Non-deterministic source backed by the thread-local RNG
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl<R: Rng> TileSource for RandTiles<R> {
    fn pick_cell(&mut self, count: usize) -> usize {
        self.0.gen_range(0..count.max(1))
    }

    fn roll_percent(&mut self) -> u8 {
        self.0.gen_range(0..100)
    }
}
