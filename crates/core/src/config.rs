//! Engine configuration
//!
//! Defaults reproduce classic 2048. Values can be overridden through
//! environment variables:
//!
//! - `TWENTY48_WIN_TILE`: tile value that wins (power of two >= 4, default 2048)
//! - `TWENTY48_FOUR_CHANCE`: percent chance a spawn is a 4 (0-100, default 10)
//!
//! Invalid or missing values fall back to the defaults.

use std::env;

use crate::types::{FOUR_CHANCE_PERCENT, WIN_TILE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub win_tile: u32,
    pub four_chance_percent: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            win_tile: WIN_TILE,
            four_chance_percent: FOUR_CHANCE_PERCENT,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test map, ...)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let win_tile = lookup("TWENTY48_WIN_TILE")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&v| v >= 4 && v.is_power_of_two())
            .unwrap_or(defaults.win_tile);

        let four_chance_percent = lookup("TWENTY48_FOUR_CHANCE")
            .and_then(|s| s.trim().parse::<u8>().ok())
            .filter(|&v| v <= 100)
            .unwrap_or(defaults.four_chance_percent);

        Self {
            win_tile,
            four_chance_percent,
        }
    }

    /// Tile value for a spawn given a percent roll in `0..100`
    pub fn spawn_value(&self, roll: u8) -> u32 {
        if roll < self.four_chance_percent {
            4
        } else {
            2
        }
    }
}
