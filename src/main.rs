//! Headless 2048 runner (default binary).
//!
//! Plays one game without any rendering or input device: directions are tried in
//! a fixed preference order until the game is won, lost, or the move cap is hit.
//! The final board and a JSON snapshot are printed to stdout.
//!
//! Environment:
//!
//! - `TWENTY48_SEED`: seed for a reproducible game (thread RNG when unset)
//! - `TWENTY48_BEST_SCORE_PATH`: best-score file (default `best-score.json`)
//! - `TWENTY48_MAX_MOVES`: move cap (default 10000)
//! - `TWENTY48_WIN_TILE`, `TWENTY48_FOUR_CHANCE`: see `EngineConfig`
//! - `RUST_LOG`: log filter (default `info`)

use std::env;

use anyhow::{Context, Result};
use env_logger::Env;
use log::info;

use web_2048::core::{EngineConfig, GameEngine, JsonFileStore, RandTiles, SimpleRng, TileSource};
use web_2048::types::Direction;

/// Corner-hugging preference: keep big tiles bottom-left.
const PREFERENCE: [Direction; 4] = [
    Direction::Left,
    Direction::Down,
    Direction::Right,
    Direction::Up,
];

struct RunnerConfig {
    seed: Option<u32>,
    best_score_path: String,
    max_moves: u32,
}

impl RunnerConfig {
    fn from_env() -> Self {
        let seed = env::var("TWENTY48_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let best_score_path = env::var("TWENTY48_BEST_SCORE_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "best-score.json".to_string());

        let max_moves = env::var("TWENTY48_MAX_MOVES")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(10_000);

        Self {
            seed,
            best_score_path,
            max_moves,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let runner = RunnerConfig::from_env();
    let config = EngineConfig::from_env();

    let tiles: Box<dyn TileSource> = match runner.seed {
        Some(seed) => {
            info!("seeded game (seed {})", seed);
            Box::new(SimpleRng::new(seed))
        }
        None => Box::new(RandTiles::thread()),
    };
    let store = JsonFileStore::new(&runner.best_score_path);

    let mut game = GameEngine::new(config, tiles, store);

    while !game.status().is_terminal() && game.moves() < runner.max_moves {
        let Some(direction) = PREFERENCE.into_iter().find(|&d| game.can_move(d)) else {
            // Full board without merges; let the engine record it.
            game.check_game_over();
            break;
        };
        game.move_tiles(direction);
    }

    let snapshot = game.snapshot();
    info!(
        "finished after {} moves: score {}, best {}, status {:?}",
        snapshot.moves, snapshot.score, snapshot.best_score, snapshot.status
    );

    println!("{}", game.board());
    let summary = serde_json::to_string_pretty(&snapshot).context("encoding game summary")?;
    println!("{}", summary);
    Ok(())
}
