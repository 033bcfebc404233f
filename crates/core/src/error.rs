//! Error types for the engine and best-score persistence
//!
//! Game conditions (full board, no legal move, already won) are state, not
//! errors. Only caller contract violations and storage failures surface here.

use std::io;

use crate::types::InvalidDirection;

/// Engine-level failure
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// The caller passed an argument outside the engine's contract
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidDirection),
}

/// Best-score store failure
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("best score store I/O error: {0}")]
    Io(#[from] io::Error),
    /// Stored data exists but cannot be decoded
    #[error("best score store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
