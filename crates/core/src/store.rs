//! Best-score persistence
//!
//! The engine keeps a single integer across games. Where it lives is up to the
//! embedder: [`MemoryStore`] for tests and in-process use, [`JsonFileStore`] for a
//! small JSON file keyed the same way the browser build keys local storage.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Get/set access to the persisted best score
pub trait BestScoreStore {
    fn load(&self) -> Result<u32, StoreError>;
    fn save(&mut self, best: u32) -> Result<(), StoreError>;
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn load(&self) -> Result<u32, StoreError> {
        (**self).load()
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        (**self).save(best)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    best: u32,
    writes: u32,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self { best, writes: 0 }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Number of successful saves
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, StoreError> {
        Ok(self.best)
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        self.best = best;
        self.writes += 1;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreRecord {
    #[serde(rename = "bestScore")]
    best_score: u32,
}

/// JSON file store: `{"bestScore": N}`
///
/// A missing file reads as 0. Writes replace the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: BestScoreRecord = serde_json::from_str(&text)?;
        Ok(record.best_score)
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        let record = BestScoreRecord { best_score: best };
        let text = serde_json::to_string(&record)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
