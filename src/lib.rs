//! Web 2048 (workspace facade crate).
//!
//! Exposes the engine as `web_2048::{core, types}` while the implementation lives
//! in dedicated crates under `crates/`.

pub use twenty48_core as core;
pub use twenty48_types as types;
