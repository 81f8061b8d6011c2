//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so binaries, tests and
//! benches can use `blockfall::{core, engine, input, types}`.

pub mod autoplay;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;
