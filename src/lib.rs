//! Chuzzle board (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `chuzzle_board::{types, core, engine}` and adds the
//! line-command layer used by the headless driver binary.

pub mod command;

pub use chuzzle_board_core as core;
pub use chuzzle_board_engine as engine;
pub use chuzzle_board_types as types;
