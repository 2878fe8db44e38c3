//! Core board logic - pure, deterministic, and testable
//!
//! This crate holds the board model and every rule that reads it. It has no
//! dependencies on rendering, input devices, or timing, which makes it:
//!
//! - **Deterministic**: the same seed deals the same board
//! - **Testable**: every rule is a function of a board value
//! - **Portable**: usable from a game loop, a headless driver, or a bench
//!
//! # Module Structure
//!
//! - [`grid`]: tile storage, cyclic row/column shifts, stable tile identity
//! - [`matcher`]: flood-fill detection of connected same-color groups
//! - [`generate`]: dealing a fresh board that avoids obvious matches
//! - [`rng`]: seeded LCG used for dealing
//! - [`snapshot`]: serializable read-only board view
//!
//! # Example
//!
//! ```
//! use chuzzle_board_core::{GridModel, MatchDetector};
//!
//! let mut grid = GridModel::parse("rrgb\nbgor").unwrap();
//! let detector = MatchDetector::default();
//! assert!(detector.find_all_match_groups(&grid).is_empty());
//!
//! // Rotate row 1 one step right: "rbgo"
//! grid.shift_row(1, 1).unwrap();
//! assert_eq!(grid.to_string(), "rrgb\nrbgo\n");
//! assert_eq!(detector.find_all_match_groups(&grid).len(), 1);
//! ```

pub mod generate;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod snapshot;

pub use chuzzle_board_types as types;

pub use generate::{GenerationHeuristic, PartialBoard};
pub use grid::{normalize_steps, ColorGrid, GridModel};
pub use matcher::{describe_groups, MatchDetector, MatchGroup};
pub use rng::SimpleRng;
pub use snapshot::{board_hash, BoardSnapshot, TileSnapshot};
