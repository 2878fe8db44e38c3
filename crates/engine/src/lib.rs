//! Gesture handling and the engine facade
//!
//! - [`gesture`]: press/drag/release state machine with commit-or-rollback
//! - [`engine`]: [`PuzzleEngine`], which owns one board and one gesture
//!   controller and exposes the presentation-facing contract
//!
//! # Example
//!
//! ```
//! use chuzzle_board_core::GridModel;
//! use chuzzle_board_engine::{PuzzleEngine, Resolution};
//! use chuzzle_board_types::{BoardConfig, Cell, DragDelta};
//!
//! let grid = GridModel::parse("rrgb\nbopr").unwrap();
//! let mut engine = PuzzleEngine::with_grid(BoardConfig::default(), grid).unwrap();
//!
//! engine.on_press_start(Cell::new(1, 2)).unwrap();
//! engine.on_drag_delta(DragDelta::new(1.2, 0.0)).unwrap();
//! assert!(matches!(engine.on_release().unwrap(), Resolution::Committed(_)));
//! assert_eq!(engine.grid().to_string(), "rrgb\nrbop\n");
//! ```

pub mod engine;
pub mod gesture;

pub use engine::PuzzleEngine;
pub use gesture::{
    lock_direction, step_count, DragSession, GestureController, GestureError, GestureState,
    Resolution,
};
