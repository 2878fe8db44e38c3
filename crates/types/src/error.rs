//! Error types shared by the board crates.

use thiserror::Error;

use crate::Axis;

/// Contract violations on board access
///
/// These are programming errors: callers are expected to abort the operation
/// rather than clamp and continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is outside the {rows}x{columns} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },

    #[error("cell ({row}, {col}) holds no tile")]
    EmptyCell { row: usize, col: usize },

    #[error("{axis} {line} does not exist (board has {count})")]
    LineOutOfBounds { axis: Axis, line: usize, count: usize },

    #[error("color {color} is outside the {palette_size}-color palette")]
    ColorOutOfPalette { color: u8, palette_size: u8 },

    #[error("no colors to deal from")]
    EmptyPalette,

    #[error("unknown color symbol {0:?}")]
    UnknownColor(char),

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("board has no cells")]
    EmptyBoard,

    #[error("{rows}x{columns} board exceeds the {max}x{max} limit")]
    TooLarge {
        rows: usize,
        columns: usize,
        max: usize,
    },
}

/// Rejected engine configuration, reported at construction time
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board must be between 1x1 and {max}x{max}, got {rows}x{columns}")]
    Dimensions {
        rows: usize,
        columns: usize,
        max: usize,
    },

    #[error("palette size {0} is outside the supported range {min}..={max}", min = crate::MIN_PALETTE_SIZE, max = crate::MAX_PALETTE_SIZE)]
    PaletteSize(u8),

    #[error("minimum match count must be at least 1")]
    MinMatchCount,

    #[error("drag threshold must be finite and non-negative, got {0}")]
    DragThreshold(f32),

    #[error("cell spacing must be finite and positive, got {0}")]
    CellSpacing(f32),

    #[error("board does not fit the configuration: {0}")]
    Board(#[from] BoardError),
}
