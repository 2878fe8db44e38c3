//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond conversions, making them
//! usable in any context (board logic, gesture handling, presentation snapshots).
//!
//! # Board Dimensions
//!
//! The standard board is 6x6, but every dimension is a runtime parameter:
//!
//! - **Rows**: indexed `0..rows`
//! - **Columns**: indexed `0..columns`
//! - **Upper bound**: [`MAX_BOARD_SIDE`] cells per side
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 6 | Board rows |
//! | `DEFAULT_COLUMNS` | 6 | Board columns |
//! | `DEFAULT_PALETTE_SIZE` | 7 | Colors in play |
//! | `DEFAULT_MIN_MATCH_COUNT` | 3 | Smallest group that counts as a match |
//! | `DEFAULT_DRAG_THRESHOLD` | 0.2 | Drag length needed to lock a direction |
//! | `DEFAULT_CELL_SPACING` | 1.2 | Drag length of one cell |
//!
//! # Examples
//!
//! ```
//! use chuzzle_board_types::{Axis, ColorId, Direction, DEFAULT_ROWS};
//!
//! let red = ColorId::from_str("red").unwrap();
//! assert_eq!(red.symbol(), 'r');
//! assert_eq!(ColorId::from_symbol('r'), Some(red));
//!
//! assert_eq!(Direction::Left.axis(), Axis::Row);
//! assert_eq!(Direction::Up.sign(), 1);
//!
//! assert_eq!(DEFAULT_ROWS, 6);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;

pub use config::{BoardConfig, GenerationPolicy};
pub use error::{BoardError, ConfigError};

/// Default number of board rows
pub const DEFAULT_ROWS: usize = 6;

/// Default number of board columns
pub const DEFAULT_COLUMNS: usize = 6;

/// Largest supported row or column count
pub const MAX_BOARD_SIDE: usize = 32;

/// Smallest supported palette
pub const MIN_PALETTE_SIZE: u8 = 3;

/// Largest supported palette (one entry per named color)
pub const MAX_PALETTE_SIZE: u8 = 10;

/// Default palette size
pub const DEFAULT_PALETTE_SIZE: u8 = 7;

/// Smallest connected group that counts as a match
pub const DEFAULT_MIN_MATCH_COUNT: usize = 3;

/// Drag length (world units) before a direction locks
pub const DEFAULT_DRAG_THRESHOLD: f32 = 0.2;

/// Distance (world units) between adjacent cell centers
pub const DEFAULT_CELL_SPACING: f32 = 1.2;

const COLOR_NAMES: [&str; MAX_PALETTE_SIZE as usize] = [
    "blue", "green", "orange", "pink", "red", "white", "yellow", "purple", "cyan", "brown",
];

const COLOR_SYMBOLS: [char; MAX_PALETTE_SIZE as usize] =
    ['b', 'g', 'o', 'p', 'r', 'w', 'y', 'u', 'c', 'n'];

/// Tile color, an index into the fixed named palette
///
/// Only the first `palette_size` colors are dealt on a given board, but any
/// of the ten named colors is a valid `ColorId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorId(u8);

impl ColorId {
    /// Create a color from its palette index, `None` past the last named color
    pub fn new(index: u8) -> Option<Self> {
        (index < MAX_PALETTE_SIZE).then_some(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Parse a color from its name (case-insensitive)
    ///
    /// ```
    /// use chuzzle_board_types::ColorId;
    ///
    /// assert_eq!(ColorId::from_str("Blue").map(|c| c.index()), Some(0));
    /// assert_eq!(ColorId::from_str("mauve"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        COLOR_NAMES
            .iter()
            .position(|name| *name == lower)
            .map(|i| Self(i as u8))
    }

    /// Parse a color from its one-character symbol (case-insensitive)
    pub fn from_symbol(c: char) -> Option<Self> {
        let lower = c.to_ascii_lowercase();
        COLOR_SYMBOLS
            .iter()
            .position(|s| *s == lower)
            .map(|i| Self(i as u8))
    }

    pub fn as_str(self) -> &'static str {
        COLOR_NAMES[self.0 as usize]
    }

    /// One-character symbol used by text dumps
    pub fn symbol(self) -> char {
        COLOR_SYMBOLS[self.0 as usize]
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bit set of colors, used for forbidden/allowed palettes during generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorSet(u16);

impl ColorSet {
    pub const EMPTY: ColorSet = ColorSet(0);

    /// The first `palette_size` colors
    pub fn palette(palette_size: u8) -> Self {
        let n = palette_size.min(MAX_PALETTE_SIZE);
        Self(((1u32 << n) - 1) as u16)
    }

    pub fn insert(&mut self, color: ColorId) {
        self.0 |= 1 << color.0;
    }

    pub fn contains(self, color: ColorId) -> bool {
        self.0 & (1 << color.0) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Colors in `self` that are not in `other`
    pub fn difference(self, other: ColorSet) -> ColorSet {
        ColorSet(self.0 & !other.0)
    }

    /// Colors in ascending index order
    pub fn iter(self) -> impl Iterator<Item = ColorId> {
        (0..MAX_PALETTE_SIZE).filter_map(move |i| {
            let color = ColorId(i);
            self.contains(color).then_some(color)
        })
    }

    /// The `n`-th color in ascending index order
    pub fn nth(self, n: usize) -> Option<ColorId> {
        self.iter().nth(n)
    }
}

impl FromIterator<ColorId> for ColorSet {
    fn from_iter<I: IntoIterator<Item = ColorId>>(iter: I) -> Self {
        let mut set = ColorSet::EMPTY;
        for color in iter {
            set.insert(color);
        }
        set
    }
}

/// Generation-stable tile handle
///
/// `slot` indexes the board's tile arena and never changes while a tile moves.
/// `generation` increases whenever the slot is given a new tile by a direct
/// overwrite, so a stale handle never aliases its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId {
    pub slot: u32,
    pub generation: u32,
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.slot, self.generation)
    }
}

/// A colored tile and its identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub color: ColorId,
}

/// One (row, column) position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Line orientation of a shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Tiles move along a row (column index changes)
    Row,
    /// Tiles move along a column (row index changes)
    Column,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locked drag direction
///
/// Directions are expressed in board space:
/// - **Left / Right**: decreasing / increasing column index (row shift)
/// - **Down / Up**: decreasing / increasing row index (column shift)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
}

impl Direction {
    pub fn axis(&self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Row,
            Direction::Down | Direction::Up => Axis::Column,
        }
    }

    /// +1 toward higher indices, -1 toward lower
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Right | Direction::Up => 1,
            Direction::Left | Direction::Down => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Up => "up",
        }
    }
}

/// Continuous drag displacement in board-space world units
///
/// `x` grows toward higher column indices, `y` toward higher row indices.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragDelta {
    pub x: f32,
    pub y: f32,
}

impl DragDelta {
    pub const ZERO: DragDelta = DragDelta { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component along `axis`
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Row => self.x,
            Axis::Column => self.y,
        }
    }
}

impl std::ops::Add for DragDelta {
    type Output = DragDelta;

    fn add(self, rhs: DragDelta) -> DragDelta {
        DragDelta::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for DragDelta {
    fn add_assign(&mut self, rhs: DragDelta) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// A row or column rotation
///
/// Positive `steps` move every tile of the line toward higher indices,
/// wrapping at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shift {
    pub axis: Axis,
    pub line: usize,
    pub steps: i32,
}

impl Shift {
    pub const fn new(axis: Axis, line: usize, steps: i32) -> Self {
        Self { axis, line, steps }
    }

    /// The shift that exactly undoes this one
    ///
    /// `i32::MIN` has no negation and saturates to `i32::MAX`, which is only
    /// exact on lines whose length divides 2^31; reduce the shift to the line
    /// length first when the count may be that large.
    pub fn inverse(&self) -> Self {
        Self {
            steps: self.steps.saturating_neg(),
            ..*self
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} by {:+}", self.axis, self.line, self.steps)
    }
}
