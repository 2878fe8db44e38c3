//! Static engine configuration.
//!
//! Configuration is fixed at construction. It can be built from defaults,
//! adjusted with the `with_*` builders, or read from environment variables:
//!
//! - `CHUZZLE_ROWS` / `CHUZZLE_COLUMNS`: board dimensions (default 6x6)
//! - `CHUZZLE_PALETTE_SIZE`: colors in play, 3..=10 (default 7)
//! - `CHUZZLE_MIN_MATCH`: smallest matching group (default 3)
//! - `CHUZZLE_DRAG_THRESHOLD`: drag length before a direction locks (default 0.2)
//! - `CHUZZLE_CELL_SPACING`: drag length of one cell (default 1.2)
//! - `CHUZZLE_GENERATION`: `local` or `strict` (default `local`)
//!
//! Unparseable values fall back to the default; [`BoardConfig::validate`]
//! still runs when an engine is built from the result.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{
    DEFAULT_CELL_SPACING, DEFAULT_COLUMNS, DEFAULT_DRAG_THRESHOLD, DEFAULT_MIN_MATCH_COUNT,
    DEFAULT_PALETTE_SIZE, DEFAULT_ROWS, MAX_BOARD_SIDE, MAX_PALETTE_SIZE, MIN_PALETTE_SIZE,
};

/// How a fresh board picks each cell's color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationPolicy {
    /// Forbid colors using the left/above local rules only (fast, may leave
    /// irregular connected groups)
    #[default]
    Local,
    /// Forbid any color whose placement would complete a connected match
    Strict,
}

impl GenerationPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Some(GenerationPolicy::Local),
            "strict" => Some(GenerationPolicy::Strict),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationPolicy::Local => "local",
            GenerationPolicy::Strict => "strict",
        }
    }
}

/// Board, matching and gesture parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
    pub palette_size: u8,
    pub min_match_count: usize,
    pub drag_threshold: f32,
    pub cell_spacing: f32,
    pub generation: GenerationPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            palette_size: DEFAULT_PALETTE_SIZE,
            min_match_count: DEFAULT_MIN_MATCH_COUNT,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            cell_spacing: DEFAULT_CELL_SPACING,
            generation: GenerationPolicy::Local,
        }
    }
}

impl BoardConfig {
    /// Defaults overlaid with `CHUZZLE_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|s| s.trim().parse().ok())
        }

        let d = Self::default();
        Self {
            rows: parsed(&lookup, "CHUZZLE_ROWS").unwrap_or(d.rows),
            columns: parsed(&lookup, "CHUZZLE_COLUMNS").unwrap_or(d.columns),
            palette_size: parsed(&lookup, "CHUZZLE_PALETTE_SIZE").unwrap_or(d.palette_size),
            min_match_count: parsed(&lookup, "CHUZZLE_MIN_MATCH").unwrap_or(d.min_match_count),
            drag_threshold: parsed(&lookup, "CHUZZLE_DRAG_THRESHOLD").unwrap_or(d.drag_threshold),
            cell_spacing: parsed(&lookup, "CHUZZLE_CELL_SPACING").unwrap_or(d.cell_spacing),
            generation: lookup("CHUZZLE_GENERATION")
                .and_then(|s| GenerationPolicy::from_str(&s))
                .unwrap_or(d.generation),
        }
    }

    pub fn with_dimensions(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn with_palette_size(mut self, palette_size: u8) -> Self {
        self.palette_size = palette_size;
        self
    }

    pub fn with_min_match_count(mut self, min_match_count: usize) -> Self {
        self.min_match_count = min_match_count;
        self
    }

    pub fn with_drag_threshold(mut self, drag_threshold: f32) -> Self {
        self.drag_threshold = drag_threshold;
        self
    }

    pub fn with_cell_spacing(mut self, cell_spacing: f32) -> Self {
        self.cell_spacing = cell_spacing;
        self
    }

    pub fn with_generation(mut self, generation: GenerationPolicy) -> Self {
        self.generation = generation;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side_ok = |n: usize| (1..=MAX_BOARD_SIDE).contains(&n);
        if !side_ok(self.rows) || !side_ok(self.columns) {
            return Err(ConfigError::Dimensions {
                rows: self.rows,
                columns: self.columns,
                max: MAX_BOARD_SIDE,
            });
        }
        if !(MIN_PALETTE_SIZE..=MAX_PALETTE_SIZE).contains(&self.palette_size) {
            return Err(ConfigError::PaletteSize(self.palette_size));
        }
        if self.min_match_count == 0 {
            return Err(ConfigError::MinMatchCount);
        }
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(ConfigError::DragThreshold(self.drag_threshold));
        }
        if !self.cell_spacing.is_finite() || self.cell_spacing <= 0.0 {
            return Err(ConfigError::CellSpacing(self.cell_spacing));
        }
        Ok(())
    }
}
