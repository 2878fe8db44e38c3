//! Board generation - deal a fresh board without obvious pre-made matches
//!
//! Cells are filled in one pass, left to right and top to bottom, so when a
//! cell is dealt only the cells to its left and above are known. Two policies
//! decide which colors a cell may not take:
//!
//! - [`GenerationPolicy::Local`] looks at a handful of fixed neighbors and
//!   forbids straight 3-runs and a few L-shaped corners. It is fast but
//!   deliberately incomplete: irregular connected groups can slip through,
//!   so a fresh board may still contain matches.
//! - [`GenerationPolicy::Strict`] forbids every color whose placement would
//!   complete a connected group of `min_match_count` cells.
//!
//! If every color is forbidden the cell falls back to the whole palette.

use crate::grid::{ColorGrid, GridModel};
use crate::matcher::MatchDetector;
use crate::rng::SimpleRng;
use crate::types::{BoardConfig, BoardError, Cell, ColorId, ColorSet, GenerationPolicy};

/// Row-major color buffer for a board that is still being dealt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialBoard {
    rows: usize,
    columns: usize,
    colors: Vec<Option<ColorId>>,
}

impl PartialBoard {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            colors: vec![None; rows * columns],
        }
    }

    pub fn place(&mut self, cell: Cell, color: ColorId) -> Result<(), BoardError> {
        if !self.contains(cell) {
            return Err(BoardError::OutOfBounds {
                row: cell.row,
                col: cell.col,
                rows: self.rows,
                columns: self.columns,
            });
        }
        self.colors[cell.row * self.columns + cell.col] = Some(color);
        Ok(())
    }

    /// Finish the board; fails if any cell is still empty
    pub fn into_grid(self) -> Result<GridModel, BoardError> {
        let mut colors = Vec::with_capacity(self.colors.len());
        for (idx, color) in self.colors.into_iter().enumerate() {
            colors.push(color.ok_or(BoardError::EmptyCell {
                row: idx / self.columns,
                col: idx % self.columns,
            })?);
        }
        GridModel::from_colors(self.rows, self.columns, &colors)
    }
}

impl ColorGrid for PartialBoard {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn color_at(&self, cell: Cell) -> Option<ColorId> {
        if !self.contains(cell) {
            return None;
        }
        self.colors[cell.row * self.columns + cell.col]
    }
}

/// Color of the cell `up` rows above and `left` columns left of `cell`
fn behind<G: ColorGrid>(grid: &G, cell: Cell, up: usize, left: usize) -> Option<ColorId> {
    let row = cell.row.checked_sub(up)?;
    let col = cell.col.checked_sub(left)?;
    grid.color_at(Cell::new(row, col))
}

/// Picks a color for each new cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationHeuristic {
    palette: ColorSet,
    policy: GenerationPolicy,
    detector: MatchDetector,
}

impl GenerationHeuristic {
    pub fn new(palette_size: u8, min_match_count: usize, policy: GenerationPolicy) -> Self {
        Self {
            palette: ColorSet::palette(palette_size),
            policy,
            detector: MatchDetector::new(min_match_count),
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.palette_size, config.min_match_count, config.generation)
    }

    pub fn palette(&self) -> ColorSet {
        self.palette
    }

    pub fn policy(&self) -> GenerationPolicy {
        self.policy
    }

    /// Colors the local rules forbid at `cell`, judged from the cells to
    /// its left and above
    pub fn forbidden_colors<G: ColorGrid>(&self, grid: &G, cell: Cell) -> ColorSet {
        let mut forbidden = ColorSet::EMPTY;
        let left = behind(grid, cell, 0, 1);
        let up = behind(grid, cell, 1, 0);

        // Two in a row to the left.
        if let (Some(a), Some(b)) = (left, behind(grid, cell, 0, 2)) {
            if a == b {
                forbidden.insert(a);
            }
        }

        // Two in a column above.
        if let (Some(a), Some(b)) = (up, behind(grid, cell, 2, 0)) {
            if a == b {
                forbidden.insert(a);
            }
        }

        // L corner: left and up agree, and one more same-colored cell
        // would join through the new tile.
        if let (Some(a), Some(b)) = (left, up) {
            if a == b {
                let extends = [(0, 2), (2, 0), (1, 2), (2, 1)]
                    .into_iter()
                    .any(|(dr, dc)| behind(grid, cell, dr, dc) == Some(a));
                if extends {
                    forbidden.insert(a);
                }
            }
        }

        forbidden
    }

    /// Colors the strict policy forbids at `cell`
    fn match_completing_colors<G: ColorGrid>(
        &self,
        grid: &G,
        cell: Cell,
    ) -> Result<ColorSet, BoardError> {
        let mut forbidden = ColorSet::EMPTY;
        for color in self.palette.iter() {
            if self.detector.would_create_match(grid, cell, color)? {
                forbidden.insert(color);
            }
        }
        Ok(forbidden)
    }

    /// Choose a color for `cell` that the active policy allows
    ///
    /// Falls back to the unrestricted palette (with a warning) when every
    /// color is forbidden.
    pub fn safe_color_for<G: ColorGrid>(
        &self,
        grid: &G,
        cell: Cell,
        rng: &mut SimpleRng,
    ) -> Result<ColorId, BoardError> {
        self.choose(grid, cell, rng).map(|(color, _)| color)
    }

    /// Returns the chosen color and whether the fallback was taken
    fn choose<G: ColorGrid>(
        &self,
        grid: &G,
        cell: Cell,
        rng: &mut SimpleRng,
    ) -> Result<(ColorId, bool), BoardError> {
        if !grid.contains(cell) {
            return Err(BoardError::OutOfBounds {
                row: cell.row,
                col: cell.col,
                rows: grid.rows(),
                columns: grid.columns(),
            });
        }

        let forbidden = match self.policy {
            GenerationPolicy::Local => self.forbidden_colors(grid, cell),
            GenerationPolicy::Strict => self.match_completing_colors(grid, cell)?,
        };
        let allowed = self.palette.difference(forbidden);

        if let Some(color) = rng.pick_color(allowed) {
            return Ok((color, false));
        }

        tracing::warn!(
            row = cell.row,
            col = cell.col,
            "all colors forbidden; falling back to the full palette"
        );
        let color = rng
            .pick_color(self.palette)
            .ok_or(BoardError::EmptyPalette)?;
        Ok((color, true))
    }

    /// Deal a complete `rows x columns` board
    pub fn generate(
        &self,
        rows: usize,
        columns: usize,
        rng: &mut SimpleRng,
    ) -> Result<GridModel, BoardError> {
        let mut board = PartialBoard::new(rows, columns);
        let mut degenerate = 0usize;

        for row in 0..rows {
            for col in 0..columns {
                let cell = Cell::new(row, col);
                let (color, fell_back) = self.choose(&board, cell, rng)?;
                degenerate += fell_back as usize;
                board.place(cell, color)?;
            }
        }

        let grid = board.into_grid()?;
        tracing::info!(
            rows,
            columns,
            policy = self.policy.as_str(),
            degenerate,
            "board generated"
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(name: &str) -> ColorId {
        ColorId::from_str(name).unwrap()
    }

    fn partial(text: &str, rows: usize, columns: usize) -> PartialBoard {
        // '.' marks a cell that has not been dealt yet.
        let mut board = PartialBoard::new(rows, columns);
        for (row, line) in text.lines().enumerate() {
            for (col, c) in line.trim().chars().enumerate() {
                if let Some(color) = ColorId::from_symbol(c) {
                    board.place(Cell::new(row, col), color).unwrap();
                }
            }
        }
        board
    }

    #[test]
    fn test_two_left_forbidden() {
        let board = partial("rr.", 1, 3);
        let h = GenerationHeuristic::new(7, 3, GenerationPolicy::Local);
        let forbidden = h.forbidden_colors(&board, Cell::new(0, 2));
        assert!(forbidden.contains(color("red")));
        assert_eq!(forbidden.len(), 1);
    }

    #[test]
    fn test_two_above_forbidden() {
        let board = partial("g\ng\n.", 3, 1);
        let h = GenerationHeuristic::new(7, 3, GenerationPolicy::Local);
        let forbidden = h.forbidden_colors(&board, Cell::new(2, 0));
        assert!(forbidden.contains(color("green")));
    }

    #[test]
    fn test_l_corner_with_extension_forbidden() {
        // up = (1, 2) = b, left = (2, 1) = b, and (0, 1) = b is one of
        // the corner's extension cells.
        let board = partial(
            "obr\n\
             pyb\n\
             gb.",
            3,
            3,
        );
        let h = GenerationHeuristic::new(7, 3, GenerationPolicy::Local);
        assert!(h
            .forbidden_colors(&board, Cell::new(2, 2))
            .contains(color("blue")));
    }

    #[test]
    fn test_bare_l_corner_is_allowed_by_local_rules() {
        let board = partial(
            "op\n\
             gb\n",
            2,
            2,
        );
        // left (1, 0) = g, up (0, 1) = p: no corner at all.
        let h = GenerationHeuristic::new(7, 3, GenerationPolicy::Local);
        assert!(h.forbidden_colors(&board, Cell::new(1, 1)).is_empty());

        let corner = partial(
            "ob\n\
             b.",
            2,
            2,
        );
        // Corner without any extension cell: local rules let it through.
        assert!(h.forbidden_colors(&corner, Cell::new(1, 1)).is_empty());

        let strict = GenerationHeuristic::new(7, 3, GenerationPolicy::Strict);
        assert!(strict
            .match_completing_colors(&corner, Cell::new(1, 1))
            .unwrap()
            .contains(color("blue")));
    }

    #[test]
    fn test_local_rules_forbid_at_most_two_colors() {
        // Row run of green on the left, column run of blue above.
        let board = partial(
            "gbgb\n\
             bgbb\n\
             bgg.",
            3,
            4,
        );
        let h = GenerationHeuristic::new(3, 3, GenerationPolicy::Local);
        let forbidden = h.forbidden_colors(&board, Cell::new(2, 3));
        assert!(forbidden.contains(color("green")));
        assert!(forbidden.contains(color("blue")));
        assert_eq!(forbidden.len(), 2);

        let mut rng = SimpleRng::new(5);
        for _ in 0..20 {
            let picked = h.safe_color_for(&board, Cell::new(2, 3), &mut rng).unwrap();
            assert_eq!(picked, color("orange"));
        }
    }

    #[test]
    fn test_fallback_when_everything_forbidden() {
        // A two-color palette with both colors ruled out.
        let board = partial(
            "gbgb\n\
             bgbb\n\
             bgg.",
            3,
            4,
        );
        let h = GenerationHeuristic::new(2, 3, GenerationPolicy::Local);
        let forbidden = h.forbidden_colors(&board, Cell::new(2, 3));
        assert!(h.palette().difference(forbidden).is_empty());

        let mut rng = SimpleRng::new(5);
        let (picked, fell_back) = h.choose(&board, Cell::new(2, 3), &mut rng).unwrap();
        assert!(fell_back);
        assert!(h.palette().contains(picked));

        // Strict with single-cell matches forbids every color everywhere.
        let strict = GenerationHeuristic::new(4, 1, GenerationPolicy::Strict);
        let grid = strict.generate(3, 3, &mut SimpleRng::new(9)).unwrap();
        assert!(grid.tiles().all(|(_, tile)| strict.palette().contains(tile.color)));
    }

    #[test]
    fn test_empty_palette_is_an_error() {
        for policy in [GenerationPolicy::Local, GenerationPolicy::Strict] {
            let h = GenerationHeuristic::new(0, 3, policy);
            assert_eq!(
                h.generate(2, 2, &mut SimpleRng::new(1)),
                Err(BoardError::EmptyPalette)
            );
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let h = GenerationHeuristic::new(7, 3, GenerationPolicy::Local);
        let a = h.generate(6, 6, &mut SimpleRng::new(42)).unwrap();
        let b = h.generate(6, 6, &mut SimpleRng::new(42)).unwrap();
        assert_eq!(a, b);
        assert!(a.check_invariants());
    }

    #[test]
    fn test_safe_color_out_of_bounds() {
        let board = PartialBoard::new(2, 2);
        for policy in [GenerationPolicy::Local, GenerationPolicy::Strict] {
            let h = GenerationHeuristic::new(7, 3, policy);
            let err = h
                .safe_color_for(&board, Cell::new(2, 0), &mut SimpleRng::new(1))
                .unwrap_err();
            assert!(matches!(err, BoardError::OutOfBounds { .. }));
        }
    }
}
