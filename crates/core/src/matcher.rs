//! Match detection - connected same-color regions
//!
//! A match is a maximal group of same-colored cells joined through
//! up/down/left/right neighbors, of any shape, with at least
//! `min_match_count` cells. Diagonal contact does not connect cells, and
//! neither does wrapping across a board edge: lines shift cyclically, but
//! matching sees the board as a plain rectangle.
//!
//! Every query is a breadth-first flood fill. The full-board scan shares one
//! visited buffer across all fills, so each cell is expanded at most once and
//! the returned groups are pairwise disjoint.

use std::collections::VecDeque;
use std::fmt::Write as _;

use serde::Serialize;

use crate::grid::ColorGrid;
use crate::types::{Axis, BoardError, Cell, ColorId, DEFAULT_MIN_MATCH_COUNT};

/// A maximal connected same-color region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchGroup {
    pub color: ColorId,
    /// Member cells, sorted row-major
    pub cells: Vec<Cell>,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }
}

/// Read-only flood-fill matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchDetector {
    min_match_count: usize,
}

impl Default for MatchDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_MATCH_COUNT)
    }
}

impl MatchDetector {
    pub fn new(min_match_count: usize) -> Self {
        Self { min_match_count }
    }

    pub fn min_match_count(&self) -> usize {
        self.min_match_count
    }

    /// The connected same-color group containing `cell`
    pub fn find_connected_group<G: ColorGrid>(
        &self,
        grid: &G,
        cell: Cell,
    ) -> Result<MatchGroup, BoardError> {
        let color = seed_color(grid, cell)?;
        let mut visited = vec![false; grid.rows() * grid.columns()];
        Ok(flood(grid, cell, color, None, &mut visited))
    }

    /// Every group of at least `min_match_count` cells, scanned row-major
    pub fn find_all_match_groups<G: ColorGrid>(&self, grid: &G) -> Vec<MatchGroup> {
        let columns = grid.columns();
        let mut visited = vec![false; grid.rows() * columns];
        let mut groups = Vec::new();

        for row in 0..grid.rows() {
            for col in 0..columns {
                if visited[row * columns + col] {
                    continue;
                }
                let seed = Cell::new(row, col);
                let Some(color) = grid.color_at(seed) else {
                    continue;
                };

                // Marks the whole component, matched or not.
                let group = flood(grid, seed, color, None, &mut visited);
                if group.len() >= self.min_match_count {
                    tracing::trace!(
                        color = %group.color,
                        size = group.len(),
                        seed = %seed,
                        "match group found"
                    );
                    groups.push(group);
                }
            }
        }

        groups
    }

    /// True if the group containing `cell` is large enough to match
    pub fn has_match_at<G: ColorGrid>(&self, grid: &G, cell: Cell) -> Result<bool, BoardError> {
        Ok(self.find_connected_group(grid, cell)?.len() >= self.min_match_count)
    }

    /// True if any cell of the given row or column belongs to a match
    ///
    /// The group may extend off the line; it only has to touch it.
    pub fn line_has_match<G: ColorGrid>(
        &self,
        grid: &G,
        axis: Axis,
        line: usize,
    ) -> Result<bool, BoardError> {
        let (count, len) = match axis {
            Axis::Row => (grid.rows(), grid.columns()),
            Axis::Column => (grid.columns(), grid.rows()),
        };
        if line >= count {
            return Err(BoardError::LineOutOfBounds { axis, line, count });
        }

        let columns = grid.columns();
        let mut visited = vec![false; grid.rows() * columns];
        for i in 0..len {
            let cell = match axis {
                Axis::Row => Cell::new(line, i),
                Axis::Column => Cell::new(i, line),
            };
            if visited[cell.row * columns + cell.col] {
                continue;
            }
            let Some(color) = grid.color_at(cell) else {
                continue;
            };
            if flood(grid, cell, color, None, &mut visited).len() >= self.min_match_count {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// True if a tile of `color` at `cell` would belong to a match
    ///
    /// The board is not touched: the fill treats `cell` as holding `color`,
    /// whatever it holds now (or if it is still empty).
    pub fn would_create_match<G: ColorGrid>(
        &self,
        grid: &G,
        cell: Cell,
        color: ColorId,
    ) -> Result<bool, BoardError> {
        if !grid.contains(cell) {
            return Err(out_of_bounds(grid, cell));
        }
        let mut visited = vec![false; grid.rows() * grid.columns()];
        let group = flood(grid, cell, color, Some(cell), &mut visited);
        Ok(group.len() >= self.min_match_count)
    }
}

/// Human-readable listing of match groups, one line per group
pub fn describe_groups(groups: &[MatchGroup]) -> String {
    if groups.is_empty() {
        return "no matches".to_string();
    }

    let mut out = format!("{} match group(s):", groups.len());
    for (i, group) in groups.iter().enumerate() {
        let _ = write!(out, "\n  {}: {} x {} at", i + 1, group.len(), group.color);
        for (j, cell) in group.cells.iter().enumerate() {
            let sep = if j == 0 { " " } else { ", " };
            let _ = write!(out, "{}{}", sep, cell);
        }
    }
    out
}

fn out_of_bounds<G: ColorGrid>(grid: &G, cell: Cell) -> BoardError {
    BoardError::OutOfBounds {
        row: cell.row,
        col: cell.col,
        rows: grid.rows(),
        columns: grid.columns(),
    }
}

fn seed_color<G: ColorGrid>(grid: &G, cell: Cell) -> Result<ColorId, BoardError> {
    if !grid.contains(cell) {
        return Err(out_of_bounds(grid, cell));
    }
    grid.color_at(cell).ok_or(BoardError::EmptyCell {
        row: cell.row,
        col: cell.col,
    })
}

/// Breadth-first fill from `seed` over cells of `target` color.
///
/// `overridden` is a cell whose color is taken to be `target` regardless of
/// the grid. Cells are marked in `visited` as they are enqueued.
fn flood<G: ColorGrid>(
    grid: &G,
    seed: Cell,
    target: ColorId,
    overridden: Option<Cell>,
    visited: &mut [bool],
) -> MatchGroup {
    let rows = grid.rows();
    let columns = grid.columns();
    let color_of = |cell: Cell| {
        if overridden == Some(cell) {
            Some(target)
        } else {
            grid.color_at(cell)
        }
    };

    let mut cells = Vec::new();
    let mut queue = VecDeque::new();
    visited[seed.row * columns + seed.col] = true;
    queue.push_back(seed);

    while let Some(cell) = queue.pop_front() {
        cells.push(cell);

        let up = cell.row.checked_sub(1).map(|r| Cell::new(r, cell.col));
        let down = (cell.row + 1 < rows).then(|| Cell::new(cell.row + 1, cell.col));
        let left = cell.col.checked_sub(1).map(|c| Cell::new(cell.row, c));
        let right = (cell.col + 1 < columns).then(|| Cell::new(cell.row, cell.col + 1));

        for next in [up, down, left, right].into_iter().flatten() {
            let idx = next.row * columns + next.col;
            if visited[idx] || color_of(next) != Some(target) {
                continue;
            }
            visited[idx] = true;
            queue.push_back(next);
        }
    }

    cells.sort_unstable();
    MatchGroup {
        color: target,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridModel;

    fn grid(text: &str) -> GridModel {
        GridModel::parse(text).unwrap()
    }

    #[test]
    fn test_l_shape_is_one_group() {
        let g = grid(
            "bgg\n\
             bgo\n\
             bbo",
        );
        let detector = MatchDetector::default();
        let group = detector.find_connected_group(&g, Cell::new(0, 0)).unwrap();
        assert_eq!(
            group.cells,
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0), Cell::new(2, 1)]
        );
        assert!(detector.has_match_at(&g, Cell::new(2, 1)).unwrap());
        assert!(detector.has_match_at(&g, Cell::new(0, 2)).unwrap());
        assert!(!detector.has_match_at(&g, Cell::new(1, 2)).unwrap());
    }

    #[test]
    fn test_diagonals_do_not_connect() {
        let g = grid(
            "bgb\n\
             gbg\n\
             bgb",
        );
        let detector = MatchDetector::default();
        for (cell, _) in g.tiles() {
            assert_eq!(detector.find_connected_group(&g, cell).unwrap().len(), 1);
        }
        assert!(detector.find_all_match_groups(&g).is_empty());
    }

    #[test]
    fn test_edges_do_not_wrap() {
        let g = grid("bgoprb");
        let group = MatchDetector::default()
            .find_connected_group(&g, Cell::new(0, 0))
            .unwrap();
        assert_eq!(group.cells, vec![Cell::new(0, 0)]);
    }

    #[test]
    fn test_out_of_bounds_seed() {
        let g = grid("bg\nob");
        let err = MatchDetector::default()
            .find_connected_group(&g, Cell::new(2, 0))
            .unwrap_err();
        assert!(matches!(err, BoardError::OutOfBounds { row: 2, col: 0, .. }));
    }

    #[test]
    fn test_would_create_match_does_not_need_mutation() {
        let g = grid(
            "bbg\n\
             ogr",
        );
        let detector = MatchDetector::default();
        let blue = ColorId::from_str("blue").unwrap();
        let green = ColorId::from_str("green").unwrap();
        assert!(detector.would_create_match(&g, Cell::new(0, 2), blue).unwrap());
        assert!(!detector.would_create_match(&g, Cell::new(1, 0), green).unwrap());
        assert!(!detector.would_create_match(&g, Cell::new(0, 2), green).unwrap());
        assert_eq!(g.color(0, 2), Ok(green));
    }

    #[test]
    fn test_line_has_match_counts_groups_leaving_the_line() {
        let g = grid(
            "bgo\n\
             bpr\n\
             byw",
        );
        let detector = MatchDetector::default();
        assert!(detector.line_has_match(&g, Axis::Row, 0).unwrap());
        assert!(detector.line_has_match(&g, Axis::Column, 0).unwrap());
        assert!(!detector.line_has_match(&g, Axis::Column, 1).unwrap());
        assert!(detector.line_has_match(&g, Axis::Row, 3).is_err());
    }

    #[test]
    fn test_describe_groups() {
        assert_eq!(describe_groups(&[]), "no matches");

        let g = grid("rrr\ngob");
        let groups = MatchDetector::default().find_all_match_groups(&g);
        assert_eq!(
            describe_groups(&groups),
            "1 match group(s):\n  1: 3 x red at (0, 0), (0, 1), (0, 2)"
        );
    }
}
