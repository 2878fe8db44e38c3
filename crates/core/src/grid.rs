//! Grid module - owns the board's tiles
//!
//! The board is a `rows x columns` grid where every cell holds exactly one tile.
//! Tiles live in an arena of slots; the grid stores, per cell, the slot of the
//! tile occupying it, and each slot records the cell it currently sits in.
//! Shifting a line moves slot indices between cells, so a tile keeps its
//! identity as it travels. Coordinates are `(row, col)` with both indices
//! starting at 0; storage is row-major.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{Axis, BoardError, Cell, ColorId, ColorSet, Shift, Tile, TileId, MAX_BOARD_SIDE};

/// Read access to cell colors
///
/// `color_at` returns `None` for cells outside the grid and for cells that
/// hold no tile yet (only partially built boards have those).
pub trait ColorGrid {
    fn rows(&self) -> usize;
    fn columns(&self) -> usize;
    fn color_at(&self, cell: Cell) -> Option<ColorId>;

    fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows() && cell.col < self.columns()
    }
}

/// Normalize a signed step count into `[0, len)`
pub fn normalize_steps(steps: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (steps as i64).rem_euclid(len as i64) as usize
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TileSlot {
    generation: u32,
    color: ColorId,
    cell: Cell,
}

/// The board - a fixed-size grid of tiles with cyclic line shifts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    rows: usize,
    columns: usize,
    /// Tile arena, indexed by `TileId::slot`
    slots: Vec<TileSlot>,
    /// Slot occupying each cell, row-major (row * columns + col)
    cells: Vec<u32>,
}

impl GridModel {
    /// Build a grid by asking `color_for` for each cell in row-major order
    pub fn from_fn(
        rows: usize,
        columns: usize,
        mut color_for: impl FnMut(Cell) -> ColorId,
    ) -> Result<Self, BoardError> {
        if rows == 0 || columns == 0 {
            return Err(BoardError::EmptyBoard);
        }
        if rows > MAX_BOARD_SIDE || columns > MAX_BOARD_SIDE {
            return Err(BoardError::TooLarge {
                rows,
                columns,
                max: MAX_BOARD_SIDE,
            });
        }

        let mut slots = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                let cell = Cell::new(row, col);
                slots.push(TileSlot {
                    generation: 0,
                    color: color_for(cell),
                    cell,
                });
            }
        }
        let cells = (0..(rows * columns) as u32).collect();

        Ok(Self {
            rows,
            columns,
            slots,
            cells,
        })
    }

    /// Build a grid from row-major colors
    pub fn from_colors(rows: usize, columns: usize, colors: &[ColorId]) -> Result<Self, BoardError> {
        if colors.len() != rows * columns {
            return Err(BoardError::RaggedRow {
                row: colors.len() / columns.max(1),
                expected: columns,
                found: colors.len() % columns.max(1),
            });
        }
        Self::from_fn(rows, columns, |cell| colors[cell.row * columns + cell.col])
    }

    /// Parse the text form produced by `Display`: one line per row, one color
    /// symbol per cell. Blank lines and whitespace inside a line are ignored.
    ///
    /// ```
    /// use chuzzle_board_core::GridModel;
    ///
    /// let grid = GridModel::parse("bbr\ngyy").unwrap();
    /// assert_eq!(grid.rows(), 2);
    /// assert_eq!(grid.columns(), 3);
    /// assert_eq!(grid.to_string(), "bbr\ngyy\n");
    /// ```
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let mut colors = Vec::new();
        let mut rows = 0;
        let mut columns = 0;

        for line in text.lines() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.is_empty() {
                continue;
            }
            if rows == 0 {
                columns = symbols.len();
            } else if symbols.len() != columns {
                return Err(BoardError::RaggedRow {
                    row: rows,
                    expected: columns,
                    found: symbols.len(),
                });
            }
            for c in symbols {
                colors.push(ColorId::from_symbol(c).ok_or(BoardError::UnknownColor(c))?);
            }
            rows += 1;
        }

        Self::from_colors(rows, columns, &colors)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of cells (and tiles)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Calculate flat index from a cell
    #[inline(always)]
    fn index(&self, cell: Cell) -> Option<usize> {
        if cell.row >= self.rows || cell.col >= self.columns {
            return None;
        }
        Some(cell.row * self.columns + cell.col)
    }

    fn checked_index(&self, cell: Cell) -> Result<usize, BoardError> {
        self.index(cell).ok_or(BoardError::OutOfBounds {
            row: cell.row,
            col: cell.col,
            rows: self.rows,
            columns: self.columns,
        })
    }

    fn tile_in_slot(&self, slot: u32) -> Tile {
        let record = &self.slots[slot as usize];
        Tile {
            id: TileId {
                slot,
                generation: record.generation,
            },
            color: record.color,
        }
    }

    /// Get the tile at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Result<Tile, BoardError> {
        self.tile(Cell::new(row, col))
    }

    pub fn tile(&self, cell: Cell) -> Result<Tile, BoardError> {
        let idx = self.checked_index(cell)?;
        Ok(self.tile_in_slot(self.cells[idx]))
    }

    pub fn color(&self, row: usize, col: usize) -> Result<ColorId, BoardError> {
        self.get(row, col).map(|t| t.color)
    }

    /// Current cell of a tile, `None` if the handle is stale or unknown
    pub fn cell_of(&self, id: TileId) -> Option<Cell> {
        self.slots
            .get(id.slot as usize)
            .filter(|record| record.generation == id.generation)
            .map(|record| record.cell)
    }

    /// Overwrite the tile at `(row, col)` with a new tile of `color`
    ///
    /// The replaced tile's identity is retired: the new tile reuses the slot
    /// under the next generation. Meant for board setup and tests; shifts
    /// never recolor tiles.
    pub fn set_tile(&mut self, row: usize, col: usize, color: ColorId) -> Result<TileId, BoardError> {
        let idx = self.checked_index(Cell::new(row, col))?;
        let slot = self.cells[idx];
        let record = &mut self.slots[slot as usize];
        record.generation = record.generation.wrapping_add(1);
        record.color = color;
        let id = TileId {
            slot,
            generation: record.generation,
        };
        debug_assert!(self.check_invariants());
        Ok(id)
    }

    /// Cyclically rotate row `row` by `steps` cells
    ///
    /// Positive steps move tiles toward higher column indices. Returns the
    /// normalized step count actually applied (0 means nothing moved).
    pub fn shift_row(&mut self, row: usize, steps: i32) -> Result<usize, BoardError> {
        if row >= self.rows {
            return Err(BoardError::LineOutOfBounds {
                axis: Axis::Row,
                line: row,
                count: self.rows,
            });
        }
        let k = normalize_steps(steps, self.columns);
        if k == 0 {
            return Ok(0);
        }

        let start = row * self.columns;
        self.cells[start..start + self.columns].rotate_right(k);
        for col in 0..self.columns {
            let slot = self.cells[start + col];
            self.slots[slot as usize].cell = Cell::new(row, col);
        }

        debug_assert!(self.check_invariants());
        Ok(k)
    }

    /// Cyclically rotate column `col` by `steps` cells
    ///
    /// Positive steps move tiles toward higher row indices. Returns the
    /// normalized step count actually applied.
    pub fn shift_column(&mut self, col: usize, steps: i32) -> Result<usize, BoardError> {
        if col >= self.columns {
            return Err(BoardError::LineOutOfBounds {
                axis: Axis::Column,
                line: col,
                count: self.columns,
            });
        }
        let k = normalize_steps(steps, self.rows);
        if k == 0 {
            return Ok(0);
        }

        let column: ArrayVec<u32, MAX_BOARD_SIDE> = (0..self.rows)
            .map(|row| self.cells[row * self.columns + col])
            .collect();
        for (row, slot) in column.into_iter().enumerate() {
            let new_row = (row + k) % self.rows;
            self.cells[new_row * self.columns + col] = slot;
            self.slots[slot as usize].cell = Cell::new(new_row, col);
        }

        debug_assert!(self.check_invariants());
        Ok(k)
    }

    /// Apply a row or column shift
    pub fn apply(&mut self, shift: Shift) -> Result<usize, BoardError> {
        match shift.axis {
            Axis::Row => self.shift_row(shift.line, shift.steps),
            Axis::Column => self.shift_column(shift.line, shift.steps),
        }
    }

    /// Length of the lines moved by a shift along `axis`
    pub fn line_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.columns,
            Axis::Column => self.rows,
        }
    }

    /// Number of lines along `axis`
    pub fn line_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.rows,
            Axis::Column => self.columns,
        }
    }

    /// Cells of one row or column, in increasing index order
    pub fn line_cells(&self, axis: Axis, line: usize) -> Result<ArrayVec<Cell, MAX_BOARD_SIDE>, BoardError> {
        let count = self.line_count(axis);
        if line >= count {
            return Err(BoardError::LineOutOfBounds { axis, line, count });
        }
        let cells = (0..self.line_len(axis))
            .map(|i| match axis {
                Axis::Row => Cell::new(line, i),
                Axis::Column => Cell::new(i, line),
            })
            .collect();
        Ok(cells)
    }

    /// All cells with their tiles, row-major
    pub fn tiles(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.cells.iter().enumerate().map(move |(idx, &slot)| {
            (
                Cell::new(idx / self.columns, idx % self.columns),
                self.tile_in_slot(slot),
            )
        })
    }

    /// Fails on the first tile, row-major, whose color the first
    /// `palette_size` colors do not include
    pub fn check_palette(&self, palette_size: u8) -> Result<(), BoardError> {
        let palette = ColorSet::palette(palette_size);
        match self.tiles().find(|(_, tile)| !palette.contains(tile.color)) {
            Some((_, tile)) => Err(BoardError::ColorOutOfPalette {
                color: tile.color.index(),
                palette_size,
            }),
            None => Ok(()),
        }
    }

    /// Check the cell/tile bijection: every cell holds one slot, every slot
    /// is held by exactly one cell, and each slot knows where it is.
    pub fn check_invariants(&self) -> bool {
        if self.cells.len() != self.rows * self.columns || self.slots.len() != self.cells.len() {
            return false;
        }
        let mut seen = vec![false; self.slots.len()];
        for (idx, &slot) in self.cells.iter().enumerate() {
            let Some(record) = self.slots.get(slot as usize) else {
                return false;
            };
            if std::mem::replace(&mut seen[slot as usize], true) {
                return false;
            }
            if self.index(record.cell) != Some(idx) {
                return false;
            }
        }
        true
    }
}

impl ColorGrid for GridModel {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn color_at(&self, cell: Cell) -> Option<ColorId> {
        self.index(cell)
            .map(|idx| self.slots[self.cells[idx] as usize].color)
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.columns {
                let slot = self.cells[row * self.columns + col];
                write!(f, "{}", self.slots[slot as usize].color.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
