//! Snapshot module - read-only view of a board for presentation layers
//!
//! A [`BoardSnapshot`] is plain serializable data. Renderers read it, never the
//! live model, and `snapshot_into` refills an existing snapshot so a per-frame
//! caller keeps one allocation alive.

use serde::Serialize;

use crate::grid::GridModel;
use crate::types::{ColorId, Shift, TileId};

/// One tile and where it sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileSnapshot {
    pub id: TileId,
    pub color: ColorId,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub columns: usize,
    /// Row-major, one entry per cell
    pub tiles: Vec<TileSnapshot>,
    /// FNV-1a over the row-major color indices
    pub board_hash: u64,
    pub busy: bool,
    pub last_shift: Option<Shift>,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.columns = 0;
        self.tiles.clear();
        self.board_hash = 0;
        self.busy = false;
        self.last_shift = None;
    }

    pub fn tile_at(&self, row: usize, col: usize) -> Option<&TileSnapshot> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.tiles.get(row * self.columns + col)
    }
}

/// FNV-1a 64-bit over a byte stream
pub fn fnv1a64(bytes: impl IntoIterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

/// Hash of the board's colors, independent of tile identity
pub fn board_hash(grid: &GridModel) -> u64 {
    fnv1a64(grid.tiles().map(|(_, tile)| tile.color.index()))
}

impl GridModel {
    /// Fill the board part of `out`; `busy` and `last_shift` are left alone
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.rows = self.rows();
        out.columns = self.columns();
        out.tiles.clear();
        out.tiles.extend(self.tiles().map(|(cell, tile)| TileSnapshot {
            id: tile.id,
            color: tile.color,
            row: cell.row,
            col: cell.col,
        }));
        out.board_hash = board_hash(self);
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut out = BoardSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}
