//! Piece instances held in the hand

use crate::catalog::{BlockColor, ShapeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a dealt piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u64);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A dealt piece: a catalog shape with its own id and color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub shape: ShapeId,
    pub color: BlockColor,
}

impl Piece {
    pub fn new(id: PieceId, shape: ShapeId, color: BlockColor) -> Self {
        Self { id, shape, color }
    }

    /// Absolute (x, y) board positions covered when the top-left of the
    /// mask sits at `(x, y)`. Positions may fall outside the board; `None`
    /// marks a position past the range of `i32`.
    pub fn positions(&self, x: i32, y: i32) -> impl Iterator<Item = Option<(i32, i32)>> + '_ {
        self.shape.cells().map(move |(row, col)| {
            let px = x.checked_add(i32::try_from(col).ok()?)?;
            let py = y.checked_add(i32::try_from(row).ok()?)?;
            Some((px, py))
        })
    }

    /// Number of filled cells, which is also the placement score
    pub fn cell_count(&self) -> usize {
        self.shape.cell_count()
    }
}
