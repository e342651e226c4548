//! Placement and line-clear resolution
//!
//! A placement writes the piece, scores one point per cell, then resolves
//! clears: every complete row and column is emptied at once, scored, and
//! the board is scanned again in case the clear completed more lines.

use crate::board::Board;
use crate::piece::{Piece, PieceId};
use crate::score::Score;
use std::fmt;
use tracing::{debug, info, warn};

/// Guard against runaway cascades. Clearing only ever empties cells, so
/// real games never come close.
pub const MAX_CASCADE_DEPTH: usize = 10;

/// Why a placement was refused. Refusals never change any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// No piece with this id is in the hand
    UnknownPiece(PieceId),
    /// The piece does not fit at this origin
    InvalidPlacement { id: PieceId, x: i32, y: i32 },
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceError::UnknownPiece(id) => write!(f, "piece {id} is not in the hand"),
            PlaceError::InvalidPlacement { id, x, y } => {
                write!(f, "piece {id} does not fit at ({x}, {y})")
            }
        }
    }
}

impl std::error::Error for PlaceError {}

/// Totals over a whole cascade chain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Lines cleared, summed over every cascade step
    pub lines: usize,
    /// Distinct cells emptied
    pub cells: usize,
    /// Line-clear points awarded, combo included
    pub points: u64,
    /// Cascade steps that found at least one line
    pub steps: usize,
}

impl ClearReport {
    fn then(self, rest: ClearReport) -> ClearReport {
        ClearReport {
            lines: self.lines + rest.lines,
            cells: self.cells + rest.cells,
            points: self.points + rest.points,
            steps: self.steps + rest.steps,
        }
    }
}

/// Outcome of an accepted placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Cells written by the piece (also its placement points)
    pub cells_placed: usize,
    pub clears: ClearReport,
}

impl PlacementReport {
    /// Everything this placement added to the score
    pub fn score_delta(&self) -> u64 {
        self.cells_placed as u64 + self.clears.points
    }
}

/// Place `piece` with its mask's top-left at `(x, y)` and resolve clears.
/// Nothing changes if the piece does not fit.
pub fn apply_placement(
    board: &mut Board,
    score: &mut Score,
    piece: &Piece,
    x: i32,
    y: i32,
) -> Result<PlacementReport, PlaceError> {
    if !board.can_place(piece, x, y) {
        debug!(id = %piece.id, x, y, "placement rejected");
        return Err(PlaceError::InvalidPlacement { id: piece.id, x, y });
    }

    let cells_placed = board.place(piece, x, y);
    score.add_placement(cells_placed);
    debug!(id = %piece.id, shape = ?piece.shape, x, y, cells_placed, "piece placed");

    let clears = resolve_clears(board, score);
    Ok(PlacementReport {
        cells_placed,
        clears,
    })
}

/// Clear every complete line, repeating until the board is stable.
///
/// Each step that finds lines increments the combo and scores
/// `line_score(lines) * combo`. A placement whose first scan finds
/// nothing resets the combo.
pub fn resolve_clears(board: &mut Board, score: &mut Score) -> ClearReport {
    resolve_at(board, score, 0)
}

fn resolve_at(board: &mut Board, score: &mut Score, depth: usize) -> ClearReport {
    if depth > MAX_CASCADE_DEPTH {
        warn!(depth, "cascade depth limit reached");
        return ClearReport::default();
    }

    let lines = board.complete_lines();
    if lines.is_empty() {
        if depth == 0 {
            score.reset_combo();
        }
        return ClearReport::default();
    }

    let count = lines.count();
    let cells = board.clear_lines(&lines);
    let points = score.add_clear(count);
    info!(
        depth,
        rows = ?lines.rows,
        cols = ?lines.cols,
        combo = score.combo,
        points,
        "lines cleared"
    );

    let step = ClearReport {
        lines: count,
        cells,
        points,
        steps: 1,
    };
    step.then(resolve_at(board, score, depth + 1))
}
