//! The player's hand and the no-moves-left check

use crate::board::Board;
use crate::piece::{Piece, PieceId};
use serde::{Deserialize, Serialize};

/// Pieces available to place, in deal order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    pieces: Vec<Piece>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Remove the piece with this id, keeping the others in order
    pub fn take(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(index))
    }

    /// Replace the contents with a freshly dealt batch
    pub fn fill(&mut self, batch: Vec<Piece>) {
        self.pieces = batch;
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    /// Largest id held, if any
    pub fn max_id(&self) -> Option<PieceId> {
        self.pieces.iter().map(|p| p.id).max()
    }

    /// True when no piece in the hand fits anywhere on the board.
    /// An empty hand is waiting to be refilled and is never terminal.
    pub fn is_stuck(&self, board: &Board) -> bool {
        !self.is_empty() && self.pieces.iter().all(|p| !board.has_room_for(p))
    }
}

impl From<Vec<Piece>> for Hand {
    fn from(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BOARD_SIZE, Cell};
    use crate::catalog::{BlockColor, ShapeId};

    fn piece(id: u64, shape: ShapeId) -> Piece {
        Piece::new(PieceId(id), shape, BlockColor::Gold)
    }

    fn full_board_except(holes: &[(i32, i32)]) -> Board {
        let mut board = Board::new();
        for y in 0..BOARD_SIZE as i32 {
            for x in 0..BOARD_SIZE as i32 {
                if !holes.contains(&(x, y)) {
                    board.set(x, y, Cell::Filled(BlockColor::Red));
                }
            }
        }
        board
    }

    #[test]
    fn test_take_by_identity() {
        let mut hand = Hand::from(vec![
            piece(1, ShapeId::Single),
            piece(2, ShapeId::Single),
            piece(3, ShapeId::Square),
        ]);
        assert_eq!(hand.take(PieceId(2)).map(|p| p.id), Some(PieceId(2)));
        assert_eq!(hand.take(PieceId(2)), None);
        let ids: Vec<_> = hand.pieces().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PieceId(1), PieceId(3)]);
        assert_eq!(hand.max_id(), Some(PieceId(3)));
    }

    #[test]
    fn test_empty_hand_is_not_stuck() {
        let board = full_board_except(&[]);
        assert!(!Hand::new().is_stuck(&board));
    }

    #[test]
    fn test_big_square_without_room() {
        // a checkerboard of single holes has no empty 3x3 area
        let holes: Vec<_> = (0..9)
            .flat_map(|y| (0..9).map(move |x| (x, y)))
            .filter(|(x, y)| (x + y) % 2 == 0)
            .collect();
        let board = full_board_except(&holes);
        let hand = Hand::from(vec![piece(1, ShapeId::Square3x3)]);
        assert!(hand.is_stuck(&board));
    }

    #[test]
    fn test_isolated_hole_blocks_vertical_domino() {
        let board = full_board_except(&[(4, 4)]);
        let domino = piece(1, ShapeId::Line2v);
        for y in 0..BOARD_SIZE as i32 {
            for x in 0..BOARD_SIZE as i32 {
                assert!(!board.can_place(&domino, x, y));
            }
        }
        assert!(Hand::from(vec![domino]).is_stuck(&board));
    }

    #[test]
    fn test_one_fitting_piece_is_enough() {
        let board = full_board_except(&[(4, 4)]);
        let hand = Hand::from(vec![piece(1, ShapeId::Line2v), piece(2, ShapeId::Single)]);
        assert!(!hand.is_stuck(&board));
    }

    #[test]
    fn test_serializes_as_list() {
        let hand = Hand::from(vec![piece(5, ShapeId::Line2h)]);
        let json = serde_json::to_string(&hand).unwrap();
        assert_eq!(json, r#"[{"id":5,"shape":"line2h","color":"gold"}]"#);
    }
}
