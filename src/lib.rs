//! BLXST - rules engine for a 9x9 block-placement puzzle
//!
//! Pieces are dealt three at a time and dropped anywhere they fit. A full
//! row or column clears, clears in a row build a combo multiplier, and the
//! game ends when nothing in the hand fits on the board.
//!
//! ```
//! use blxst::game::GameSession;
//!
//! let mut game = GameSession::with_seed(7);
//! let piece = game.hand().pieces()[0];
//! let placed = game.place_piece(piece.id, 0, 0).unwrap();
//! assert_eq!(placed.score_delta, piece.cell_count() as u64);
//! ```

pub mod board;
pub mod catalog;
pub mod clear;
pub mod game;
pub mod generator;
pub mod hand;
pub mod piece;
pub mod render;
pub mod save;
pub mod score;
pub mod settings;

pub use board::{BOARD_SIZE, Board, Cell};
pub use catalog::{BlockColor, ShapeId};
pub use clear::PlaceError;
pub use game::{GameSession, Placement, SessionState};
pub use piece::{Piece, PieceId};
