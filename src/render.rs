//! Plain-text rendering of the board and hand

use crate::board::{BOARD_SIZE, Board, Cell};
use crate::catalog::BlockColor;
use crate::hand::Hand;
use crate::piece::Piece;
use crate::settings::VisualSettings;
use crossterm::style::{Color, Stylize};
use std::fmt::Write;

/// Gap between pieces in the hand row
const HAND_GAP: &str = "    ";

/// Terminal color for a block
fn color_of(color: BlockColor) -> Color {
    match color {
        BlockColor::Gold => Color::Yellow,
        BlockColor::Red => Color::Red,
        BlockColor::Blue => Color::Blue,
        BlockColor::Green => Color::Green,
        BlockColor::Purple => Color::Magenta,
        BlockColor::Orange => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        BlockColor::LightBlue => Color::Cyan,
    }
}

fn block(color: BlockColor, visual: &VisualSettings) -> String {
    let (filled, _) = visual.block_chars();
    if visual.color {
        filled.with(color_of(color)).to_string()
    } else {
        filled.to_string()
    }
}

/// Board with column numbers on top and row numbers on the left
pub fn render_board(board: &Board, visual: &VisualSettings) -> String {
    let (_, empty) = visual.block_chars();
    let mut out = String::from("   ");
    for x in 0..BOARD_SIZE {
        let _ = write!(out, "{x:<2}");
    }
    out.push('\n');

    for (y, row) in board.rows().enumerate() {
        let _ = write!(out, "{y:>2} ");
        for cell in row {
            match cell {
                Cell::Empty => out.push_str(empty),
                Cell::Filled(color) => out.push_str(&block(*color, visual)),
            }
        }
        out.push('\n');
    }
    out
}

/// Visible width of a piece's column in the hand row
fn column_width(piece: &Piece) -> usize {
    (piece.shape.size().0 * 2).max(4)
}

/// Hand pieces side by side, each labelled with its slot number
pub fn render_hand(hand: &Hand, visual: &VisualSettings) -> String {
    let pieces = hand.pieces();
    if pieces.is_empty() {
        return String::from("(empty hand)\n");
    }

    let height = pieces.iter().map(|p| p.shape.size().1).max().unwrap_or(0);
    let mut out = String::new();

    for (slot, piece) in pieces.iter().enumerate() {
        let label = format!("{})", slot + 1);
        let _ = write!(out, "{label:<width$}{HAND_GAP}", width = column_width(piece));
    }
    out.push('\n');

    for row in 0..height {
        for piece in pieces {
            let (shape_width, _) = piece.shape.size();
            match piece.shape.rows().get(row) {
                Some(line) => {
                    for b in line.bytes() {
                        if b == b'#' {
                            out.push_str(&block(piece.color, visual));
                        } else {
                            out.push_str("  ");
                        }
                    }
                }
                None => out.push_str(&" ".repeat(shape_width * 2)),
            }
            out.push_str(&" ".repeat(column_width(piece) - shape_width * 2));
            out.push_str(HAND_GAP);
        }
        out.push('\n');
    }
    out
}
