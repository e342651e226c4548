//! Game session: board, hand and score across turns

use crate::board::Board;
use crate::clear::{self, PlaceError};
use crate::generator::Generator;
use crate::hand::Hand;
use crate::piece::{Piece, PieceId};
use crate::score::Score;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything needed to resume a game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub board: Board,
    pub hand: Hand,
    #[serde(flatten)]
    pub score: Score,
}

/// Result of an accepted placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Lines cleared across the whole cascade
    pub lines_cleared: usize,
    /// Points added, placement and clears together
    pub score_delta: u64,
    /// Combo after the placement
    pub combo: u32,
    /// Whether a new batch was dealt
    pub refilled: bool,
    /// Whether no piece in the hand can be placed anymore
    pub game_over: bool,
}

/// A single game in progress
#[derive(Debug, Clone)]
pub struct GameSession {
    state: SessionState,
    generator: Generator,
    game_over: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Start a new game with an OS-seeded generator
    pub fn new() -> Self {
        Self::from_state(SessionState::default(), Generator::new())
    }

    /// Start a reproducible game
    pub fn with_seed(seed: u64) -> Self {
        Self::from_state(SessionState::default(), Generator::with_seed(seed))
    }

    /// Resume from a saved state. An empty hand is dealt immediately and
    /// the game-over check runs against whatever the hand holds.
    pub fn from_state(state: SessionState, mut generator: Generator) -> Self {
        if let Some(id) = state.hand.max_id() {
            generator.reserve_ids_through(id);
        }
        let mut session = Self {
            state,
            generator,
            game_over: false,
        };
        session.deal();
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn hand(&self) -> &Hand {
        &self.state.hand
    }

    pub fn score(&self) -> &Score {
        &self.state.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether the piece `id` fits at `(x, y)`. Never changes state.
    pub fn can_place(&self, id: PieceId, x: i32, y: i32) -> bool {
        self.state
            .hand
            .get(id)
            .is_some_and(|piece| self.state.board.can_place(piece, x, y))
    }

    /// Place the piece `id` with the top-left of its mask at `(x, y)`.
    ///
    /// On success the piece leaves the hand, clears are resolved and
    /// scored, the hand is refilled once empty, and the game-over check
    /// runs. On failure nothing changes.
    pub fn place_piece(&mut self, id: PieceId, x: i32, y: i32) -> Result<Placement, PlaceError> {
        let piece: Piece = match self.state.hand.get(id) {
            Some(piece) => *piece,
            None => {
                debug!(%id, "placement of unknown piece");
                return Err(PlaceError::UnknownPiece(id));
            }
        };

        let report = clear::apply_placement(
            &mut self.state.board,
            &mut self.state.score,
            &piece,
            x,
            y,
        )?;
        self.state.hand.take(id);

        let refilled = self.deal();
        if !refilled {
            self.check_game_over();
        }

        Ok(Placement {
            lines_cleared: report.clears.lines,
            score_delta: report.score_delta(),
            combo: self.state.score.combo,
            refilled,
            game_over: self.game_over,
        })
    }

    /// Deal a new batch if the hand is empty, then re-check for game over.
    /// Returns whether a batch was dealt.
    pub fn deal(&mut self) -> bool {
        if !self.state.hand.is_empty() {
            return false;
        }
        let batch = self.generator.generate_batch(self.state.score.points);
        self.state.hand.fill(batch);
        self.check_game_over();
        true
    }

    fn check_game_over(&mut self) {
        let stuck = self.state.hand.is_stuck(&self.state.board);
        if stuck {
            self.state.score.raise_high_score();
            if !self.game_over {
                info!(
                    score = self.state.score.points,
                    high_score = self.state.score.high_score,
                    "game over"
                );
            }
        }
        self.game_over = stuck;
    }

    /// Reset board, hand and score. The high score is raised first and
    /// survives. The hand is left empty; call [`GameSession::deal`].
    pub fn restart(&mut self) {
        info!(
            score = self.state.score.points,
            high_score = self.state.score.high_score,
            "restarting"
        );
        self.state.score.restart();
        self.state.board = Board::new();
        self.state.hand.clear();
        self.game_over = false;
    }

    /// Restart and forget the high score too. The hand is left empty.
    pub fn reset_all(&mut self) {
        self.restart();
        self.state.score.high_score = 0;
        info!("high score reset");
    }
}
