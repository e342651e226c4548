//! Score, combo and high score bookkeeping

use serde::{Deserialize, Serialize};

/// Base points for clearing `lines` lines in one resolution step
pub fn line_score(lines: usize) -> u64 {
    match lines {
        0 => 0,
        1 => 10,
        2 => 25,
        _ => 50,
    }
}

/// Scoring state for one game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Current score
    #[serde(rename = "score")]
    pub points: u64,
    /// Consecutive successful clears
    pub combo: u32,
    /// Best score seen, kept across restarts
    pub high_score: u64,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score carrying over a previous high score
    pub fn with_high_score(high_score: u64) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    /// One point per placed cell
    pub fn add_placement(&mut self, cells: usize) -> u64 {
        let points = cells as u64;
        self.points += points;
        points
    }

    /// Apply a clear of `lines` lines: bump the combo, then add the line
    /// score times the new combo. Returns the points awarded.
    pub fn add_clear(&mut self, lines: usize) -> u64 {
        self.combo += 1;
        let points = line_score(lines) * u64::from(self.combo);
        self.points += points;
        self.raise_high_score();
        points
    }

    /// Called when a placement clears nothing
    pub fn reset_combo(&mut self) {
        self.combo = 0;
    }

    /// Lift the high score to the current score if it is higher
    pub fn raise_high_score(&mut self) {
        self.high_score = self.high_score.max(self.points);
    }

    /// Start over, keeping (and first raising) the high score
    pub fn restart(&mut self) {
        self.raise_high_score();
        *self = Self::with_high_score(self.high_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_score_tiers() {
        assert_eq!(line_score(1), 10);
        assert_eq!(line_score(2), 25);
        assert_eq!(line_score(3), 50);
        assert_eq!(line_score(7), 50);
    }

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(1), 10);
        assert_eq!(score.combo, 1);
        assert_eq!(score.points, 10);
    }

    #[test]
    fn test_combo_multiplies() {
        let mut score = Score::new();
        score.add_clear(1);
        assert_eq!(score.add_clear(2), 50);
        assert_eq!(score.add_clear(4), 150);
        assert_eq!(score.points, 10 + 50 + 150);
    }

    #[test]
    fn test_reset_combo() {
        let mut score = Score::new();
        score.add_clear(1);
        score.add_clear(1);
        score.reset_combo();
        assert_eq!(score.combo, 0);
        assert_eq!(score.add_clear(1), 10);
    }

    #[test]
    fn test_placement_does_not_raise_high_score() {
        let mut score = Score::new();
        score.add_placement(5);
        assert_eq!(score.points, 5);
        assert_eq!(score.high_score, 0);
        score.add_clear(1);
        assert_eq!(score.high_score, 15);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut score = Score {
            points: 150,
            combo: 3,
            high_score: 100,
        };
        score.restart();
        assert_eq!(score, Score::with_high_score(150));

        let mut score = Score {
            points: 20,
            combo: 0,
            high_score: 100,
        };
        score.restart();
        assert_eq!(score.high_score, 100);
    }
}
