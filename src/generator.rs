//! Weighted piece generator
//!
//! Deals batches of three pieces. Selection is weighted by the catalog,
//! and the weights shift toward complex shapes as the score grows.

use crate::catalog::{BlockColor, Complexity, ShapeId};
use crate::piece::{Piece, PieceId};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Pieces dealt per batch
pub const HAND_SIZE: usize = 3;

/// Score needed per difficulty level
const DIFFICULTY_STEP: u64 = 100;

/// Redraws allowed per slot before a repeated shape is accepted
const MAX_DEDUPE_ATTEMPTS: usize = 10;

/// Difficulty level for a score
pub fn difficulty(score: u64) -> u64 {
    score / DIFFICULTY_STEP
}

/// Selection weight of `shape` at `difficulty`
pub fn adjusted_weight(shape: ShapeId, difficulty: u64) -> u64 {
    let weight = u64::from(shape.weight());
    if difficulty == 0 {
        return weight;
    }
    match shape.complexity() {
        Complexity::Complex => weight + difficulty / 2,
        Complexity::Simple => weight.saturating_sub(difficulty * 3 / 10).max(1),
        Complexity::Standard => weight,
    }
}

/// Flat pool holding each shape `adjusted_weight` times
pub fn weighted_pool(score: u64) -> Vec<ShapeId> {
    let level = difficulty(score);
    ShapeId::all()
        .into_iter()
        .flat_map(|shape| std::iter::repeat_n(shape, adjusted_weight(shape, level) as usize))
        .collect()
}

/// Piece generator with its own RNG and id counter
#[derive(Debug, Clone)]
pub struct Generator {
    rng: ChaCha8Rng,
    next_id: u64,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator seeded from the OS
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Make sure future ids are greater than `id` (used after restoring a hand)
    pub fn reserve_ids_through(&mut self, id: PieceId) {
        self.next_id = self.next_id.max(id.0 + 1);
    }

    fn fresh_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        id
    }

    fn draw_shape(&mut self, pool: &[ShapeId]) -> ShapeId {
        pool[self.rng.gen_range(0..pool.len())]
    }

    fn draw_color(&mut self) -> BlockColor {
        let colors = BlockColor::all();
        colors[self.rng.gen_range(0..colors.len())]
    }

    /// Deal a shuffled batch of [`HAND_SIZE`] pieces for the given score
    pub fn generate_batch(&mut self, score: u64) -> Vec<Piece> {
        let pool = weighted_pool(score);
        let batch = self.draw_batch(&pool);
        debug!(
            score,
            difficulty = difficulty(score),
            shapes = ?batch.iter().map(|p| p.shape).collect::<Vec<_>>(),
            "dealt batch"
        );
        batch
    }

    /// Draw [`HAND_SIZE`] pieces from a non-empty `pool`, then shuffle them
    fn draw_batch(&mut self, pool: &[ShapeId]) -> Vec<Piece> {
        let mut batch: Vec<Piece> = Vec::with_capacity(HAND_SIZE);
        for _ in 0..HAND_SIZE {
            let shape = pick_shape(&batch, || self.draw_shape(pool));
            let color = self.draw_color();
            let id = self.fresh_id();
            batch.push(Piece::new(id, shape, color));
        }
        batch.shuffle(&mut self.rng);
        batch
    }
}

/// Draw a shape not already in `taken`, giving up after
/// [`MAX_DEDUPE_ATTEMPTS`] draws and keeping the last one
fn pick_shape(taken: &[Piece], mut draw: impl FnMut() -> ShapeId) -> ShapeId {
    let mut shape = draw();
    let mut attempts = 1;
    while attempts < MAX_DEDUPE_ATTEMPTS && taken.iter().any(|p| p.shape == shape) {
        shape = draw();
        attempts += 1;
    }
    if taken.iter().any(|p| p.shape == shape) {
        debug!(?shape, attempts, "accepting repeated shape");
    }
    shape
}
