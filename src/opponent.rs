//! Target selection for the automated side.

use log::debug;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;

use crate::bitboard::Layer;
use crate::common::ShotResult;
use crate::config::MAX_TARGET_ATTEMPTS;
use crate::coordinate::Coordinate;

/// Strategy used by the automated opponent.
///
/// The opponent only sees where it has already fired and what happened,
/// never the human's ship layout.
pub trait Opponent: Send {
    /// Pick the next cell to fire at. `None` means every cell has been shot.
    fn select_target(&mut self, rng: &mut SmallRng, hits: &Layer, misses: &Layer)
        -> Option<Coordinate>;

    /// Inform the strategy of the result of its last shot.
    fn handle_shot_result(&mut self, _target: Coordinate, _result: ShotResult) {}
}

/// Fires at a uniformly random cell that has not been shot yet.
#[derive(Debug, Clone, Copy)]
pub struct RandomOpponent {
    max_attempts: usize,
}

impl RandomOpponent {
    pub fn new() -> Self {
        Self::with_max_attempts(MAX_TARGET_ATTEMPTS)
    }

    /// Number of random draws before falling back to choosing among the
    /// remaining unshot cells directly.
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self { max_attempts }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        hits: &Layer,
        misses: &Layer,
    ) -> Option<Coordinate> {
        let shot = *hits | *misses;
        for _ in 0..self.max_attempts {
            let target = Coordinate::random(rng);
            if !shot.contains(target) {
                return Some(target);
            }
        }
        debug!(
            "no free cell after {} draws, choosing among {} unshot cells",
            self.max_attempts,
            (!shot).count_ones()
        );
        (!shot).coordinates().choose(rng)
    }
}
