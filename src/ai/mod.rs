//! AI players.
//!
//! Strategies are trait-based so new tiers plug in without touching the
//! session:
//! - `Strategy`: pick the marks to make for one stage from a `TurnView`
//! - `EasyStrategy`, `MediumStrategy`, `HardStrategy`: the built-in tiers
//!
//! A strategy only proposes marks. The session applies them through the same
//! validation path as a human's marks, so an illegal proposal is rejected
//! rather than trusted.

pub mod eval;
pub mod tiers;

use crate::core::{Difficulty, GameRng};
use crate::game::TurnView;
use crate::rules::Mark;

pub use eval::{evaluate_advanced, evaluate_basic};
pub use tiers::{EasyStrategy, HardStrategy, MediumStrategy, PASSIVE_THRESHOLD};

/// Move selection for an AI seat.
pub trait Strategy: Send + Sync {
    /// Short tier name, for logs.
    fn name(&self) -> &'static str;

    /// Marks to make this stage, in order. Empty means skip.
    fn choose_moves(&self, view: &TurnView<'_>, rng: &mut GameRng) -> Vec<Mark>;
}

/// The built-in strategy for a difficulty tier.
#[must_use]
pub fn strategy_for(difficulty: Difficulty) -> Box<dyn Strategy> {
    match difficulty {
        Difficulty::Easy => Box::new(EasyStrategy),
        Difficulty::Medium => Box::new(MediumStrategy::default()),
        Difficulty::Hard => Box::new(HardStrategy::default()),
    }
}
