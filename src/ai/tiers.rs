//! The three difficulty tiers.

use crate::core::GameRng;
use crate::game::TurnView;
use crate::rules::Mark;

use super::eval::{evaluate_advanced, evaluate_basic};
use super::Strategy;

/// Passive players skip anything below this; they are never penalized.
pub const PASSIVE_THRESHOLD: f64 = 2.0;

/// Score every legal mark, best first.
fn ranked(view: &TurnView<'_>, eval: fn(&TurnView<'_>, Mark) -> f64) -> Vec<(Mark, f64)> {
    let mut scored: Vec<(Mark, f64)> = view.legal_marks().into_iter().map(|m| (m, eval(view, m))).collect();
    scored.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    scored
}

fn threshold(view: &TurnView<'_>, active: f64) -> f64 {
    if view.is_active {
        active
    } else {
        PASSIVE_THRESHOLD
    }
}

/// Coin-flip player: half the time it skips, otherwise any legal mark.
#[derive(Clone, Debug, Default)]
pub struct EasyStrategy;

impl Strategy for EasyStrategy {
    fn name(&self) -> &'static str {
        "easy"
    }

    fn choose_moves(&self, view: &TurnView<'_>, rng: &mut GameRng) -> Vec<Mark> {
        let marks = view.legal_marks();
        if marks.is_empty() || rng.gen_bool(0.5) {
            return Vec::new();
        }
        rng.choose(&marks).copied().into_iter().collect()
    }
}

/// Basic evaluation with a little noise.
///
/// Takes the best mark 85% of the time, otherwise one of the top three.
#[derive(Clone, Debug)]
pub struct MediumStrategy {
    pub best_probability: f64,
    pub active_threshold: f64,
}

impl Default for MediumStrategy {
    fn default() -> Self {
        Self {
            best_probability: 0.85,
            active_threshold: 0.0,
        }
    }
}

impl Strategy for MediumStrategy {
    fn name(&self) -> &'static str {
        "medium"
    }

    fn choose_moves(&self, view: &TurnView<'_>, rng: &mut GameRng) -> Vec<Mark> {
        let scored = ranked(view, evaluate_basic);
        let Some(&(_, best)) = scored.first() else {
            return Vec::new();
        };
        if best < threshold(view, self.active_threshold) {
            return Vec::new();
        }

        let pick = if rng.gen_bool(self.best_probability) {
            scored.first()
        } else {
            rng.choose(&scored[..scored.len().min(3)])
        };
        pick.map(|&(m, _)| m).into_iter().collect()
    }
}

/// Advanced evaluation, always the best mark.
///
/// As the active player it would rather take a penalty than make a mark
/// scoring below `active_threshold`.
#[derive(Clone, Debug)]
pub struct HardStrategy {
    pub active_threshold: f64,
}

impl Default for HardStrategy {
    fn default() -> Self {
        Self { active_threshold: -15.0 }
    }
}

impl Strategy for HardStrategy {
    fn name(&self) -> &'static str {
        "hard"
    }

    fn choose_moves(&self, view: &TurnView<'_>, _rng: &mut GameRng) -> Vec<Mark> {
        match ranked(view, evaluate_advanced).first() {
            Some(&(mark, score)) if score >= threshold(view, self.active_threshold) => vec![mark],
            _ => Vec::new(),
        }
    }
}
