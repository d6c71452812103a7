//! Game configuration types.
//!
//! Sessions are configured at setup by providing:
//! - `RulesConfig`: End-of-game thresholds, lock requirement, scoring knobs
//! - `Difficulty`: Which AI tier drives the non-human seats
//!
//! The defaults reproduce the standard table rules. The thresholds are plain
//! data so variants can be tried without touching the state machine.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Rule thresholds and scoring knobs.
///
/// ## Example
///
/// ```
/// use qwixx_engine::core::RulesConfig;
///
/// let rules = RulesConfig::default()
///     .with_max_penalties(3)
///     .with_lock_bonus(true);
/// assert_eq!(rules.max_penalties, 3);
/// assert_eq!(rules.locks_to_end, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// A player reaching this many penalties ends the game.
    pub max_penalties: u8,

    /// This many distinct closed colors end the game.
    pub locks_to_end: usize,

    /// Marks a row must hold, including the terminal mark, for the terminal
    /// number to be markable (and hence for the row to lock).
    pub min_marks_to_lock: usize,

    /// Points subtracted per penalty.
    pub penalty_points: i32,

    /// Count the lock symbol as an extra mark when scoring a locked row.
    pub lock_bonus: bool,

    /// Upper bound on seats at the table.
    pub max_players: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_penalties: 4,
            locks_to_end: 2,
            min_marks_to_lock: 5,
            penalty_points: 5,
            lock_bonus: false,
            max_players: 5,
        }
    }
}

impl RulesConfig {
    /// Most seats any table can have; player ids are a `u8` starting at 1.
    pub const MAX_SEATS: usize = u8::MAX as usize;

    /// Create the standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_penalties(mut self, max: u8) -> Self {
        self.max_penalties = max.max(1);
        self
    }

    #[must_use]
    pub fn with_locks_to_end(mut self, locks: usize) -> Self {
        self.locks_to_end = locks.clamp(1, 4);
        self
    }

    #[must_use]
    pub fn with_min_marks_to_lock(mut self, marks: usize) -> Self {
        self.min_marks_to_lock = marks.max(1);
        self
    }

    #[must_use]
    pub fn with_penalty_points(mut self, points: i32) -> Self {
        self.penalty_points = points;
        self
    }

    #[must_use]
    pub fn with_lock_bonus(mut self, enabled: bool) -> Self {
        self.lock_bonus = enabled;
        self
    }

    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max.clamp(1, Self::MAX_SEATS);
        self
    }

    /// Seats a table may actually have. `max_players` is public and may be
    /// deserialized unchecked, so setup clamps through this.
    #[must_use]
    pub fn seat_limit(&self) -> usize {
        self.max_players.clamp(1, Self::MAX_SEATS)
    }
}

/// AI difficulty tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}
