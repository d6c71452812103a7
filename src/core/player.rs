//! Player identification and seats.
//!
//! ## PlayerId
//!
//! Player ids are 1-based and follow seat order: the first seat is
//! `PlayerId(1)` and is always the human.
//!
//! ## Player
//!
//! A seat at the table: identity, whether an AI drives it, and the
//! scoresheet it owns exclusively.

use serde::{Deserialize, Serialize};

use super::config::{Difficulty, RulesConfig};
use crate::sheet::Scoresheet;

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Id of the player sitting at 0-based `seat`.
    ///
    /// Seats past the last representable id saturate at `u8::MAX`; tables
    /// are capped at `RulesConfig::MAX_SEATS` so this never collides.
    #[must_use]
    pub const fn from_seat(seat: usize) -> Self {
        if seat >= u8::MAX as usize {
            Self(u8::MAX)
        } else {
            Self(seat as u8 + 1)
        }
    }

    /// Iterate over all player IDs for a table of `player_count` seats.
    ///
    /// ```
    /// use qwixx_engine::core::PlayerId;
    ///
    /// let ids: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(ids, vec![PlayerId(1), PlayerId(2), PlayerId(3)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(PlayerId::from_seat)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A seat at the table and its scoresheet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_ai: bool,
    /// Tier driving this seat. `None` for humans.
    pub ai_strategy: Option<Difficulty>,
    pub sheet: Scoresheet,
}

impl Player {
    /// Create a human player.
    pub fn human(id: PlayerId, name: impl Into<String>, rules: &RulesConfig) -> Self {
        Self {
            id,
            name: name.into(),
            is_ai: false,
            ai_strategy: None,
            sheet: Scoresheet::new(rules),
        }
    }

    /// Create an AI player driven by `difficulty`.
    pub fn ai(id: PlayerId, name: impl Into<String>, difficulty: Difficulty, rules: &RulesConfig) -> Self {
        Self {
            id,
            name: name.into(),
            is_ai: true,
            ai_strategy: Some(difficulty),
            sheet: Scoresheet::new(rules),
        }
    }

    #[must_use]
    pub fn total_score(&self) -> i32 {
        self.sheet.total_score()
    }
}
