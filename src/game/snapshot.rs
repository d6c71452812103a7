//! The external state contract returned by every public operation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::{Color, DiceResult, Difficulty, Player, PlayerId};
use crate::sheet::Scoresheet;

use super::turn::GamePhase;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSnapshot {
    pub total_score: i32,
    pub penalties: u8,
    pub marked_numbers: BTreeMap<Color, Vec<u8>>,
}

impl From<&Scoresheet> for SheetSnapshot {
    fn from(sheet: &Scoresheet) -> Self {
        Self {
            total_score: sheet.total_score(),
            penalties: sheet.penalties(),
            marked_numbers: sheet.marked_numbers(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub is_ai: bool,
    pub ai_strategy: Option<Difficulty>,
    pub scoresheet: SheetSnapshot,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            is_ai: player.is_ai,
            ai_strategy: player.ai_strategy,
            scoresheet: SheetSnapshot::from(&player.sheet),
        }
    }
}

/// Full session state as seen by callers.
///
/// Rebuilt from engine state on every call; nothing in it is authoritative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Advisory status line.
    pub message: String,
    pub state: GamePhase,
    pub current_player_index: usize,
    /// `None` before the first roll.
    pub dice_results: Option<DiceResult>,
    pub players: Vec<PlayerSnapshot>,
    /// Colors closed for the whole table.
    pub locked_colors: Vec<Color>,
}

impl GameSnapshot {
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == id)
    }
}
