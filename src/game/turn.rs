//! Turn and stage bookkeeping.
//!
//! ## Phases
//!
//! ```text
//! WAITING_FOR_ROLL --roll--> STAGE_1_MOVES --done--> STAGE_2_MOVES --done--> WAITING_FOR_ROLL (next player)
//!        |                                                                        ^
//!        +--roll, active player has no legal mark: penalty -----------------------+
//!
//! any phase --(enough closed colors | penalty limit)--> GAME_OVER
//! ```
//!
//! ## Per-turn limits
//!
//! Every player may use the white sum once per turn. The active player may
//! additionally use one white+color combination. `TurnState` tracks those
//! limits plus which non-active players are finished with stage 1.

use serde::{Deserialize, Serialize};

use crate::core::{ColorSet, MoveError, Player, PlayerId, RulesConfig};
use crate::rules::Stage;

/// Top-level state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[serde(rename = "WAITING_FOR_ROLL")]
    WaitingForRoll,
    #[serde(rename = "STAGE_1_MOVES")]
    Stage1Moves,
    #[serde(rename = "STAGE_2_MOVES")]
    Stage2Moves,
    #[serde(rename = "GAME_OVER")]
    GameOver,
}

impl GamePhase {
    /// The marking stage this phase represents, if any.
    #[must_use]
    pub const fn stage(self) -> Option<Stage> {
        match self {
            GamePhase::Stage1Moves => Some(Stage::WhiteSum),
            GamePhase::Stage2Moves => Some(Stage::WhiteColor),
            GamePhase::WaitingForRoll | GamePhase::GameOver => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GamePhase::WaitingForRoll => "WAITING_FOR_ROLL",
            GamePhase::Stage1Moves => "STAGE_1_MOVES",
            GamePhase::Stage2Moves => "STAGE_2_MOVES",
            GamePhase::GameOver => "GAME_OVER",
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What one seat has done during the current turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatTurn {
    pub white_sum_used: bool,
    pub color_used: bool,
    /// Finished with stage 1: marked, passed, or had nothing to mark.
    pub stage_one_done: bool,
}

impl SeatTurn {
    #[must_use]
    pub fn marked(&self) -> bool {
        self.white_sum_used || self.color_used
    }

    /// Whether this seat may still use `stage`'s combination this turn.
    pub fn check_usage(&self, stage: Stage) -> Result<(), MoveError> {
        let used = match stage {
            Stage::WhiteSum => self.white_sum_used || self.stage_one_done,
            Stage::WhiteColor => self.color_used,
        };
        if used {
            Err(MoveError::StageAlreadyUsed)
        } else {
            Ok(())
        }
    }
}

/// Per-turn state, reset whenever the turn passes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    seats: Vec<SeatTurn>,
    active_had_option: bool,
}

impl TurnState {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            seats: vec![SeatTurn::default(); player_count],
            active_had_option: false,
        }
    }

    /// Clear everything for a fresh turn.
    pub fn reset(&mut self) {
        self.seats.iter_mut().for_each(|s| *s = SeatTurn::default());
        self.active_had_option = false;
    }

    #[must_use]
    pub fn seat(&self, seat: usize) -> SeatTurn {
        self.seats.get(seat).copied().unwrap_or_default()
    }

    pub fn check_usage(&self, seat: usize, stage: Stage) -> Result<(), MoveError> {
        self.seat(seat).check_usage(stage)
    }

    /// Record an accepted mark.
    ///
    /// A non-active player's white-sum mark also finishes their stage 1.
    pub fn record_mark(&mut self, seat: usize, stage: Stage, is_active: bool) {
        if let Some(s) = self.seats.get_mut(seat) {
            match stage {
                Stage::WhiteSum => {
                    s.white_sum_used = true;
                    if !is_active {
                        s.stage_one_done = true;
                    }
                }
                Stage::WhiteColor => s.color_used = true,
            }
        }
    }

    pub fn finish_stage_one(&mut self, seat: usize) {
        if let Some(s) = self.seats.get_mut(seat) {
            s.stage_one_done = true;
        }
    }

    #[must_use]
    pub fn stage_one_done(&self, seat: usize) -> bool {
        self.seat(seat).stage_one_done
    }

    pub fn set_active_had_option(&mut self, had_option: bool) {
        self.active_had_option = had_option;
    }

    #[must_use]
    pub fn active_had_option(&self) -> bool {
        self.active_had_option
    }

    /// The active player owes a penalty: they had an option and marked nothing.
    #[must_use]
    pub fn penalty_due(&self, active: usize) -> bool {
        self.active_had_option && !self.seat(active).marked()
    }
}

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum EndReason {
    /// Enough distinct colors were closed.
    ColorsLocked { count: usize },
    /// A player hit the penalty limit.
    PenaltyLimit { player: PlayerId },
}

/// Evaluate the end-of-game conditions.
#[must_use]
pub fn end_condition(players: &[Player], closed: ColorSet, rules: &RulesConfig) -> Option<EndReason> {
    if closed.len() >= rules.locks_to_end {
        return Some(EndReason::ColorsLocked { count: closed.len() });
    }
    players
        .iter()
        .find(|p| p.sheet.penalties() >= rules.max_penalties)
        .map(|p| EndReason::PenaltyLimit { player: p.id })
}
