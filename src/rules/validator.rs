//! Mark legality.
//!
//! All legality decisions go through this module: human marks, AI move
//! enumeration and the session's "does the active player have any option"
//! check. Nothing here mutates state.

use serde::{Deserialize, Serialize};

use crate::core::{Color, ColorSet, DiceResult, MoveError};
use crate::sheet::{Row, Scoresheet};

/// Which dice combination a stage accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Stage 1: the sum of the two white dice, in any row, for every player.
    WhiteSum,
    /// Stage 2: one white die plus the matching colored die, active player only.
    WhiteColor,
}

/// A candidate mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark {
    pub color: Color,
    pub number: u8,
}

impl Mark {
    #[must_use]
    pub const fn new(color: Color, number: u8) -> Self {
        Self { color, number }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.number)
    }
}

/// Everything beyond the sheet itself that decides legality.
#[derive(Clone, Copy, Debug)]
pub struct MoveContext<'a> {
    pub stage: Stage,
    pub dice: &'a DiceResult,
    /// Whether the sheet's owner is the active player.
    pub is_active: bool,
    /// Colors closed for the whole table.
    pub closed: ColorSet,
}

impl<'a> MoveContext<'a> {
    #[must_use]
    pub fn new(stage: Stage, dice: &'a DiceResult, is_active: bool) -> Self {
        Self {
            stage,
            dice,
            is_active,
            closed: ColorSet::new(),
        }
    }

    #[must_use]
    pub fn with_closed(mut self, closed: ColorSet) -> Self {
        self.closed = closed;
        self
    }

    /// Numbers the dice offer for `color` in this stage.
    ///
    /// Empty when the stage gives this player nothing for the row.
    #[must_use]
    pub fn candidates(&self, color: Color) -> Vec<u8> {
        match self.stage {
            Stage::WhiteSum => vec![self.dice.white_sum()],
            Stage::WhiteColor if self.is_active => {
                let [a, b] = self.dice.color_sums(color);
                if a == b {
                    vec![a]
                } else {
                    vec![a, b]
                }
            }
            Stage::WhiteColor => Vec::new(),
        }
    }
}

/// The lockout boundary: the furthest marked number in a row.
///
/// Every unmarked number behind it is permanently unmarkable.
#[must_use]
pub fn lockout_boundary(row: &Row) -> Option<u8> {
    row.furthest()
}

/// True iff marking the terminal number of `color` now would satisfy the lock
/// requirement (the row would hold at least `min_marks` marks).
#[must_use]
pub fn can_lock(sheet: &Scoresheet, color: Color) -> bool {
    let row = sheet.row(color);
    !row.is_locked() && !row.contains(color.terminal()) && row.len() + 1 >= sheet.min_marks_to_lock()
}

/// Row-level checks: range, lock, duplicates, lockout boundary, lock requirement.
pub fn check_row(row: &Row, number: u8, min_marks_to_lock: usize) -> Result<(), MoveError> {
    let color = row.color();
    let position = color
        .position(number)
        .ok_or(MoveError::OutOfRange { color, number })?;

    if row.is_locked() {
        return Err(MoveError::RowLocked(color));
    }
    if row.contains(number) {
        return Err(MoveError::AlreadyMarked { color, number });
    }
    if let Some(boundary) = lockout_boundary(row) {
        let boundary_pos = color.position(boundary).unwrap_or(0);
        if position < boundary_pos {
            return Err(MoveError::BehindLockout {
                color,
                number,
                boundary,
            });
        }
    }
    if number == color.terminal() && row.len() + 1 < min_marks_to_lock {
        return Err(MoveError::LockTooEarly {
            color,
            have: row.len(),
            needed: min_marks_to_lock.saturating_sub(1),
        });
    }
    Ok(())
}

/// Full legality check for marking `number` in `color` on `sheet`.
///
/// Checks run from the most permanent reason to the most situational, so a
/// locked row reports `RowLocked` whatever the dice say.
pub fn check_mark(sheet: &Scoresheet, color: Color, number: u8, ctx: &MoveContext<'_>) -> Result<(), MoveError> {
    let row = sheet.row(color);
    if color.position(number).is_none() {
        return Err(MoveError::OutOfRange { color, number });
    }
    if row.is_locked() {
        return Err(MoveError::RowLocked(color));
    }
    if ctx.closed.contains(color) {
        return Err(MoveError::ColorClosed(color));
    }
    if ctx.stage == Stage::WhiteColor && !ctx.is_active {
        return Err(MoveError::NotActivePlayer);
    }
    if !ctx.candidates(color).contains(&number) {
        return Err(MoveError::NotFromDice { color, number });
    }
    check_row(row, number, sheet.min_marks_to_lock())
}

/// Boolean form of [`check_mark`].
#[must_use]
pub fn is_legal_mark(sheet: &Scoresheet, color: Color, number: u8, ctx: &MoveContext<'_>) -> bool {
    check_mark(sheet, color, number, ctx).is_ok()
}

/// Every legal mark for `sheet` in this context, in sheet order.
#[must_use]
pub fn legal_marks(sheet: &Scoresheet, ctx: &MoveContext<'_>) -> Vec<Mark> {
    Color::ALL
        .into_iter()
        .flat_map(|color| ctx.candidates(color).into_iter().map(move |n| Mark::new(color, n)))
        .filter(|m| is_legal_mark(sheet, m.color, m.number, ctx))
        .collect()
}
