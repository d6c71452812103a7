//! Per-player scoresheet: four rows, penalties, derived score.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::row::Row;
use crate::core::{Color, ColorSet, MoveError, RulesConfig};
use crate::rules;

/// One player's scoresheet.
///
/// `total_score` is derived and recomputed from the rows after every
/// mutation, never adjusted incrementally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoresheet {
    rows: [Row; 4],
    penalties: u8,
    total_score: i32,
    penalty_points: i32,
    lock_bonus: bool,
    min_marks_to_lock: usize,
}

impl Scoresheet {
    /// Create an empty sheet scored under `rules`.
    #[must_use]
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            rows: Color::ALL.map(Row::new),
            penalties: 0,
            total_score: 0,
            penalty_points: rules.penalty_points,
            lock_bonus: rules.lock_bonus,
            min_marks_to_lock: rules.min_marks_to_lock,
        }
    }

    #[must_use]
    pub fn row(&self, color: Color) -> &Row {
        &self.rows[color.index()]
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    #[must_use]
    pub fn penalties(&self) -> u8 {
        self.penalties
    }

    #[must_use]
    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    /// Marks required in a row before its terminal number may be marked.
    #[must_use]
    pub fn min_marks_to_lock(&self) -> usize {
        self.min_marks_to_lock
    }

    /// Total marks across all rows.
    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    /// Colors this sheet has locked.
    #[must_use]
    pub fn locked_colors(&self) -> ColorSet {
        self.rows.iter().filter(|r| r.is_locked()).map(Row::color).collect()
    }

    /// Marked numbers per color, in row order.
    #[must_use]
    pub fn marked_numbers(&self) -> BTreeMap<Color, Vec<u8>> {
        self.rows
            .iter()
            .map(|row| (row.color(), row.marks().to_vec()))
            .collect()
    }

    /// Score recomputed from scratch.
    #[must_use]
    pub fn compute_score(&self) -> i32 {
        let rows: i32 = self.rows.iter().map(|r| r.score(self.lock_bonus)).sum();
        rows - self.penalty_points * i32::from(self.penalties)
    }

    /// Mark `number` in the `color` row.
    ///
    /// Only row-level rules are checked here (range, lock, duplicates,
    /// lockout boundary, lock requirement). Dice and stage legality are the
    /// caller's concern. Returns `true` if the mark locked the row.
    pub fn mark(&mut self, color: Color, number: u8) -> Result<bool, MoveError> {
        rules::check_row(self.row(color), number, self.min_marks_to_lock)?;
        let locked = self.rows[color.index()].record(number, self.min_marks_to_lock);
        self.refresh();
        Ok(locked)
    }

    /// Record one penalty. Returns the new penalty count.
    pub fn add_penalty(&mut self) -> u8 {
        self.penalties = self.penalties.saturating_add(1);
        self.refresh();
        self.penalties
    }

    fn refresh(&mut self) {
        self.total_score = self.compute_score();
    }
}

impl Default for Scoresheet {
    fn default() -> Self {
        Self::new(&RulesConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sheet_is_empty() {
        let sheet = Scoresheet::default();
        assert_eq!(sheet.total_score(), 0);
        assert_eq!(sheet.penalties(), 0);
        assert_eq!(sheet.mark_count(), 0);
        assert!(sheet.locked_colors().is_empty());
        assert!(sheet.marked_numbers().values().all(Vec::is_empty));
    }

    #[test]
    fn test_score_tracks_marks_and_penalties() {
        let mut sheet = Scoresheet::default();
        sheet.mark(Color::Red, 3).unwrap();
        sheet.mark(Color::Red, 6).unwrap();
        sheet.mark(Color::Blue, 10).unwrap();
        assert_eq!(sheet.total_score(), 3 + 1);

        sheet.add_penalty();
        assert_eq!(sheet.total_score(), 4 - 5);
        assert_eq!(sheet.total_score(), sheet.compute_score());
    }

    #[test]
    fn test_rejects_backwards_mark() {
        let mut sheet = Scoresheet::default();
        sheet.mark(Color::Yellow, 8).unwrap();
        let err = sheet.mark(Color::Yellow, 5).unwrap_err();
        assert_eq!(
            err,
            MoveError::BehindLockout {
                color: Color::Yellow,
                number: 5,
                boundary: 8
            }
        );
        assert_eq!(sheet.row(Color::Yellow).marks(), &[8]);
    }

    #[test]
    fn test_lock_bonus_scoring() {
        let rules = RulesConfig::default().with_lock_bonus(true);
        let mut sheet = Scoresheet::new(&rules);
        for n in [2, 3, 4, 5, 6] {
            sheet.mark(Color::Red, n).unwrap();
        }
        assert!(sheet.mark(Color::Red, 12).unwrap());
        assert_eq!(sheet.total_score(), 28);
        assert!(sheet.locked_colors().contains(Color::Red));
    }

    #[test]
    fn test_penalties_saturate() {
        let mut sheet = Scoresheet::default();
        for _ in 0..300 {
            sheet.add_penalty();
        }
        assert_eq!(sheet.penalties(), u8::MAX);
    }
}
