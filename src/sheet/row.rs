//! A single colored row of a scoresheet.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Color, ROW_LENGTH};

/// Score for a row holding `marks` marks: 1, 3, 6, 10, ...
#[must_use]
pub const fn triangular(marks: usize) -> i32 {
    (marks * (marks + 1) / 2) as i32
}

/// Marks placed on one colored row.
///
/// Marks are stored in row order, so the last entry is always the furthest
/// mark. Rows never hold more than `ROW_LENGTH` marks, which fits inline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    color: Color,
    marks: SmallVec<[u8; ROW_LENGTH]>,
    locked: bool,
}

impl Row {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            marks: SmallVec::new(),
            locked: false,
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Marked numbers in row order.
    #[must_use]
    pub fn marks(&self) -> &[u8] {
        &self.marks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    #[must_use]
    pub fn contains(&self, number: u8) -> bool {
        self.marks.contains(&number)
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The furthest mark along the row's direction.
    #[must_use]
    pub fn furthest(&self) -> Option<u8> {
        self.marks.last().copied()
    }

    /// Row score, optionally counting the lock symbol as one more mark.
    #[must_use]
    pub fn score(&self, lock_bonus: bool) -> i32 {
        let bonus = usize::from(self.locked && lock_bonus);
        triangular(self.marks.len() + bonus)
    }

    /// Append a mark already accepted by the rule validator.
    ///
    /// Returns `true` if this mark locked the row.
    pub(crate) fn record(&mut self, number: u8, min_marks_to_lock: usize) -> bool {
        debug_assert!(
            self.furthest()
                .zip(self.color.position(number))
                .and_then(|(last, pos)| self.color.position(last).map(|l| l < pos))
                .unwrap_or(true),
            "marks must advance along the row"
        );
        self.marks.push(number);
        if number == self.color.terminal() && self.marks.len() >= min_marks_to_lock {
            self.locked = true;
        }
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangular() {
        let scores: Vec<_> = (0..=6).map(triangular).collect();
        assert_eq!(scores, vec![0, 1, 3, 6, 10, 15, 21]);
        assert_eq!(triangular(12), 78);
    }

    #[test]
    fn test_record_and_furthest() {
        let mut row = Row::new(Color::Green);
        assert_eq!(row.furthest(), None);

        assert!(!row.record(11, 5));
        assert!(!row.record(7, 5));
        assert_eq!(row.marks(), &[11, 7]);
        assert_eq!(row.furthest(), Some(7));
        assert_eq!(row.score(false), 3);
    }

    #[test]
    fn test_terminal_locks_with_enough_marks() {
        let mut row = Row::new(Color::Red);
        for n in [2, 3, 4, 5] {
            assert!(!row.record(n, 5));
        }
        assert!(row.record(12, 5));
        assert!(row.is_locked());
        assert_eq!(row.score(false), 15);
        assert_eq!(row.score(true), 21);
    }
}
