//! Heuristic move evaluation.
//!
//! Scores are unitless; higher is better. Everything is computed in terms of
//! a number's position along its row (0 for the first number, 10 for the
//! terminal), so ascending and descending rows share one code path.

use crate::core::{Color, ROW_LENGTH};
use crate::game::TurnView;
use crate::rules::Mark;
use crate::sheet::{triangular, Row};

const LAST_POSITION: usize = ROW_LENGTH - 1;

/// Position of the mark's number along its row.
fn position(mark: Mark) -> usize {
    mark.color.position(mark.number).unwrap_or(0)
}

/// Score a row would be worth with `marks` marks, valuing a locked row at
/// more than its plain triangular count.
#[must_use]
pub fn potential_row_score(marks: usize) -> f64 {
    match marks {
        0..=5 => f64::from(triangular(marks)),
        n => 21.0 + (n - 6) as f64 * 7.0,
    }
}

/// Penalty for marking far along a row that has only a few marks.
#[must_use]
pub fn early_positioning_penalty(pos: usize, marked: usize) -> f64 {
    match (marked, pos) {
        (0, 9..) => -40.0,
        (0, 7..) => -30.0,
        (0, 5..) => -15.0,
        (1, 10..) => -25.0,
        (1, 8..) => -15.0,
        (2, 10..) => -20.0,
        _ => 0.0,
    }
}

fn end_number_bonus(pos: usize) -> f64 {
    match pos {
        LAST_POSITION => 4.0,
        8.. => 2.0,
        _ => 0.0,
    }
}

fn enables_lock(row: &Row, mark: Mark) -> bool {
    row.len() >= 4 && mark.number == mark.color.terminal()
}

fn penalty_pressure(penalties: u8) -> f64 {
    match penalties {
        0 => 0.0,
        1 => 1.0,
        2 => 2.0,
        _ => 3.0,
    }
}

/// Chance of rolling `number` as the sum of two dice.
#[must_use]
pub fn roll_probability(number: u8) -> f64 {
    let ways = 6 - (7 - i32::from(number)).abs();
    f64::from(ways.max(0)) / 36.0
}

/// Basic evaluation used by the medium tier.
#[must_use]
pub fn evaluate_basic(view: &TurnView<'_>, mark: Mark) -> f64 {
    let sheet = view.sheet();
    let row = sheet.row(mark.color);
    let marked = row.len();
    let pos = position(mark);

    let mut score = marked as f64 * 2.0;
    score += early_positioning_penalty(pos, marked);
    score += end_number_bonus(pos);

    // Progress only counts once the row is started or the mark is not a
    // long early jump.
    if marked > 0 || pos < 7 {
        score += pos as f64 / 10.0 * 3.0;
    }
    if enables_lock(row, mark) {
        score += 8.0;
    }
    score += penalty_pressure(sheet.penalties());

    let opponent_marks: usize = view.opponents().map(|p| p.sheet.row(mark.color).len()).sum();
    if opponent_marks > marked + 2 {
        score -= 2.0;
    }

    score
}

/// Advanced evaluation used by the hard tier.
#[must_use]
pub fn evaluate_advanced(view: &TurnView<'_>, mark: Mark) -> f64 {
    let row = view.sheet().row(mark.color);

    let mut score = evaluate_basic(view, mark);
    score += opponent_blocking_bonus(view, mark);
    score += (0.2 - roll_probability(mark.number)) * 10.0;
    score += game_phase_bonus(view, mark.color);
    score += lock_value(view, mark);
    score += synergy_bonus(view, mark.color);
    if !view.closed.is_empty() {
        score += potential_row_score(row.len() + 1) * 0.7;
    }
    score += positioning_cost(row.len(), position(mark));
    if mark == Mark::new(Color::Red, 11) && row.is_empty() {
        score -= 5.0;
    }
    score
}

fn opponent_blocking_bonus(view: &TurnView<'_>, mark: Mark) -> f64 {
    view.opponents()
        .map(|p| {
            let theirs = p.sheet.row(mark.color).len();
            match theirs {
                4.. if mark.number == mark.color.terminal() => 6.0,
                4.. => 3.0,
                2.. => 1.5,
                _ => 0.0,
            }
        })
        .sum()
}

fn game_phase_bonus(view: &TurnView<'_>, color: Color) -> f64 {
    let sheet = view.sheet();
    let total = sheet.mark_count();
    let marked = sheet.row(color).len();

    match total {
        0..=8 => match marked {
            0 => 2.0,
            1..=2 => 1.0,
            _ => 0.0,
        },
        9..=16 if marked >= 2 => 2.0,
        9..=16 => 0.0,
        _ if marked >= 3 => 4.0,
        _ if !view.closed.is_empty() => 5.0,
        _ => 0.0,
    }
}

/// Points gained by locking plus the value of closing the color on opponents.
fn lock_value(view: &TurnView<'_>, mark: Mark) -> f64 {
    let row = view.sheet().row(mark.color);
    if !enables_lock(row, mark) {
        return 0.0;
    }

    let gain = potential_row_score(row.len() + 1) - f64::from(triangular(row.len()));
    let denial: f64 = view
        .opponents()
        .map(|p| p.sheet.row(mark.color).len())
        .filter(|&n| n >= 2)
        .map(|n| n as f64 * 1.5)
        .sum();

    gain * 2.0 + denial
}

fn synergy_bonus(view: &TurnView<'_>, color: Color) -> f64 {
    let sheet = view.sheet();
    let current = sheet.row(color).len() as f64;
    let others: Vec<f64> = Color::ALL
        .iter()
        .filter(|&&c| c != color)
        .map(|&c| sheet.row(c).len() as f64)
        .collect();
    let avg = others.iter().sum::<f64>() / others.len() as f64;

    if (current - avg).abs() <= 1.0 {
        1.5
    } else if current < avg - 2.0 {
        2.0
    } else if current > avg + 3.0 {
        -1.0
    } else {
        0.0
    }
}

/// Cost of skipping `pos` numbers, and of leaving too few numbers to lock.
#[must_use]
pub fn positioning_cost(marked: usize, pos: usize) -> f64 {
    let tiered = if marked <= 2 {
        match pos {
            8.. => Some(-50.0),
            6.. => Some(-35.0),
            4.. => Some(-20.0),
            0..=1 => Some(12.0),
            2 => Some(8.0),
            _ => None,
        }
    } else if marked <= 4 {
        match pos {
            6.. => Some(-20.0),
            0..=2 => Some(6.0),
            _ => None,
        }
    } else {
        None
    };
    if let Some(cost) = tiered {
        return cost;
    }

    let reachable = marked + 1 + (LAST_POSITION - pos.min(LAST_POSITION));
    match reachable {
        0..=4 => -40.0,
        5 => -15.0,
        _ => 0.0,
    }
}
