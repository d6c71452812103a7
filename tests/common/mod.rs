//! Shared helpers for driving sessions from tests.

#![allow(dead_code)]

use qwixx_engine::{
    Color, GamePhase, GameRng, GameSession, PlayerId, Scoresheet, Strategy,
};

pub const HUMAN: PlayerId = PlayerId(1);

/// Take one action for player 1 without marking anything.
pub fn idle_step(session: &mut GameSession) {
    let active = session.current_player().id == HUMAN;
    let result = match session.phase() {
        GamePhase::WaitingForRoll => session.roll(),
        GamePhase::Stage1Moves | GamePhase::Stage2Moves if active => session.done(HUMAN),
        GamePhase::Stage1Moves => session.pass(HUMAN),
        phase => panic!("nothing to do in {phase}"),
    };
    result.unwrap();
}

/// Play player 1 with `strategy` until the game ends, checking sheet
/// invariants after every operation. Returns the number of operations.
pub fn play_out(session: &mut GameSession, strategy: &dyn Strategy, rng: &mut GameRng, limit: usize) -> usize {
    let mut ops = 0;
    while session.phase() != GamePhase::GameOver {
        assert!(ops < limit, "game did not finish in {limit} operations");
        ops += play_step(session, strategy, rng);
    }
    ops
}

/// Take player 1's next decision with `strategy`: a roll, or its marks
/// followed by `done`/`pass` when the turn has not moved on by itself.
/// Returns the number of operations.
pub fn play_step(session: &mut GameSession, strategy: &dyn Strategy, rng: &mut GameRng) -> usize {
    assert!(session.is_awaiting(HUMAN), "stalled in {}", session.phase());

    if session.phase() == GamePhase::WaitingForRoll {
        session.roll().unwrap();
        check_table(session);
        return 1;
    }

    let mut ops = 0;
    let before = (session.phase(), session.current_player_index());
    let moves = session
        .turn_view(HUMAN)
        .map(|view| strategy.choose_moves(&view, rng))
        .unwrap_or_default();
    for mark in moves {
        session.mark(HUMAN, mark.color, mark.number).unwrap();
        ops += 1;
        check_table(session);
    }
    if (session.phase(), session.current_player_index()) != before || session.phase() == GamePhase::GameOver {
        return ops;
    }

    if session.current_player().id == HUMAN {
        session.done(HUMAN).unwrap();
    } else if session.is_awaiting(HUMAN) {
        session.pass(HUMAN).unwrap();
    }
    check_table(session);
    ops + 1
}

/// Assert the sheet invariants for every player.
pub fn check_table(session: &GameSession) {
    for player in session.players() {
        check_sheet(&player.sheet);
    }
}

pub fn check_sheet(sheet: &Scoresheet) {
    for color in Color::ALL {
        let row = sheet.row(color);
        let positions: Vec<usize> = row
            .marks()
            .iter()
            .map(|&n| color.position(n).expect("mark outside the row"))
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "{color} row not monotonic: {:?}",
            row.marks()
        );
        if row.contains(color.terminal()) {
            assert!(row.len() >= 5, "{color} terminal with {} marks", row.len());
        }
        assert_eq!(row.is_locked(), row.contains(color.terminal()));
    }

    let expected: i32 = Color::ALL
        .iter()
        .map(|&c| {
            let n = sheet.row(c).len() as i32;
            n * (n + 1) / 2
        })
        .sum::<i32>()
        - 5 * i32::from(sheet.penalties());
    assert_eq!(sheet.total_score(), expected);
}
