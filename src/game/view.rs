//! Read-only view of the table from one seat during a marking stage.
//!
//! AI strategies decide from a `TurnView`; the simulator uses the same view to
//! drive the human seat.

use crate::core::{ColorSet, DiceResult, Player};
use crate::rules::{self, Mark, MoveContext, Stage};
use crate::sheet::Scoresheet;

use super::turn::SeatTurn;

#[derive(Clone, Copy, Debug)]
pub struct TurnView<'a> {
    /// Seat index of the deciding player.
    pub seat: usize,
    pub players: &'a [Player],
    pub dice: DiceResult,
    pub stage: Stage,
    /// Whether the deciding player is the active (rolling) player.
    pub is_active: bool,
    /// Colors closed for the whole table.
    pub closed: ColorSet,
    /// What the deciding player already did this turn.
    pub turn: SeatTurn,
}

impl<'a> TurnView<'a> {
    #[must_use]
    pub fn me(&self) -> &'a Player {
        &self.players[self.seat]
    }

    #[must_use]
    pub fn sheet(&self) -> &'a Scoresheet {
        &self.me().sheet
    }

    pub fn opponents(&self) -> impl Iterator<Item = &'a Player> {
        let seat = self.seat;
        self.players
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != seat)
            .map(|(_, p)| p)
    }

    #[must_use]
    pub fn context(&self) -> MoveContext<'_> {
        MoveContext::new(self.stage, &self.dice, self.is_active).with_closed(self.closed)
    }

    /// Marks the deciding player may make right now.
    #[must_use]
    pub fn legal_marks(&self) -> Vec<Mark> {
        if self.turn.check_usage(self.stage).is_err() {
            return Vec::new();
        }
        rules::legal_marks(self.sheet(), &self.context())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, PlayerId, RulesConfig};

    fn table() -> Vec<Player> {
        let rules = RulesConfig::default();
        vec![
            Player::human(PlayerId(1), "Player 1", &rules),
            Player::human(PlayerId(2), "Player 2", &rules),
        ]
    }

    #[test]
    fn test_view_enumerates_for_seat() {
        let players = table();
        let view = TurnView {
            seat: 1,
            players: &players,
            dice: DiceResult::new(3, 4, 1, 1, 1, 1),
            stage: Stage::WhiteSum,
            is_active: false,
            closed: ColorSet::new(),
            turn: SeatTurn::default(),
        };

        assert_eq!(view.me().id, PlayerId(2));
        assert_eq!(view.opponents().count(), 1);
        let marks = view.legal_marks();
        assert_eq!(marks.len(), 4);
        assert!(marks.iter().all(|m| m.number == 7));
    }

    #[test]
    fn test_used_stage_yields_nothing() {
        let players = table();
        let view = TurnView {
            seat: 0,
            players: &players,
            dice: DiceResult::new(3, 4, 1, 1, 1, 1),
            stage: Stage::WhiteSum,
            is_active: true,
            closed: [Color::Red].into_iter().collect(),
            turn: SeatTurn {
                white_sum_used: true,
                ..SeatTurn::default()
            },
        };
        assert!(view.legal_marks().is_empty());
    }
}
