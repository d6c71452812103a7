//! The game session aggregate.
//!
//! `GameSession` owns everything about one game: seats, the active player,
//! the current phase, the dice and the per-turn bookkeeping. Callers hold the
//! session by value and serialize access to it; the engine does no locking.
//!
//! ## Operations
//!
//! - `setup`: discard the current game and seat a new table
//! - `roll`: roll for the active player and open stage 1
//! - `mark`: mark a number for any eligible player
//! - `done`: the active player finishes the current stage
//! - `pass`: a non-active player declines stage 1
//!
//! `mark`, `done` and `pass` only accept human seats.
//!
//! Every operation validates before mutating, so an `Err` leaves the session
//! untouched. After each successful operation the session plays AI seats
//! until a human decision is needed or the game ends.

use tracing::{debug, info, warn};

use crate::ai;
use crate::core::{
    Color, ColorSet, DiceResult, DiceRoller, Difficulty, GameError, GameRng, MoveError, Player, PlayerId,
    RandomDice, Result, RulesConfig,
};
use crate::rules::{self, Mark, MoveContext, Stage};

use super::snapshot::{GameSnapshot, PlayerSnapshot};
use super::turn::{end_condition, EndReason, GamePhase, TurnState};
use super::view::TurnView;

/// Upper bound on AI actions chained after a single caller operation.
const MAX_AI_STEPS: usize = 256;

/// One game in progress.
pub struct GameSession {
    rules: RulesConfig,
    difficulty: Difficulty,
    players: Vec<Player>,
    current: usize,
    phase: GamePhase,
    dice: Option<DiceResult>,
    closed: ColorSet,
    turn: TurnState,
    message: String,
    end_reason: Option<EndReason>,
    roller: Box<dyn DiceRoller>,
    rng: GameRng,
}

/// Builder for creating a `GameSession`.
pub struct GameSessionBuilder {
    player_count: usize,
    difficulty: Difficulty,
    rules: RulesConfig,
    seed: Option<u64>,
    dice: Option<Box<dyn DiceRoller>>,
}

impl Default for GameSessionBuilder {
    fn default() -> Self {
        Self {
            player_count: 2,
            difficulty: Difficulty::default(),
            rules: RulesConfig::default(),
            seed: None,
            dice: None,
        }
    }
}

impl GameSessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats at the table. The first seat is human, the rest are AI.
    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Seed for dice and AI randomness. Without one, the OS seeds the game.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the dice source (e.g. with `ScriptedDice`).
    pub fn dice(mut self, dice: impl DiceRoller + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    /// Build the session and seat the first game.
    pub fn build(self) -> GameSession {
        let mut rng = self.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let roller = self
            .dice
            .unwrap_or_else(|| Box::new(RandomDice::from_rng(rng.fork())));

        let mut session = GameSession {
            rules: self.rules,
            difficulty: self.difficulty,
            players: Vec::new(),
            current: 0,
            phase: GamePhase::WaitingForRoll,
            dice: None,
            closed: ColorSet::new(),
            turn: TurnState::default(),
            message: String::new(),
            end_reason: None,
            roller,
            rng,
        };
        session.setup(self.player_count, self.difficulty);
        session
    }
}

impl GameSession {
    /// Start a session with standard rules and OS-seeded dice.
    pub fn new(num_players: usize, difficulty: Difficulty) -> Self {
        Self::builder().player_count(num_players).difficulty(difficulty).build()
    }

    pub fn builder() -> GameSessionBuilder {
        GameSessionBuilder::new()
    }

    // === Operations ===

    /// Discard the current game and seat a new table.
    ///
    /// Always succeeds. The player count is clamped into
    /// `1..=rules.seat_limit()`; seat 1 is human, the others are AI players
    /// using `difficulty`.
    pub fn setup(&mut self, num_players: usize, difficulty: Difficulty) -> GameSnapshot {
        let count = num_players.clamp(1, self.rules.seat_limit());
        if count != num_players {
            warn!(requested = num_players, seated = count, "player count out of range, clamped");
        }

        let rules = &self.rules;
        self.players = (0..count)
            .map(|seat| {
                let id = PlayerId::from_seat(seat);
                match seat {
                    0 => Player::human(id, "Player 1", rules),
                    _ if count == 2 => Player::ai(id, "AI Player", difficulty, rules),
                    _ => Player::ai(id, format!("AI Player {seat}"), difficulty, rules),
                }
            })
            .collect();

        self.difficulty = difficulty;
        self.current = 0;
        self.phase = GamePhase::WaitingForRoll;
        self.dice = None;
        self.closed = ColorSet::new();
        self.turn = TurnState::new(count);
        self.end_reason = None;
        self.message = self.roll_prompt();

        info!(players = count, %difficulty, "game set up");

        self.drive_ai();
        self.snapshot()
    }

    /// Roll the dice for the active player.
    ///
    /// Opens stage 1 if the active player has any legal mark in either stage;
    /// otherwise charges them a penalty and passes the turn.
    pub fn roll(&mut self) -> Result<GameSnapshot> {
        self.ensure_running()?;
        if self.phase != GamePhase::WaitingForRoll {
            return Err(GameError::state(format!("cannot roll during {}", self.phase)));
        }

        self.roll_for_active();
        self.drive_ai();
        Ok(self.snapshot())
    }

    /// Mark `number` in the `color` row of `player`'s sheet.
    pub fn mark(&mut self, player: PlayerId, color: Color, number: u8) -> Result<GameSnapshot> {
        self.ensure_running()?;
        let seat = self.human_seat(player)?;

        self.apply_mark(seat, color, number)?;
        self.drive_ai();
        Ok(self.snapshot())
    }

    /// The active player finishes the current stage.
    ///
    /// Stage 1 moves on to stage 2; stage 2 ends the turn, charging a penalty
    /// if the active player marked nothing despite having an option.
    pub fn done(&mut self, player: PlayerId) -> Result<GameSnapshot> {
        self.ensure_running()?;
        let seat = self.human_seat(player)?;
        if seat != self.current {
            return Err(GameError::state(format!(
                "only the active player ({}) may finish a stage",
                self.players[self.current].name
            )));
        }

        match self.phase {
            GamePhase::Stage1Moves => self.open_stage_two(),
            GamePhase::Stage2Moves => self.finish_turn(),
            phase => return Err(GameError::state(format!("nothing to finish during {phase}"))),
        }

        self.drive_ai();
        Ok(self.snapshot())
    }

    /// A non-active player declines to mark the white sum this turn.
    pub fn pass(&mut self, player: PlayerId) -> Result<GameSnapshot> {
        self.ensure_running()?;
        let seat = self.human_seat(player)?;
        if self.phase != GamePhase::Stage1Moves {
            return Err(GameError::state(format!("cannot pass during {}", self.phase)));
        }
        if seat == self.current {
            return Err(GameError::state("the active player finishes stages with done"));
        }
        if self.turn.stage_one_done(seat) {
            return Err(GameError::state(format!(
                "{} is already finished with stage 1",
                self.players[seat].name
            )));
        }

        self.turn.finish_stage_one(seat);
        info!(player = %self.players[seat].name, "passed stage 1");
        self.message = format!("{} passes.", self.players[seat].name);

        self.drive_ai();
        Ok(self.snapshot())
    }

    // === Queries ===

    /// Rebuild the external view of the session.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            message: self.message.clone(),
            state: self.phase,
            current_player_index: self.current,
            dice_results: self.dice,
            players: self.players.iter().map(PlayerSnapshot::from).collect(),
            locked_colors: self.closed.iter().collect(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn dice(&self) -> Option<DiceResult> {
        self.dice
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn closed_colors(&self) -> ColorSet {
        self.closed
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Top scorer(s) once the game is over; empty while it runs.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        if self.phase != GamePhase::GameOver {
            return Vec::new();
        }
        let Some(best) = self.players.iter().map(Player::total_score).max() else {
            return Vec::new();
        };
        self.players
            .iter()
            .filter(|p| p.total_score() == best)
            .map(|p| p.id)
            .collect()
    }

    /// The table as `player` sees it in the current marking stage.
    ///
    /// `None` outside a marking stage or for an unknown player.
    #[must_use]
    pub fn turn_view(&self, player: PlayerId) -> Option<TurnView<'_>> {
        let seat = self.seat_of(player).ok()?;
        let stage = self.phase.stage()?;
        Some(TurnView {
            seat,
            players: &self.players,
            dice: self.dice?,
            stage,
            is_active: seat == self.current,
            closed: self.closed,
            turn: self.turn.seat(seat),
        })
    }

    /// Marks `player` could make right now.
    #[must_use]
    pub fn legal_marks(&self, player: PlayerId) -> Vec<Mark> {
        self.turn_view(player).map(|v| v.legal_marks()).unwrap_or_default()
    }

    /// Whether the session is waiting on `player` to act.
    #[must_use]
    pub fn is_awaiting(&self, player: PlayerId) -> bool {
        let Ok(seat) = self.seat_of(player) else {
            return false;
        };
        match self.phase {
            GamePhase::WaitingForRoll | GamePhase::Stage2Moves => seat == self.current,
            GamePhase::Stage1Moves => seat == self.current || !self.turn.stage_one_done(seat),
            GamePhase::GameOver => false,
        }
    }

    // === Internals ===

    fn ensure_running(&self) -> Result<()> {
        if self.phase.is_terminal() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn seat_of(&self, player: PlayerId) -> Result<usize> {
        self.players
            .iter()
            .position(|p| p.id == player)
            .ok_or(GameError::UnknownPlayer(player))
    }

    /// Seat of a caller-driven player. AI seats only act through `drive_ai`.
    fn human_seat(&self, player: PlayerId) -> Result<usize> {
        let seat = self.seat_of(player)?;
        if self.players[seat].is_ai {
            return Err(GameError::state(format!(
                "{} is played by the AI",
                self.players[seat].name
            )));
        }
        Ok(seat)
    }

    fn roll_prompt(&self) -> String {
        format!("{}'s turn. Roll the dice to start.", self.players[self.current].name)
    }

    fn legal_marks_for(&self, seat: usize, stage: Stage) -> Vec<Mark> {
        let Some(dice) = self.dice else {
            return Vec::new();
        };
        if self.turn.check_usage(seat, stage).is_err() {
            return Vec::new();
        }
        let ctx = MoveContext::new(stage, &dice, seat == self.current).with_closed(self.closed);
        rules::legal_marks(&self.players[seat].sheet, &ctx)
    }

    fn roll_for_active(&mut self) {
        let mut dice = self.roller.roll();
        if !dice.is_valid() {
            warn!(%dice, "dice source produced faces outside 1..=6, clamped");
            dice = dice.clamped();
        }
        self.dice = Some(dice);
        let active = self.current;
        info!(player = %self.players[active].name, %dice, "dice rolled");

        let has_option = [Stage::WhiteSum, Stage::WhiteColor]
            .into_iter()
            .any(|stage| !self.legal_marks_for(active, stage).is_empty());

        if !has_option {
            let name = self.players[active].name.clone();
            let penalties = self.players[active].sheet.add_penalty();
            warn!(player = %name, penalties, "no legal mark available, penalty applied");
            self.message = format!("No valid moves available. {name} receives a penalty.");
            self.check_game_over();
            if !self.phase.is_terminal() {
                let note = self.message.clone();
                self.advance_player(Some(note));
            }
            return;
        }

        self.turn.set_active_had_option(true);
        for seat in 0..self.players.len() {
            if seat != active && self.legal_marks_for(seat, Stage::WhiteSum).is_empty() {
                self.turn.finish_stage_one(seat);
            }
        }
        self.phase = GamePhase::Stage1Moves;
        self.message = format!("Stage 1: all players can mark the white sum ({}).", dice.white_sum());
    }

    fn apply_mark(&mut self, seat: usize, color: Color, number: u8) -> Result<()> {
        let stage = self.phase.stage().ok_or(MoveError::WrongStage)?;
        let dice = self.dice.ok_or(MoveError::WrongStage)?;
        let is_active = seat == self.current;
        let ctx = MoveContext::new(stage, &dice, is_active).with_closed(self.closed);

        let checked = rules::check_mark(&self.players[seat].sheet, color, number, &ctx)
            .and_then(|()| self.turn.check_usage(seat, stage));
        if let Err(err) = checked {
            debug!(player = %self.players[seat].name, %color, number, %err, "mark rejected");
            return Err(err.into());
        }

        let locked = self.players[seat].sheet.mark(color, number)?;
        self.turn.record_mark(seat, stage, is_active);

        let player = &self.players[seat];
        info!(player = %player.name, %color, number, score = player.total_score(), "marked");
        if locked {
            self.closed.insert(color);
            info!(player = %player.name, %color, closed = self.closed.len(), "row locked");
            self.message = format!("{} locked the {color} row!", player.name);
        } else {
            self.message = format!("{} marked {number} in the {color} row.", player.name);
        }

        self.check_game_over();
        Ok(())
    }

    fn open_stage_two(&mut self) {
        self.turn.finish_stage_one(self.current);
        self.phase = GamePhase::Stage2Moves;
        let name = &self.players[self.current].name;
        debug!(player = %name, "stage 2 opened");
        self.message = format!("Stage 2: {name} can combine a white die with a colored die.");
    }

    fn finish_turn(&mut self) {
        let active = self.current;
        let mut note = None;
        if self.turn.penalty_due(active) {
            let name = self.players[active].name.clone();
            let penalties = self.players[active].sheet.add_penalty();
            warn!(player = %name, penalties, "no mark this turn, penalty applied");
            self.message = format!("{name} made no marks this turn and receives a penalty.");
            self.check_game_over();
            if self.phase.is_terminal() {
                return;
            }
            note = Some(self.message.clone());
        }
        self.advance_player(note);
    }

    fn advance_player(&mut self, note: Option<String>) {
        self.current = (self.current + 1) % self.players.len();
        self.turn.reset();
        self.phase = GamePhase::WaitingForRoll;
        info!(player = %self.players[self.current].name, "turn passed");

        let prompt = self.roll_prompt();
        self.message = match note {
            Some(note) => format!("{note} {prompt}"),
            None => prompt,
        };
    }

    fn check_game_over(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        let Some(reason) = end_condition(&self.players, self.closed, &self.rules) else {
            return;
        };

        self.phase = GamePhase::GameOver;
        self.end_reason = Some(reason);
        self.message = self.final_message(reason);
        info!(?reason, winners = ?self.winners(), "game over");
    }

    fn final_message(&self, reason: EndReason) -> String {
        let cause = match reason {
            EndReason::ColorsLocked { count } => format!("Game over! {count} colors locked."),
            EndReason::PenaltyLimit { player } => {
                let name = self.player(player).map_or("A player", |p| p.name.as_str());
                format!("Game over! {name} reached the penalty limit.")
            }
        };

        let winners: Vec<&Player> = self
            .winners()
            .into_iter()
            .filter_map(|id| self.player(id))
            .collect();
        match winners.as_slice() {
            [] => cause,
            [winner] => format!("{cause} {} wins with {} points!", winner.name, winner.total_score()),
            [first, ..] => {
                let names: Vec<&str> = winners.iter().map(|p| p.name.as_str()).collect();
                format!(
                    "{cause} It's a tie between {} with {} points!",
                    names.join(" and "),
                    first.total_score()
                )
            }
        }
    }

    // === AI driving ===

    fn drive_ai(&mut self) {
        for _ in 0..MAX_AI_STEPS {
            if !self.step_ai() {
                return;
            }
        }
        warn!(limit = MAX_AI_STEPS, "AI step limit reached, waiting for caller");
    }

    /// Take one AI action. Returns `false` when a human must act next.
    fn step_ai(&mut self) -> bool {
        let active = self.current;
        match self.phase {
            GamePhase::GameOver => false,
            GamePhase::WaitingForRoll => {
                if !self.players[active].is_ai {
                    return false;
                }
                self.roll_for_active();
                true
            }
            GamePhase::Stage1Moves => {
                let pending = (0..self.players.len())
                    .find(|&seat| self.players[seat].is_ai && !self.turn.stage_one_done(seat));
                if let Some(seat) = pending {
                    self.play_ai(seat, Stage::WhiteSum);
                    self.turn.finish_stage_one(seat);
                    return true;
                }
                if self.players[active].is_ai && self.humans_done_with_stage_one() {
                    self.open_stage_two();
                    return true;
                }
                false
            }
            GamePhase::Stage2Moves => {
                if !self.players[active].is_ai {
                    return false;
                }
                self.play_ai(active, Stage::WhiteColor);
                if !self.phase.is_terminal() {
                    self.finish_turn();
                }
                true
            }
        }
    }

    fn humans_done_with_stage_one(&self) -> bool {
        self.players
            .iter()
            .enumerate()
            .filter(|(seat, p)| *seat != self.current && !p.is_ai)
            .all(|(seat, _)| self.turn.stage_one_done(seat))
    }

    fn play_ai(&mut self, seat: usize, stage: Stage) {
        let (Some(difficulty), Some(dice)) = (self.players[seat].ai_strategy, self.dice) else {
            return;
        };
        let strategy = ai::strategy_for(difficulty);
        let view = TurnView {
            seat,
            players: &self.players,
            dice,
            stage,
            is_active: seat == self.current,
            closed: self.closed,
            turn: self.turn.seat(seat),
        };
        let moves = strategy.choose_moves(&view, &mut self.rng);
        debug!(
            player = %self.players[seat].name,
            strategy = strategy.name(),
            ?stage,
            ?moves,
            "AI decision"
        );

        for mark in moves {
            if let Err(err) = self.apply_mark(seat, mark.color, mark.number) {
                warn!(player = %self.players[seat].name, %mark, %err, "strategy proposed an illegal mark");
                break;
            }
            if self.phase.is_terminal() {
                break;
            }
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("dice", &self.dice)
            .field("closed", &self.closed)
            .field("players", &self.players)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedDice;

    fn solo(dice: DiceResult) -> GameSession {
        GameSession::builder()
            .player_count(1)
            .seed(1)
            .dice(ScriptedDice::new([dice]))
            .build()
    }

    #[test]
    fn test_setup_seats_human_first() {
        let session = GameSession::builder().player_count(3).seed(5).build();
        let players = session.players();
        assert_eq!(players.len(), 3);
        assert!(!players[0].is_ai);
        assert!(players[1].is_ai && players[2].is_ai);
        assert_eq!(players[0].id, PlayerId(1));
        assert_eq!(session.phase(), GamePhase::WaitingForRoll);
        assert_eq!(session.dice(), None);
    }

    #[test]
    fn test_setup_clamps_player_count() {
        let session = GameSession::builder().player_count(0).seed(5).build();
        assert_eq!(session.players().len(), 1);

        let session = GameSession::builder().player_count(40).seed(5).build();
        assert_eq!(session.players().len(), RulesConfig::default().max_players);
    }

    #[test]
    fn test_rejected_mark_leaves_state_untouched() {
        let mut session = solo(DiceResult::new(1, 2, 3, 4, 5, 6));
        session.roll().unwrap();
        let before = session.snapshot();

        let err = session.mark(PlayerId(1), Color::Red, 9).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove(MoveError::NotFromDice { .. })));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_pass_rules() {
        let mut session = solo(DiceResult::new(1, 2, 3, 4, 5, 6));
        assert!(matches!(session.pass(PlayerId(1)), Err(GameError::InvalidState(_))));

        session.roll().unwrap();
        // The only player is active and must use done.
        assert!(matches!(session.pass(PlayerId(1)), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_unknown_player() {
        let mut session = solo(DiceResult::new(1, 2, 3, 4, 5, 6));
        session.roll().unwrap();
        assert_eq!(
            session.mark(PlayerId(9), Color::Red, 3),
            Err(GameError::UnknownPlayer(PlayerId(9)))
        );
    }

    #[test]
    fn test_callers_cannot_act_for_ai_seats() {
        let mut session = GameSession::builder()
            .player_count(2)
            .seed(4)
            .dice(ScriptedDice::new([DiceResult::new(1, 2, 3, 4, 5, 6)]))
            .build();
        session.roll().unwrap();
        session.done(PlayerId(1)).unwrap();
        session.done(PlayerId(1)).unwrap();
        assert_eq!(session.current_player_index(), 1);
        assert_eq!(session.phase(), GamePhase::Stage1Moves);

        let before = session.snapshot();
        assert!(matches!(session.done(PlayerId(2)), Err(GameError::InvalidState(_))));
        assert!(matches!(session.mark(PlayerId(2), Color::Red, 3), Err(GameError::InvalidState(_))));
        assert!(matches!(session.pass(PlayerId(2)), Err(GameError::InvalidState(_))));
        assert_eq!(session.snapshot(), before);

        // Player 1's white-sum mark is still open.
        session.mark(PlayerId(1), Color::Red, 3).unwrap();
        assert_eq!(session.players()[0].sheet.row(Color::Red).marks(), &[3]);
    }

    #[test]
    fn test_out_of_range_faces_are_clamped() {
        let mut session = solo(DiceResult::new(255, 255, 0, 9, 3, 3));
        session.roll().unwrap();
        assert_eq!(session.dice(), Some(DiceResult::new(6, 6, 1, 6, 3, 3)));
        assert_eq!(session.phase(), GamePhase::Stage1Moves);
    }

    #[test]
    fn test_setup_survives_unchecked_max_players() {
        let rules: RulesConfig = serde_json::from_str(r#"{"max_players": 0}"#).unwrap();
        let session = GameSession::builder().rules(rules).player_count(1).seed(2).build();
        assert_eq!(session.players().len(), 1);

        let rules: RulesConfig = serde_json::from_str(r#"{"max_players": 300}"#).unwrap();
        let session = GameSession::builder().rules(rules).player_count(300).seed(2).build();
        let players = session.players();
        assert_eq!(players.len(), RulesConfig::MAX_SEATS);
        assert_eq!(players.last().map(|p| p.id), Some(PlayerId(u8::MAX)));
        let mut ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), players.len());
    }

    #[test]
    fn test_is_awaiting() {
        let mut session = solo(DiceResult::new(1, 2, 3, 4, 5, 6));
        assert!(session.is_awaiting(PlayerId(1)));
        assert!(!session.is_awaiting(PlayerId(2)));
        session.roll().unwrap();
        assert!(session.is_awaiting(PlayerId(1)));
    }
}
