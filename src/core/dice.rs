//! Dice results and dice sources.
//!
//! A roll is six dice: two white dice shared by the whole table and one die
//! per row color. `DiceRoller` abstracts where rolls come from so sessions can
//! run on seeded randomness or on a fixed script.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::color::Color;
use super::rng::GameRng;

/// One complete roll of all six dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceResult {
    pub white1: u8,
    pub white2: u8,
    pub red: u8,
    pub yellow: u8,
    pub green: u8,
    pub blue: u8,
}

impl DiceResult {
    #[must_use]
    pub const fn new(white1: u8, white2: u8, red: u8, yellow: u8, green: u8, blue: u8) -> Self {
        Self {
            white1,
            white2,
            red,
            yellow,
            green,
            blue,
        }
    }

    /// Sum of both white dice. Every player may use it in stage 1.
    #[must_use]
    pub const fn white_sum(&self) -> u8 {
        self.white1 + self.white2
    }

    /// Face of the colored die for `color`.
    #[must_use]
    pub const fn colored(&self, color: Color) -> u8 {
        match color {
            Color::Red => self.red,
            Color::Yellow => self.yellow,
            Color::Green => self.green,
            Color::Blue => self.blue,
        }
    }

    /// Both white+colored sums for `color`: `[white1 + c, white2 + c]`.
    #[must_use]
    pub const fn color_sums(&self, color: Color) -> [u8; 2] {
        let c = self.colored(color);
        [self.white1 + c, self.white2 + c]
    }

    /// True if every face lies in `1..=6`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.white1, self.white2, self.red, self.yellow, self.green, self.blue]
            .iter()
            .all(|face| (1..=6).contains(face))
    }

    /// Copy with every face forced into `1..=6`.
    #[must_use]
    pub fn clamped(self) -> Self {
        let face = |f: u8| f.clamp(1, 6);
        Self::new(
            face(self.white1),
            face(self.white2),
            face(self.red),
            face(self.yellow),
            face(self.green),
            face(self.blue),
        )
    }
}

impl std::fmt::Display for DiceResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "white {}+{} | red {} | yellow {} | green {} | blue {}",
            self.white1, self.white2, self.red, self.yellow, self.green, self.blue
        )
    }
}

/// Draw six independent uniform faces.
pub fn roll_dice(rng: &mut GameRng) -> DiceResult {
    DiceResult {
        white1: rng.roll_die(),
        white2: rng.roll_die(),
        red: rng.roll_die(),
        yellow: rng.roll_die(),
        green: rng.roll_die(),
        blue: rng.roll_die(),
    }
}

/// Source of dice rolls for a session.
pub trait DiceRoller: Send {
    /// Produce a fresh roll. Called once per turn.
    fn roll(&mut self) -> DiceResult;
}

/// Uniform random dice from a seeded `GameRng`.
#[derive(Clone, Debug)]
pub struct RandomDice {
    rng: GameRng,
}

impl RandomDice {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl DiceRoller for RandomDice {
    fn roll(&mut self) -> DiceResult {
        roll_dice(&mut self.rng)
    }
}

/// Predetermined rolls, returned in order.
///
/// Once the script runs out the last roll repeats, so a script of one roll
/// pins the dice for the whole game.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    queue: VecDeque<DiceResult>,
    last: DiceResult,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = DiceResult>) -> Self {
        let queue: VecDeque<_> = rolls.into_iter().collect();
        let last = queue
            .front()
            .copied()
            .unwrap_or(DiceResult::new(1, 1, 1, 1, 1, 1));
        Self { queue, last }
    }

}

impl DiceRoller for ScriptedDice {
    fn roll(&mut self) -> DiceResult {
        if let Some(next) = self.queue.pop_front() {
            self.last = next;
        }
        self.last
    }
}
