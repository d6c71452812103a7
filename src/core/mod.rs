//! Core engine types: colors, dice, RNG, players, configuration, errors.
//!
//! These are the building blocks every other module uses. None of them
//! know about turns or stages.

pub mod color;
pub mod config;
pub mod dice;
pub mod error;
pub mod player;
pub mod rng;

pub use color::{Color, ColorSet, ParseColorError, MAX_NUMBER, MIN_NUMBER, ROW_LENGTH};
pub use config::{Difficulty, ParseDifficultyError, RulesConfig};
pub use dice::{roll_dice, DiceResult, DiceRoller, RandomDice, ScriptedDice};
pub use error::{GameError, MoveError, Result};
pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
