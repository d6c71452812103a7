//! # qwixx-engine
//!
//! Rules engine and turn state machine for a Qwixx-style dice game.
//!
//! ## Design Principles
//!
//! 1. **One Authority**: Every legality decision (lockout boundary, stage
//!    gating, turn ownership) goes through `rules`. Humans, AI players and
//!    the simulator all ask the same functions.
//!
//! 2. **Validate, Then Mutate**: A rejected operation leaves the session
//!    exactly as it was. Errors carry the specific reason.
//!
//! 3. **Configuration Over Constants**: End-of-game thresholds, penalty
//!    values and the table size live in `RulesConfig`.
//!
//! ## Architecture
//!
//! - **Owned Sessions**: A `GameSession` is a plain value. Callers own it and
//!   serialize access; there is no global game.
//!
//! - **Derived Scores**: Scores are recomputed from the rows after every
//!   change, never adjusted incrementally.
//!
//! - **Deterministic Dice**: Dice come from a `DiceRoller`; seeded and
//!   scripted rollers make games reproducible.
//!
//! ## Modules
//!
//! - `core`: Colors, dice, RNG, players, configuration, errors
//! - `sheet`: Rows and scoresheets
//! - `rules`: Mark legality
//! - `game`: Turn/stage state machine and the session aggregate
//! - `ai`: Strategy trait and difficulty tiers

pub mod core;
pub mod sheet;
pub mod rules;
pub mod game;
pub mod ai;

// Re-export commonly used types
pub use crate::core::{
    Color, ColorSet,
    DiceResult, DiceRoller, RandomDice, ScriptedDice,
    Difficulty, RulesConfig,
    GameError, MoveError, Result,
    GameRng, GameRngState,
    Player, PlayerId,
};

pub use crate::sheet::{Row, Scoresheet};

pub use crate::rules::{can_lock, is_legal_mark, legal_marks, lockout_boundary, Mark, MoveContext, Stage};

pub use crate::game::{
    EndReason, GamePhase, GameSession, GameSessionBuilder,
    GameSnapshot, PlayerSnapshot, SheetSnapshot, TurnView,
};

pub use crate::ai::{strategy_for, Strategy};
