//! Turn/stage state machine and the game session.
//!
//! - `turn`: phases, per-turn usage limits and end conditions
//! - `view`: what one seat sees during a marking stage
//! - `snapshot`: the serializable state returned to callers
//! - `session`: `GameSession`, which owns a game and exposes its operations

pub mod session;
pub mod snapshot;
pub mod turn;
pub mod view;

pub use session::{GameSession, GameSessionBuilder};
pub use snapshot::{GameSnapshot, PlayerSnapshot, SheetSnapshot};
pub use turn::{end_condition, EndReason, GamePhase, SeatTurn, TurnState};
pub use view::TurnView;
