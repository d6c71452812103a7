//! Rule validator.
//!
//! Pure functions deciding whether a candidate mark is legal:
//! - The number must be on the row and derivable from the dice for the stage
//! - The row must not be locked, nor the color closed for the table
//! - The number must not be marked already or lie behind the lockout boundary
//! - The terminal number needs enough prior marks to lock the row
//!
//! The session, the AI strategies and the simulator all call into this module;
//! the lockout computation lives here and nowhere else.

pub mod validator;

pub use validator::{
    can_lock, check_mark, check_row, is_legal_mark, legal_marks, lockout_boundary, Mark, MoveContext, Stage,
};
