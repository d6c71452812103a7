//! Scoresheets: the per-player record of marks and penalties.
//!
//! A sheet holds one `Row` per color. Rows only ever grow forward along their
//! direction; skipped numbers are lost for good. The sheet's total is
//! derived: the triangular number of each row's mark count, minus a fixed
//! cost per penalty.

mod row;
mod scoresheet;

pub use row::{triangular, Row};
pub use scoresheet::Scoresheet;
