//! Row colors and their numbering direction.
//!
//! ## Rows
//!
//! Each scoresheet has one row per colored die:
//! - **Ascending** (red, yellow): `2, 3, ..., 12`
//! - **Descending** (green, blue): `12, 11, ..., 2`
//!
//! A row's *position* is the index of a number along its own direction, so
//! position 0 is always the row's first number and position 10 is always its
//! terminal number. Working in positions lets the rules treat both
//! directions identically.
//!
//! ```
//! use qwixx_engine::core::Color;
//!
//! assert_eq!(Color::Red.terminal(), 12);
//! assert_eq!(Color::Green.terminal(), 2);
//! assert_eq!(Color::Red.position(2), Some(0));
//! assert_eq!(Color::Green.position(2), Some(10));
//! assert_eq!(Color::Blue.position(13), None);
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Lowest number on any row.
pub const MIN_NUMBER: u8 = 2;

/// Highest number on any row.
pub const MAX_NUMBER: u8 = 12;

/// Number of cells in a row.
pub const ROW_LENGTH: usize = (MAX_NUMBER - MIN_NUMBER + 1) as usize;

/// One of the four colored rows (and the colored die that feeds it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Color {
    /// All colors in sheet order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    /// Stable index in `0..4`, matching `Color::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Yellow => 1,
            Color::Green => 2,
            Color::Blue => 3,
        }
    }

    /// True for rows numbered `2..=12` left to right.
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Color::Red | Color::Yellow)
    }

    /// The first number of the row.
    #[must_use]
    pub const fn first(self) -> u8 {
        if self.is_ascending() {
            MIN_NUMBER
        } else {
            MAX_NUMBER
        }
    }

    /// The last number of the row. Marking it may lock the row.
    #[must_use]
    pub const fn terminal(self) -> u8 {
        if self.is_ascending() {
            MAX_NUMBER
        } else {
            MIN_NUMBER
        }
    }

    /// Position of `number` along this row's direction.
    ///
    /// Returns `None` if the number is not printed on the row.
    #[must_use]
    pub fn position(self, number: u8) -> Option<usize> {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&number) {
            return None;
        }
        let pos = if self.is_ascending() {
            number - MIN_NUMBER
        } else {
            MAX_NUMBER - number
        };
        Some(pos as usize)
    }

    /// The number printed at `position` on this row.
    #[must_use]
    pub fn number_at(self, position: usize) -> Option<u8> {
        if position >= ROW_LENGTH {
            return None;
        }
        let offset = position as u8;
        Some(if self.is_ascending() {
            MIN_NUMBER + offset
        } else {
            MAX_NUMBER - offset
        })
    }

    /// Iterate over the row's numbers in row order.
    pub fn numbers(self) -> impl Iterator<Item = u8> {
        (0..ROW_LENGTH).filter_map(move |pos| self.number_at(pos))
    }

    /// Lowercase name, as used on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown color name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown color '{0}' (expected red, yellow, green or blue)")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "yellow" => Ok(Color::Yellow),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

/// Small set of colors backed by a bitmask.
///
/// Used to track which colors have been closed for the whole table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorSet(u8);

impl ColorSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a color. Returns `true` if it was not already present.
    pub fn insert(&mut self, color: Color) -> bool {
        let bit = 1 << color.index();
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    #[must_use]
    pub const fn contains(self, color: Color) -> bool {
        self.0 & (1 << color.index()) != 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over members in sheet order.
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut set = ColorSet::new();
        for color in iter {
            set.insert(color);
        }
        set
    }
}
