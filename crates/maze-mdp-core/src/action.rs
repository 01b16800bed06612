//! Grid actions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::MdpError;

/// One of the four moves available in every grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Row - 1
    Up,
    /// Row + 1
    Down,
    /// Column - 1
    Left,
    /// Column + 1
    Right,
}

impl Direction {
    /// Fixed enumeration order. Arg-max ties resolve to the earliest entry.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// `(row, col)` displacement of the move
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// The two directions orthogonal to this one
    #[must_use]
    pub fn laterals(self) -> [Direction; 2] {
        match self {
            Self::Up | Self::Down => [Self::Left, Self::Right],
            Self::Left | Self::Right => [Self::Up, Self::Down],
        }
    }

    /// Arrow used in policy grids
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Up => '\u{2191}',
            Self::Down => '\u{2193}',
            Self::Left => '\u{2190}',
            Self::Right => '\u{2192}',
        }
    }

    /// Position in [`Direction::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = MdpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "move_up" => Ok(Self::Up),
            "down" | "d" | "move_down" => Ok(Self::Down),
            "left" | "l" | "move_left" => Ok(Self::Left),
            "right" | "r" | "move_right" => Ok(Self::Right),
            _ => Err(MdpError::UnrecognizedAction(s.to_string())),
        }
    }
}

/// Numbering 1..=4 in enumeration order
impl TryFrom<u8> for Direction {
    type Error = MdpError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=4 => Ok(Self::ALL[usize::from(value - 1)]),
            other => Err(MdpError::UnrecognizedAction(other.to_string())),
        }
    }
}
