//! Grid coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Direction;

/// A `(row, col)` cell coordinate.
///
/// Signed so that the nominal neighbour of a border cell (for example row
/// `-1`) can be represented before it is corrected back into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index, top row is 0
    pub row: i32,
    /// Column index, leftmost column is 0
    pub col: i32,
}

impl Position {
    /// Create a new position
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring coordinate one step in `direction`
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (dr, dc) = direction.offset();
        Self::new(self.row + dr, self.col + dc)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_each_direction() {
        let origin = Position::new(2, 3);
        assert_eq!(origin.offset(Direction::Up), Position::new(1, 3));
        assert_eq!(origin.offset(Direction::Down), Position::new(3, 3));
        assert_eq!(origin.offset(Direction::Left), Position::new(2, 2));
        assert_eq!(origin.offset(Direction::Right), Position::new(2, 4));
    }

    #[test]
    fn test_offset_leaves_grid() {
        assert_eq!(Position::new(0, 0).offset(Direction::Up), Position::new(-1, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(4, 1).to_string(), "(4, 1)");
    }
}
