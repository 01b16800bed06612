//! Cell categories, grid layouts and the reward table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use maze_mdp_core::{MdpError, Position, Result};

/// Category of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    /// Ordinary floor, `' '`
    White,
    /// Positive reward, `'g'`
    Green,
    /// Negative reward, `'b'`
    Brown,
    /// Impassable, `'w'`; not a state
    Wall,
}

impl Cell {
    /// Symbol used in grid layouts
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::White => ' ',
            Self::Green => 'g',
            Self::Brown => 'b',
            Self::Wall => 'w',
        }
    }

    /// Whether the agent may occupy this cell
    #[must_use]
    pub fn is_passable(self) -> bool {
        self != Self::Wall
    }
}

/// `'.'` is accepted as an alternative to `' '` for white cells
impl TryFrom<char> for Cell {
    type Error = MdpError;

    fn try_from(symbol: char) -> Result<Self> {
        match symbol {
            ' ' | '.' => Ok(Self::White),
            'g' | 'G' => Ok(Self::Green),
            'b' | 'B' => Ok(Self::Brown),
            'w' | 'W' => Ok(Self::Wall),
            other => Err(MdpError::InvalidGrid(format!(
                "unknown cell symbol {other:?}"
            ))),
        }
    }
}

/// Reward attached to each passable category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardMapping {
    /// Reward of a white cell
    pub white: f64,
    /// Reward of a green cell
    pub green: f64,
    /// Reward of a brown cell
    pub brown: f64,
}

impl Default for RewardMapping {
    fn default() -> Self {
        Self {
            white: -0.04,
            green: 1.0,
            brown: -1.0,
        }
    }
}

impl RewardMapping {
    /// Reward of a category, `None` for walls
    #[must_use]
    pub fn reward(&self, cell: Cell) -> Option<f64> {
        match cell {
            Cell::White => Some(self.white),
            Cell::Green => Some(self.green),
            Cell::Brown => Some(self.brown),
            Cell::Wall => None,
        }
    }
}

/// Rectangular layout of cells, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Build a grid, rejecting empty or ragged layouts
    pub fn new(cells: Vec<Vec<Cell>>) -> Result<Self> {
        let width = cells.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(MdpError::InvalidGrid("grid has no cells".to_string()));
        }
        if let Some((row, cells)) = cells.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(MdpError::InvalidGrid(format!(
                "row {row} has {} cells, expected {width}",
                cells.len()
            )));
        }
        if i32::try_from(cells.len()).is_err() || i32::try_from(width).is_err() {
            return Err(MdpError::InvalidGrid("grid is too large".to_string()));
        }
        Ok(Self { cells })
    }

    /// Parse one string per row
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let cells = rows
            .iter()
            .map(|row| row.as_ref().chars().map(Cell::try_from).collect())
            .collect::<Result<Vec<Vec<Cell>>>>()?;
        Self::new(cells)
    }

    /// Number of rows
    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    /// Category at `position`, `None` outside the grid
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        let row = usize::try_from(position.row).ok()?;
        let col = usize::try_from(position.col).ok()?;
        self.cells.get(row)?.get(col).copied()
    }

    /// Rows of cells
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Every coordinate with its category, row-major
    pub fn positions(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, cell)| {
                // Dimensions were checked to fit i32 in `new`.
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let position = Position::new(r as i32, c as i32);
                (position, *cell)
            })
        })
    }

    /// Number of cells of a category
    #[must_use]
    pub fn count(&self, category: Cell) -> usize {
        self.cells.iter().flatten().filter(|c| **c == category).count()
    }

    /// Row strings, the inverse of [`Grid::from_rows`]
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }
}

impl FromStr for Grid {
    type Err = MdpError;

    /// Rows separated by newlines; blank lines are skipped
    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s.lines().filter(|line| !line.is_empty()).collect();
        Self::from_rows(&rows)
    }
}

impl TryFrom<Vec<String>> for Grid {
    type Error = MdpError;

    fn try_from(rows: Vec<String>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<Grid> for Vec<String> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|c| match c {
                    Cell::White => '.',
                    other => other.symbol(),
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
