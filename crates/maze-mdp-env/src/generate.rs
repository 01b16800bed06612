//! Random square mazes

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use maze_mdp_core::{MdpError, Result};

use crate::grid::{Cell, Grid};

/// Cell counts and side length of a generated maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSpec {
    /// Number of green cells
    pub num_green: usize,
    /// Number of brown cells
    pub num_brown: usize,
    /// Number of wall cells
    pub num_wall: usize,
    /// Side length of the square maze
    pub width: usize,
}

impl Default for MazeSpec {
    fn default() -> Self {
        Self {
            num_green: 1,
            num_brown: 1,
            num_wall: 1,
            width: 2,
        }
    }
}

impl MazeSpec {
    /// Every class needs at least one cell and at least one white cell
    /// must remain.
    pub fn validate(&self) -> Result<()> {
        for (name, count) in [
            ("num_green", self.num_green),
            ("num_brown", self.num_brown),
            ("num_wall", self.num_wall),
        ] {
            if count < 1 {
                return Err(MdpError::invalid_parameter(
                    name,
                    "the maze needs at least one green, one brown and one wall cell",
                ));
            }
        }

        let total = self.total()?;
        let area = self.width.checked_mul(self.width).ok_or_else(|| {
            MdpError::invalid_parameter("width", format!("{} is too large", self.width))
        })?;
        if total >= area {
            return Err(MdpError::invalid_parameter(
                "width",
                format!("a {0}×{0} maze cannot hold {total} special cells", self.width),
            ));
        }
        Ok(())
    }

    /// Number of non-white cells
    fn total(&self) -> Result<usize> {
        self.num_green
            .checked_add(self.num_brown)
            .and_then(|sum| sum.checked_add(self.num_wall))
            .ok_or_else(|| {
                MdpError::invalid_parameter("num_green", "cell counts overflow when summed")
            })
    }
}

/// Place the requested cells at distinct random positions; everything else
/// is white.
pub fn random_maze<R: Rng + ?Sized>(spec: &MazeSpec, rng: &mut R) -> Result<Grid> {
    spec.validate()?;

    let width = spec.width;
    let total = spec.total()?;
    let mut cells = vec![vec![Cell::White; width]; width];

    for (n, slot) in index::sample(rng, width * width, total).into_iter().enumerate() {
        let category = if n < spec.num_green {
            Cell::Green
        } else if n < spec.num_green + spec.num_brown {
            Cell::Brown
        } else {
            Cell::Wall
        };
        cells[slot / width][slot % width] = category;
    }

    let grid = Grid::new(cells)?;
    debug!(
        width,
        green = spec.num_green,
        brown = spec.num_brown,
        wall = spec.num_wall,
        "generated random maze"
    );
    Ok(grid)
}
