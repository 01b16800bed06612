//! Named grid layouts

use std::sync::{PoisonError, RwLock};

use indexmap::IndexMap;
use lazy_static::lazy_static;

use maze_mdp_core::{MdpError, Result};

use crate::grid::Grid;

/// 6×6 maze with 31 non-wall cells
pub const DEFAULT_GRID: [&str; 6] = [
    "gwg  g",
    " b gwb",
    "  b g ",
    "   b g",
    " wwwb ",
    "      ",
];

/// 3×4 layout after Russell & Norvig, with the goal and the pit as
/// ordinary rewarding cells
pub const AIMA_GRID: [&str; 3] = ["   g", " w b", "    "];

lazy_static! {
    static ref REGISTRY: RwLock<IndexMap<String, Vec<String>>> = RwLock::new(
        [("default", &DEFAULT_GRID[..]), ("aima", &AIMA_GRID[..])]
            .into_iter()
            .map(|(name, rows)| {
                (name.to_string(), rows.iter().map(ToString::to_string).collect())
            })
            .collect()
    );
}

/// Look up a registered grid by name
pub fn preset(name: &str) -> Result<Grid> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let rows = registry
        .get(name)
        .ok_or_else(|| MdpError::invalid_parameter("preset", format!("unknown grid `{name}`")))?;
    Grid::from_rows(rows)
}

/// Register (or replace) a named grid
pub fn register_preset(name: impl Into<String>, grid: &Grid) {
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.into(), grid.to_rows());
}

/// Names of all registered grids, in registration order
pub fn preset_names() -> Vec<String> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_default_grid_shape() {
        let grid = preset("default").unwrap();
        assert_eq!(grid.height(), 6);
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.count(Cell::Wall), 5);
        assert_eq!(grid.count(Cell::Green), 6);
        assert_eq!(grid.count(Cell::Brown), 5);
    }

    #[test]
    fn test_builtin_names() {
        let names = preset_names();
        assert!(names.contains(&"default".to_string()));
        assert!(names.contains(&"aima".to_string()));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(
            preset("labyrinth"),
            Err(MdpError::InvalidParameter { name: "preset", .. })
        ));
    }

    #[test]
    fn test_register_preset() {
        let grid = Grid::from_rows(&["g b"]).unwrap();
        register_preset("corridor-test", &grid);
        assert_eq!(preset("corridor-test").unwrap(), grid);
    }
}
