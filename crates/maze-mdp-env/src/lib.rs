//! Grid-world mazes for the maze-mdp solvers
//!
//! This crate provides:
//! - Cell categories, grid layouts and reward tables
//! - The stochastic grid world (80/10/10 moves, walls and borders reflect)
//! - Named preset layouts and random maze generation
//! - Text reports, result file names and the JSON export

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod generate;
pub mod grid;
#[cfg(feature = "visualization")]
pub mod plot;
pub mod presets;
pub mod report;
pub mod world;

// Re-export environment types
pub use generate::{random_maze, MazeSpec};
pub use grid::{Cell, Grid, RewardMapping};
#[cfg(feature = "visualization")]
pub use plot::plot_utility_vs_iteration;
pub use presets::{preset, preset_names, register_preset, AIMA_GRID, DEFAULT_GRID};
pub use report::{
    plot_file_name, record_file_name, render_report, result_file_name, GridSolution,
    SolutionRecord, StateRecord,
};
pub use world::{GridWorld, INTENDED_PROBABILITY, LATERAL_PROBABILITY};

// Re-export core types
pub use maze_mdp_core::{
    Algorithm, Direction, DiscountFactor, Mdp, MdpError, Outcome, PolicyIteration, Position,
    Result, Solution, Solver, SolverConfig, ValueIteration,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{preset, random_maze, render_report, Grid, GridWorld, MazeSpec};
    pub use maze_mdp_core::prelude::*;
}
