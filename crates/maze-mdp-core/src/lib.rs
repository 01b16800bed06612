//! Core Markov decision process traits and solvers
//!
//! This crate provides the capability trait every solvable environment
//! implements, the Bellman backup shared by the solvers, and the two
//! dynamic-programming solvers: value iteration and (modified) policy
//! iteration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod bellman;
pub mod config;
pub mod error;
pub mod mdp;
pub mod solution;
pub mod solver;
pub mod state;

// Re-export core traits and types
pub use action::Direction;
pub use config::{DiscountFactor, SolverConfig};
pub use error::{MdpError, Result};
pub use mdp::{Mdp, Outcome};
pub use solution::{Policy, Solution, SolutionFor, Trace, Utilities};
pub use solver::{Algorithm, PolicyIteration, Solver, ValueIteration};
pub use state::Position;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Algorithm, Direction, Mdp, Outcome, PolicyIteration, Position, Result, Solution, Solver,
        SolverConfig, ValueIteration,
    };
}
