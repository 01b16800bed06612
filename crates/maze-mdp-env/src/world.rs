//! Stochastic grid world
//!
//! Moving in a direction succeeds with probability 0.8; otherwise the agent
//! drifts to one of the two orthogonal directions with probability 0.1
//! each. A move into a wall or off the grid leaves the agent where it is.

use indexmap::IndexMap;
use tracing::debug;

use maze_mdp_core::{Direction, Mdp, MdpError, Outcome, Position, Result};

use crate::grid::{Grid, RewardMapping};

/// Probability of moving in the intended direction
pub const INTENDED_PROBABILITY: f64 = 0.8;

/// Probability of drifting to each lateral direction
pub const LATERAL_PROBABILITY: f64 = 0.1;

type OutcomeTable = [[Outcome<Position>; 3]; 4];

/// A maze as a Markov decision process over its non-wall cells
#[derive(Debug, Clone)]
pub struct GridWorld {
    grid: Grid,
    rewards: RewardMapping,
    states: Vec<Position>,
    transitions: IndexMap<Position, OutcomeTable>,
}

impl GridWorld {
    /// Build the model and precompute every state's outcome table
    pub fn new(grid: Grid, rewards: RewardMapping) -> Result<Self> {
        let states: Vec<Position> = grid
            .positions()
            .filter(|(_, cell)| cell.is_passable())
            .map(|(position, _)| position)
            .collect();
        if states.is_empty() {
            return Err(MdpError::InvalidGrid(
                "grid has no non-wall cells".to_string(),
            ));
        }

        let transitions = states
            .iter()
            .map(|state| (*state, outcome_table(&grid, *state)))
            .collect();

        debug!(
            height = grid.height(),
            width = grid.width(),
            states = states.len(),
            "grid world constructed"
        );

        Ok(Self {
            grid,
            rewards,
            states,
            transitions,
        })
    }

    /// Model with the default reward table
    pub fn with_default_rewards(grid: Grid) -> Result<Self> {
        Self::new(grid, RewardMapping::default())
    }

    /// Underlying layout
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Reward table
    #[must_use]
    pub fn rewards(&self) -> &RewardMapping {
        &self.rewards
    }

    /// Whether `position` is a state of this model
    #[must_use]
    pub fn contains(&self, position: &Position) -> bool {
        self.transitions.contains_key(position)
    }
}

fn outcome_table(grid: &Grid, state: Position) -> OutcomeTable {
    Direction::ALL.map(|direction| {
        let [left, right] = direction.laterals();
        [
            outcome(grid, state, direction, INTENDED_PROBABILITY),
            outcome(grid, state, left, LATERAL_PROBABILITY),
            outcome(grid, state, right, LATERAL_PROBABILITY),
        ]
    })
}

fn outcome(grid: &Grid, state: Position, direction: Direction, probability: f64) -> Outcome<Position> {
    let nominal = state.offset(direction);
    let actual = match grid.cell(nominal) {
        Some(cell) if cell.is_passable() => nominal,
        _ => state,
    };
    Outcome {
        nominal,
        actual,
        probability,
    }
}

impl Mdp for GridWorld {
    type State = Position;
    type Action = Direction;

    fn states(&self) -> &[Position] {
        &self.states
    }

    fn actions(&self) -> &[Direction] {
        &Direction::ALL
    }

    fn reward(&self, state: &Position) -> Result<f64> {
        self.grid
            .cell(*state)
            .and_then(|cell| self.rewards.reward(cell))
            .ok_or_else(|| MdpError::InvalidState(state.to_string()))
    }

    fn next_state_distribution(
        &self,
        state: &Position,
        action: &Direction,
    ) -> Result<&[Outcome<Position>]> {
        self.transitions
            .get(state)
            .map(|table| &table[action.index()][..])
            .ok_or_else(|| MdpError::InvalidState(state.to_string()))
    }
}
