//! Text reports, result file names and the JSON export

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use maze_mdp_core::{Algorithm, Direction, Mdp, Position, Result, Solution, SolverConfig};

use crate::grid::{Cell, Grid};
use crate::world::GridWorld;

/// Solution of a grid world
pub type GridSolution = Solution<Position, Direction>;

/// Suffix that distinguishes result files of the same prefix: the stopping
/// bound δ for value iteration, k for policy iteration
#[must_use]
pub fn result_suffix(algorithm: Algorithm, config: &SolverConfig) -> String {
    match algorithm {
        Algorithm::ValueIteration => {
            let delta = config.max_error * (1.0 - config.discount) / config.discount;
            format!("(δ={delta:.3})")
        }
        Algorithm::PolicyIteration => format!("(npe={})", config.num_policy_evaluation),
    }
}

/// `{prefix}_result_{suffix}.txt`
#[must_use]
pub fn result_file_name(prefix: &str, algorithm: Algorithm, config: &SolverConfig) -> String {
    format!("{prefix}_result_{}.txt", result_suffix(algorithm, config))
}

/// `{prefix}_plot_{suffix}.png`
#[must_use]
pub fn plot_file_name(prefix: &str, algorithm: Algorithm, config: &SolverConfig) -> String {
    format!("{prefix}_plot_{}.png", result_suffix(algorithm, config))
}

/// `{prefix}_result_{suffix}.json`
#[must_use]
pub fn record_file_name(prefix: &str, algorithm: Algorithm, config: &SolverConfig) -> String {
    format!("{prefix}_result_{}.json", result_suffix(algorithm, config))
}

/// Per-state listing followed by the utility and policy grids
#[must_use]
pub fn render_report(world: &GridWorld, solution: &GridSolution) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Total number of iterations : {}", solution.iteration_count);
    let _ = writeln!(
        out,
        "--- (row, column) : Utility for each state with best action  ---"
    );

    for state in world.states() {
        if state.col == 0 {
            out.push('\n');
        }
        let utility = solution.utility(state).unwrap_or_default();
        let symbol = solution.action(state).map_or('?', |a| a.symbol());
        let _ = writeln!(out, "{state} - utility: {utility:.2}; action: {symbol}");
    }

    out.push_str("\n--- Optimal utility grid (w = wall) ---\n");
    out.push_str(&render_grid(world.grid(), |position| {
        solution
            .utility(&position)
            .map_or_else(|| "?".to_string(), |u| format!("{u:.2}"))
    }));

    out.push_str("\n--- Optimal policy grid (w = wall) ---\n");
    out.push_str(&render_grid(world.grid(), |position| {
        solution
            .action(&position)
            .map_or('?', |a| a.symbol())
            .to_string()
    }));
    out
}

fn render_grid(grid: &Grid, label: impl Fn(Position) -> String) -> String {
    let labels: Vec<String> = grid
        .positions()
        .map(|(position, cell)| match cell {
            Cell::Wall => "w".to_string(),
            _ => label(position),
        })
        .collect();
    let cell_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(1);

    let mut out = String::new();
    for row in labels.chunks(grid.width()) {
        let line: Vec<String> = row.iter().map(|l| format!("{l:>cell_width$}")).collect();
        let _ = writeln!(out, "[{}]", line.join(" "));
    }
    out
}

/// Outcome for a single state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Row index
    pub row: i32,
    /// Column index
    pub col: i32,
    /// Converged utility
    pub utility: f64,
    /// Chosen action
    pub action: Direction,
    /// Utility after every iteration
    pub trace: Vec<f64>,
}

/// Serializable form of a solver run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    /// Algorithm that produced the solution
    pub algorithm: Algorithm,
    /// Solver parameters
    pub config: SolverConfig,
    /// Layout that was solved
    pub grid: Grid,
    /// Iterations performed
    pub iteration_count: usize,
    /// Largest utility change of every iteration
    pub max_utility_changes: Vec<f64>,
    /// One entry per state, row-major
    pub states: Vec<StateRecord>,
    /// When the record was created
    pub generated_at: DateTime<Utc>,
}

impl SolutionRecord {
    /// Collect a solution together with the parameters that produced it
    #[must_use]
    pub fn new(
        algorithm: Algorithm,
        config: SolverConfig,
        world: &GridWorld,
        solution: &GridSolution,
    ) -> Self {
        let states = solution
            .policy
            .iter()
            .map(|(position, action)| StateRecord {
                row: position.row,
                col: position.col,
                utility: solution.utility(position).unwrap_or_default(),
                action: *action,
                trace: solution
                    .iteration_utilities
                    .get(position)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            algorithm,
            config,
            grid: world.grid().clone(),
            iteration_count: solution.iteration_count,
            max_utility_changes: solution.max_utility_changes.clone(),
            states,
            generated_at: Utc::now(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON form to `path`
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json_pretty()?)?;
        info!(path = %path.display(), "solution record written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_mdp_core::{Solver, ValueIteration};

    fn solved(rows: &[&str]) -> (GridWorld, GridSolution) {
        let world = GridWorld::with_default_rewards(Grid::from_rows(rows).unwrap()).unwrap();
        let solution = ValueIteration::new(0.9, 0.5).unwrap().solve(&world).unwrap();
        (world, solution)
    }

    #[test]
    fn test_file_names() {
        let config = SolverConfig::default();
        assert_eq!(
            result_file_name("value_iteration", Algorithm::ValueIteration, &config),
            "value_iteration_result_(δ=0.788).txt"
        );
        assert_eq!(
            result_file_name("policy_iteration", Algorithm::PolicyIteration, &config),
            "policy_iteration_result_(npe=4).txt"
        );
        assert_eq!(
            plot_file_name("pi", Algorithm::PolicyIteration, &config),
            "pi_plot_(npe=4).png"
        );
    }

    #[test]
    fn test_report_layout() {
        let (world, solution) = solved(&["gw", " b"]);
        let report = render_report(&world, &solution);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(
            lines[0],
            format!("Total number of iterations : {}", solution.iteration_count)
        );
        // Each grid row starts with a blank separator line.
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with("(0, 0) - utility: "));
        assert_eq!(lines[4], "");
        assert!(lines[5].starts_with("(1, 0) - utility: "));
        assert!(lines[6].starts_with("(1, 1) - utility: "));
        assert!(report.contains("--- Optimal policy grid (w = wall) ---"));
    }

    #[test]
    fn test_report_uses_arrows_and_walls() {
        let (world, solution) = solved(&["gw", " b"]);
        let report = render_report(&world, &solution);
        let policy_grid = report
            .split("--- Optimal policy grid (w = wall) ---\n")
            .nth(1)
            .unwrap();
        let first_row = policy_grid.lines().next().unwrap();
        assert!(first_row.ends_with("w]"));
        let symbol = solution.policy[&Position::new(0, 0)].symbol();
        assert!(first_row.contains(symbol));
    }

    #[test]
    fn test_record_round_trip_through_file() {
        let (world, solution) = solved(&["g ", " b"]);
        let record = SolutionRecord::new(
            Algorithm::ValueIteration,
            SolverConfig::default(),
            &world,
            &solution,
        );
        assert_eq!(record.states.len(), 4);
        assert_eq!(record.states[0].trace.len(), solution.iteration_count);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        record.write_to(&path).unwrap();
        let back: SolutionRecord =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.algorithm, Algorithm::ValueIteration);
        assert_eq!(back.grid, record.grid);
        assert_eq!(back.iteration_count, record.iteration_count);
        assert_eq!(back.generated_at, record.generated_at);
        for (read, written) in back.states.iter().zip(&record.states) {
            assert_eq!((read.row, read.col, read.action), (written.row, written.col, written.action));
            approx::assert_relative_eq!(read.utility, written.utility, max_relative = 1e-12);
        }
    }
}
