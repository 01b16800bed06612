//! Value iteration (Russell & Norvig, Figure 17.4)

use tracing::{debug, info};

use super::Solver;
use crate::bellman::backup;
use crate::config::validate_max_error;
use crate::solution::zero_utilities;
use crate::{DiscountFactor, Mdp, Policy, Result, Solution, SolutionFor, SolverConfig, Trace};

/// Repeats the Bellman optimality update over every state until the
/// largest change of a sweep drops below ε(1−γ)/γ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueIteration {
    discount: DiscountFactor,
    max_error: f64,
}

impl ValueIteration {
    /// Create a solver; γ must lie in (0, 1) and ε must be positive
    pub fn new(discount: f64, max_error: f64) -> Result<Self> {
        Ok(Self {
            discount: DiscountFactor::new(discount)?,
            max_error: validate_max_error(max_error)?,
        })
    }

    /// Create a solver from the shared configuration
    pub fn from_config(config: &SolverConfig) -> Result<Self> {
        Self::new(config.discount, config.max_error)
    }

    /// δ, the stopping bound on the per-sweep utility change
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.discount.convergence_threshold(self.max_error)
    }
}

impl Solver for ValueIteration {
    fn name(&self) -> &'static str {
        "value iteration"
    }

    fn solve<M: Mdp>(&self, mdp: &M) -> Result<SolutionFor<M>> {
        let states = mdp.states();
        let threshold = self.threshold();

        let mut current = zero_utilities(mdp);
        let mut next = current.clone();
        let mut policy = Policy::with_capacity(states.len());
        let mut trace: Trace<M::State> = states.iter().map(|s| (*s, Vec::new())).collect();
        let mut max_utility_changes = Vec::new();

        loop {
            // U ← U′; the snapshot is what every backup of this sweep reads
            current.clone_from(&next);
            for (history, utility) in trace.values_mut().zip(current.values()) {
                history.push(*utility);
            }

            let mut max_change = 0.0_f64;
            for state in states {
                let (utility, action) = backup(mdp, state, &current, self.discount)?;
                max_change = max_change.max((utility - current[state]).abs());
                next.insert(*state, utility);
                policy.insert(*state, action);
            }
            max_utility_changes.push(max_change);

            debug!(
                iteration = max_utility_changes.len(),
                max_change,
                threshold,
                "value iteration sweep"
            );

            if max_change < threshold {
                break;
            }
        }

        let iteration_count = max_utility_changes.len();
        info!(
            iterations = iteration_count,
            states = states.len(),
            "value iteration converged"
        );

        Ok(Solution {
            utilities: current,
            policy,
            iteration_count,
            iteration_utilities: trace,
            max_utility_changes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdp::fixtures::Chain;
    use crate::MdpError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rejects_invalid_parameters() {
        for gamma in [0.0, 1.0, 2.0] {
            assert!(matches!(
                ValueIteration::new(gamma, 0.1),
                Err(MdpError::InvalidParameter { name: "discount", .. })
            ));
        }
        for epsilon in [0.0, -1.0, f64::INFINITY] {
            assert!(matches!(
                ValueIteration::new(0.9, epsilon),
                Err(MdpError::InvalidParameter { name: "max_error", .. })
            ));
        }
    }

    #[test]
    fn test_converges_on_chain() {
        let chain = Chain::new([0.0, 1.0]);
        let solution = ValueIteration::new(0.5, 1e-9).unwrap().solve(&chain).unwrap();

        assert_eq!(solution.policy[&0], "switch");
        assert_eq!(solution.policy[&1], "stay");
        assert_abs_diff_eq!(solution.utilities[&1], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.utilities[&0], 0.9 / 0.95, epsilon = 1e-6);
    }

    #[test]
    fn test_trace_shape() {
        let chain = Chain::new([0.0, 1.0]);
        let solution = ValueIteration::new(0.5, 1e-3).unwrap().solve(&chain).unwrap();

        assert!(solution.iteration_count > 0);
        assert_eq!(solution.max_utility_changes.len(), solution.iteration_count);
        for (state, history) in &solution.iteration_utilities {
            assert_eq!(history.len(), solution.iteration_count);
            assert_eq!(history[0], 0.0);
            assert_eq!(history.last().copied(), Some(solution.utilities[state]));
        }
    }

    #[test]
    fn test_stops_below_threshold() {
        let chain = Chain::new([0.0, 1.0]);
        let solver = ValueIteration::new(0.5, 1e-3).unwrap();
        let solution = solver.solve(&chain).unwrap();

        let (last, earlier) = solution.max_utility_changes.split_last().unwrap();
        assert!(*last < solver.threshold());
        assert!(earlier.iter().all(|change| *change >= solver.threshold()));
    }

    #[test]
    fn test_repeat_runs_are_identical() {
        let chain = Chain::new([-0.5, 1.0]);
        let solver = ValueIteration::new(0.9, 0.01).unwrap();
        assert_eq!(solver.solve(&chain).unwrap(), solver.solve(&chain).unwrap());
    }
}
