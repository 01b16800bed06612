//! Modified policy iteration (Russell & Norvig, Figure 17.7)
//!
//! Each outer loop runs k fixed-policy evaluation sweeps followed by one
//! greedy improvement pass. k = 1 gives the classic alternation; larger k
//! approximates exact evaluation more closely per loop.

use tracing::{debug, info, trace};

use super::Solver;
use crate::bellman::{best_action, expected_utility, policy_backup};
use crate::config::validate_num_policy_evaluation;
use crate::solution::{max_abs_change, zero_utilities};
use crate::{
    DiscountFactor, Mdp, MdpError, Policy, Result, Solution, SolutionFor, SolverConfig, Trace,
    Utilities,
};

/// Alternates policy evaluation and policy improvement until no state
/// changes its action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyIteration {
    discount: DiscountFactor,
    num_policy_evaluation: usize,
}

impl PolicyIteration {
    /// Create a solver; γ must lie in (0, 1) and k must be at least 1
    pub fn new(discount: f64, num_policy_evaluation: usize) -> Result<Self> {
        Ok(Self {
            discount: DiscountFactor::new(discount)?,
            num_policy_evaluation: validate_num_policy_evaluation(num_policy_evaluation)?,
        })
    }

    /// Create a solver from the shared configuration
    pub fn from_config(config: &SolverConfig) -> Result<Self> {
        Self::new(config.discount, config.num_policy_evaluation)
    }

    /// Evaluation sweeps per outer loop
    #[must_use]
    pub fn num_policy_evaluation(&self) -> usize {
        self.num_policy_evaluation
    }

    /// k sweeps of U_{i+1}(s) ← R(s) + γ Σ P(s′|s,π(s)) U_i(s′).
    ///
    /// Every state of a round reads the same U_i; the new vector replaces
    /// it only once the round is complete.
    fn evaluate<M: Mdp>(
        &self,
        mdp: &M,
        policy: &Policy<M::State, M::Action>,
        mut current: Utilities<M::State>,
        trace: &mut Trace<M::State>,
        max_utility_changes: &mut Vec<f64>,
    ) -> Result<Utilities<M::State>> {
        for round in 0..self.num_policy_evaluation {
            let mut updated = Utilities::with_capacity(current.len());
            for (state, action) in policy {
                let utility = policy_backup(mdp, state, action, &current, self.discount)?;
                updated.insert(*state, utility);
            }

            let max_change = max_abs_change(&current, &updated);
            max_utility_changes.push(max_change);
            debug!(round, max_change, "policy evaluation sweep");

            current = updated;
            for (history, utility) in trace.values_mut().zip(current.values()) {
                history.push(*utility);
            }
        }
        Ok(current)
    }

    /// Greedy re-maximization. A state switches action only when the best
    /// action is strictly better than its current one. Returns the number
    /// of states that switched.
    fn improve<M: Mdp>(
        mdp: &M,
        policy: &mut Policy<M::State, M::Action>,
        utilities: &Utilities<M::State>,
    ) -> Result<usize> {
        let mut changed = 0;
        for (state, action) in policy.iter_mut() {
            let (best, best_value) = best_action(mdp, state, utilities)?;
            let current_value = expected_utility(mdp, state, action, utilities)?;
            if best_value > current_value {
                trace!(state = ?state, from = ?action, to = ?best, "policy improved");
                *action = best;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

impl Solver for PolicyIteration {
    fn name(&self) -> &'static str {
        "policy iteration"
    }

    fn solve<M: Mdp>(&self, mdp: &M) -> Result<SolutionFor<M>> {
        let states = mdp.states();
        let default_action = *mdp.actions().first().ok_or_else(|| {
            MdpError::invalid_parameter("actions", "the MDP exposes no actions")
        })?;

        let mut utilities = zero_utilities(mdp);
        let mut policy: Policy<M::State, M::Action> =
            states.iter().map(|s| (*s, default_action)).collect();
        let mut trace: Trace<M::State> = states.iter().map(|s| (*s, vec![0.0])).collect();
        let mut max_utility_changes = Vec::new();
        let mut iteration_count = 0;

        loop {
            utilities = self.evaluate(
                mdp,
                &policy,
                utilities,
                &mut trace,
                &mut max_utility_changes,
            )?;
            let changed = Self::improve(mdp, &mut policy, &utilities)?;
            iteration_count += self.num_policy_evaluation;

            debug!(
                iteration = iteration_count,
                changed, "policy improvement pass"
            );

            if changed == 0 {
                break;
            }
        }

        info!(
            iterations = iteration_count,
            states = states.len(),
            "policy iteration reached a stable policy"
        );

        Ok(Solution {
            utilities,
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
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            PolicyIteration::new(0.9, 0),
            Err(MdpError::InvalidParameter { name: "num_policy_evaluation", .. })
        ));
        assert!(matches!(
            PolicyIteration::new(1.0, 1),
            Err(MdpError::InvalidParameter { name: "discount", .. })
        ));
    }

    #[test]
    fn test_single_evaluation_sweep_by_hand() {
        // Loop 1: U = R = (0, 1), state 0 switches. Loop 2: U = (0.45, 1.5),
        // nothing improves strictly.
        let chain = Chain::new([0.0, 1.0]);
        let solution = PolicyIteration::new(0.5, 1).unwrap().solve(&chain).unwrap();

        assert_eq!(solution.iteration_count, 2);
        assert_eq!(solution.policy[&0], "switch");
        assert_eq!(solution.policy[&1], "stay");
        assert_relative_eq!(solution.utilities[&0], 0.45);
        assert_relative_eq!(solution.utilities[&1], 1.5);
        assert_eq!(solution.iteration_utilities[&0], vec![0.0, 0.0, 0.45]);
        assert_eq!(solution.iteration_utilities[&1], vec![0.0, 1.0, 1.5]);
    }

    #[test]
    fn test_iteration_count_grows_by_k() {
        let chain = Chain::new([0.0, 1.0]);
        for k in [1, 3, 7] {
            let solution = PolicyIteration::new(0.5, k).unwrap().solve(&chain).unwrap();
            assert_eq!(solution.iteration_count % k, 0);
            assert_eq!(solution.max_utility_changes.len(), solution.iteration_count);
            for history in solution.iteration_utilities.values() {
                assert_eq!(history.len(), solution.iteration_count + 1);
            }
        }
    }

    #[test]
    fn test_long_evaluation_approaches_fixed_point() {
        let chain = Chain::new([0.0, 1.0]);
        let solution = PolicyIteration::new(0.5, 60).unwrap().solve(&chain).unwrap();
        assert_abs_diff_eq!(solution.utilities[&1], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.utilities[&0], 0.9 / 0.95, epsilon = 1e-9);
    }

    #[test]
    fn test_equal_actions_do_not_switch() {
        // Both actions are worth the same everywhere when rewards are equal
        // and utilities start flat, so the default action is kept.
        let chain = Chain::new([1.0, 1.0]);
        let solution = PolicyIteration::new(0.9, 2).unwrap().solve(&chain).unwrap();
        assert_eq!(solution.iteration_count, 2);
        assert!(solution.policy.values().all(|a| *a == "stay"));
    }
}
