//! Solver output record

use std::hash::Hash;

use indexmap::IndexMap;

use crate::Mdp;

/// Utility estimate per state, in state enumeration order
pub type Utilities<S> = IndexMap<S, f64>;

/// Chosen action per state
pub type Policy<S, A> = IndexMap<S, A>;

/// Utility estimate of every state at every recorded iteration
pub type Trace<S> = IndexMap<S, Vec<f64>>;

/// Result of one solver run
#[derive(Debug, Clone)]
pub struct Solution<S, A> {
    /// Final utility estimates
    pub utilities: Utilities<S>,
    /// Policy covering every state
    pub policy: Policy<S, A>,
    /// Number of sweeps performed
    pub iteration_count: usize,
    /// Per-state utility trajectory for plotting; never read by the solvers
    pub iteration_utilities: Trace<S>,
    /// Largest absolute utility change of each recorded sweep
    pub max_utility_changes: Vec<f64>,
}

impl<S: Eq + Hash, A: PartialEq> PartialEq for Solution<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.iteration_count == other.iteration_count
            && self.utilities == other.utilities
            && self.policy == other.policy
            && self.iteration_utilities == other.iteration_utilities
            && self.max_utility_changes == other.max_utility_changes
    }
}

/// Solution type produced for a given MDP
pub type SolutionFor<M> = Solution<<M as Mdp>::State, <M as Mdp>::Action>;

impl<S, A> Solution<S, A>
where
    S: Eq + Hash,
{
    /// Utility of a state, if it was solved
    pub fn utility(&self, state: &S) -> Option<f64> {
        self.utilities.get(state).copied()
    }

    /// Action chosen for a state, if it was solved
    pub fn action(&self, state: &S) -> Option<&A> {
        self.policy.get(state)
    }

    /// Number of solved states
    pub fn len(&self) -> usize {
        self.utilities.len()
    }

    /// Whether no state was solved
    pub fn is_empty(&self) -> bool {
        self.utilities.is_empty()
    }
}

/// Zero utility for every state of `mdp`
pub(crate) fn zero_utilities<M: Mdp>(mdp: &M) -> Utilities<M::State> {
    mdp.states().iter().map(|s| (*s, 0.0)).collect()
}

/// Largest |new − old| over all states
pub(crate) fn max_abs_change<S>(old: &Utilities<S>, new: &Utilities<S>) -> f64
where
    S: Eq + Hash,
{
    new.iter()
        .filter_map(|(s, u)| old.get(s).map(|prev| (u - prev).abs()))
        .fold(0.0, f64::max)
}
