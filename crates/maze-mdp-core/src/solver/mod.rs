//! Dynamic-programming solvers

mod policy_iteration;
mod value_iteration;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use policy_iteration::PolicyIteration;
pub use value_iteration::ValueIteration;

use crate::{Mdp, MdpError, Result, SolutionFor, SolverConfig};

/// A solver turning an MDP into utilities and a policy
pub trait Solver {
    /// Human-readable algorithm name
    fn name(&self) -> &'static str;

    /// Run to termination
    fn solve<M: Mdp>(&self, mdp: &M) -> Result<SolutionFor<M>>;
}

/// Runtime choice of solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Value iteration
    ValueIteration = 1,
    /// Policy iteration with k evaluation sweeps per loop
    PolicyIteration = 2,
}

impl Algorithm {
    /// Build the selected solver from `config` and run it on `mdp`
    pub fn solve<M: Mdp>(self, config: &SolverConfig, mdp: &M) -> Result<SolutionFor<M>> {
        match self {
            Self::ValueIteration => ValueIteration::from_config(config)?.solve(mdp),
            Self::PolicyIteration => PolicyIteration::from_config(config)?.solve(mdp),
        }
    }

    /// Short identifier used in file names
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::ValueIteration => "value_iteration",
            Self::PolicyIteration => "policy_iteration",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueIteration => f.write_str("Value Iteration"),
            Self::PolicyIteration => f.write_str("Policy Iteration"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = MdpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "vi" | "value_iteration" | "value-iteration" => Ok(Self::ValueIteration),
            "2" | "pi" | "policy_iteration" | "policy-iteration" => Ok(Self::PolicyIteration),
            other => Err(MdpError::invalid_parameter(
                "algorithm",
                format!("`{other}` is neither value iteration (1) nor policy iteration (2)"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdp::fixtures::Chain;

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("vi".parse::<Algorithm>().unwrap(), Algorithm::ValueIteration);
        assert_eq!("2".parse::<Algorithm>().unwrap(), Algorithm::PolicyIteration);
        assert!("3".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_algorithm_dispatch() {
        let chain = Chain::new([0.0, 1.0]);
        let config = SolverConfig {
            discount: 0.5,
            max_error: 1e-6,
            num_policy_evaluation: 20,
        };
        let vi = Algorithm::ValueIteration.solve(&config, &chain).unwrap();
        let pi = Algorithm::PolicyIteration.solve(&config, &chain).unwrap();
        assert_eq!(vi.policy, pi.policy);
        assert_eq!(pi.iteration_count % 20, 0);
    }

    #[test]
    fn test_algorithm_dispatch_validates_config() {
        let chain = Chain::new([0.0, 1.0]);
        let config = SolverConfig {
            discount: 1.0,
            ..SolverConfig::default()
        };
        assert!(Algorithm::ValueIteration.solve(&config, &chain).is_err());
        assert!(Algorithm::PolicyIteration.solve(&config, &chain).is_err());
    }
}
