//! The capability set a solvable environment exposes

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// One outcome of taking an action in a state.
///
/// Probability mass is attached to the `nominal` slot (where the move was
/// aimed), while utility is read from `actual` (where the agent ends up
/// after wall and boundary correction). The two may differ and must not be
/// collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome<S> {
    /// Next state before correction
    pub nominal: S,
    /// Next state the agent really occupies
    pub actual: S,
    /// Probability of the nominal slot
    pub probability: f64,
}

/// Markov decision process with a finite state and action set.
///
/// Solvers depend only on this trait, so any environment implementing it
/// can be solved without touching solver code.
pub trait Mdp {
    /// State type
    type State: Copy + Eq + Hash + Debug;
    /// Action type
    type Action: Copy + Eq + Debug;

    /// All states, in a stable enumeration order
    fn states(&self) -> &[Self::State];

    /// All actions, in a stable enumeration order. The first entry is the
    /// default action policy iteration starts from.
    fn actions(&self) -> &[Self::Action];

    /// R(s)
    fn reward(&self, state: &Self::State) -> crate::Result<f64>;

    /// Outcomes of taking `action` in `state`
    fn next_state_distribution(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> crate::Result<&[Outcome<Self::State>]>;

    /// P(candidate | state, action), keyed by the nominal next state.
    /// Returns 0 when `candidate` is not one of the nominal slots.
    ///
    /// Nominal slots of one distribution are expected to be distinct.
    fn transition_probability(
        &self,
        state: &Self::State,
        action: &Self::Action,
        candidate: &Self::State,
    ) -> crate::Result<f64> {
        Ok(self
            .next_state_distribution(state, action)?
            .iter()
            .filter(|outcome| &outcome.nominal == candidate)
            .map(|outcome| outcome.probability)
            .sum())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::MdpError;

    /// Two-state chain: `stay` keeps the state, `switch` moves to the other
    /// one with probability 0.9.
    pub struct Chain {
        states: Vec<u8>,
        actions: Vec<&'static str>,
        rewards: [f64; 2],
        outcomes: Vec<Vec<Outcome<u8>>>,
    }

    impl Chain {
        pub fn new(rewards: [f64; 2]) -> Self {
            let mut outcomes = Vec::new();
            for s in 0..2u8 {
                let other = 1 - s;
                outcomes.push(vec![Outcome {
                    nominal: s,
                    actual: s,
                    probability: 1.0,
                }]);
                outcomes.push(vec![
                    Outcome {
                        nominal: other,
                        actual: other,
                        probability: 0.9,
                    },
                    Outcome {
                        nominal: s,
                        actual: s,
                        probability: 0.1,
                    },
                ]);
            }
            Self {
                states: vec![0, 1],
                actions: vec!["stay", "switch"],
                rewards,
                outcomes,
            }
        }
    }

    impl Mdp for Chain {
        type State = u8;
        type Action = &'static str;

        fn states(&self) -> &[u8] {
            &self.states
        }

        fn actions(&self) -> &[&'static str] {
            &self.actions
        }

        fn reward(&self, state: &u8) -> crate::Result<f64> {
            self.rewards
                .get(usize::from(*state))
                .copied()
                .ok_or_else(|| MdpError::InvalidState(state.to_string()))
        }

        fn next_state_distribution(
            &self,
            state: &u8,
            action: &&'static str,
        ) -> crate::Result<&[Outcome<u8>]> {
            let a = match *action {
                "stay" => 0,
                "switch" => 1,
                other => return Err(MdpError::UnrecognizedAction(other.to_string())),
            };
            self.outcomes
                .get(usize::from(*state) * 2 + a)
                .map(Vec::as_slice)
                .ok_or_else(|| MdpError::InvalidState(state.to_string()))
        }
    }
}
