//! One-step Bellman backups shared by both solvers
//!
//! U′(s) ← R(s) + γ · maxₐ Σ P(s′|s,a) U(s′)

use crate::{DiscountFactor, Mdp, MdpError, Result, Utilities};

/// Σ P(s′|s,a) · U(s′) for a single action.
///
/// The probability is looked up by the nominal next state while the utility
/// is read at the actual (corrected) next state.
pub fn expected_utility<M: Mdp>(
    mdp: &M,
    state: &M::State,
    action: &M::Action,
    utilities: &Utilities<M::State>,
) -> Result<f64> {
    let mut total = 0.0;
    for outcome in mdp.next_state_distribution(state, action)? {
        let probability = mdp.transition_probability(state, action, &outcome.nominal)?;
        let utility = utilities
            .get(&outcome.actual)
            .ok_or_else(|| MdpError::InvalidState(format!("{:?}", outcome.actual)))?;
        total += probability * utility;
    }
    Ok(total)
}

/// Arg-max of [`expected_utility`] over all actions.
///
/// Actions are tried in `mdp.actions()` order and only a strictly larger
/// value replaces the current best, so the first maximal action wins.
pub fn best_action<M: Mdp>(
    mdp: &M,
    state: &M::State,
    utilities: &Utilities<M::State>,
) -> Result<(M::Action, f64)> {
    let mut best: Option<(M::Action, f64)> = None;
    for action in mdp.actions() {
        let value = expected_utility(mdp, state, action, utilities)?;
        if best.map_or(true, |(_, max)| value > max) {
            best = Some((*action, value));
        }
    }
    best.ok_or_else(|| MdpError::InvalidState(format!("{state:?} has no available action")))
}

/// Bellman optimality update for one state, paired with the maximizing action
pub fn backup<M: Mdp>(
    mdp: &M,
    state: &M::State,
    utilities: &Utilities<M::State>,
    discount: DiscountFactor,
) -> Result<(f64, M::Action)> {
    let (action, max_expected) = best_action(mdp, state, utilities)?;
    Ok((mdp.reward(state)? + discount.value() * max_expected, action))
}

/// Fixed-policy update R(s) + γ · Σ P(s′|s,π(s)) U(s′)
pub fn policy_backup<M: Mdp>(
    mdp: &M,
    state: &M::State,
    action: &M::Action,
    utilities: &Utilities<M::State>,
    discount: DiscountFactor,
) -> Result<f64> {
    let expected = expected_utility(mdp, state, action, utilities)?;
    Ok(mdp.reward(state)? + discount.value() * expected)
}
