//! Solver parameters

use serde::{Deserialize, Serialize};

use crate::{MdpError, Result};

/// Discount factor γ, strictly inside (0, 1)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct DiscountFactor(f64);

impl DiscountFactor {
    /// Validate and wrap a discount factor
    pub fn new(gamma: f64) -> Result<Self> {
        if gamma > 0.0 && gamma < 1.0 {
            Ok(Self(gamma))
        } else {
            Err(MdpError::invalid_parameter(
                "discount",
                format!("{gamma} must lie strictly between 0 and 1"),
            ))
        }
    }

    /// Get the raw value
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// δ = ε(1 − γ)/γ, the per-sweep utility change under which value
    /// iteration stops
    #[must_use]
    pub fn convergence_threshold(self, max_error: f64) -> f64 {
        max_error * (1.0 - self.0) / self.0
    }
}

impl<'de> Deserialize<'de> for DiscountFactor {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let gamma = f64::deserialize(deserializer)?;
        Self::new(gamma).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<f64> for DiscountFactor {
    type Error = MdpError;

    fn try_from(gamma: f64) -> Result<Self> {
        Self::new(gamma)
    }
}

/// Configuration shared by both solvers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Discount factor for future utility, γ
    pub discount: f64,
    /// Maximum error allowed in the utility of any state, ε (value iteration)
    pub max_error: f64,
    /// Evaluation sweeps per outer loop, k (policy iteration)
    pub num_policy_evaluation: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            discount: 0.99,
            max_error: 78.0,
            num_policy_evaluation: 4,
        }
    }
}

impl SolverConfig {
    /// Check every field, failing on the first invalid one
    pub fn validate(&self) -> Result<()> {
        DiscountFactor::new(self.discount)?;
        validate_max_error(self.max_error)?;
        validate_num_policy_evaluation(self.num_policy_evaluation)?;
        Ok(())
    }

    /// The validated discount factor
    pub fn discount_factor(&self) -> Result<DiscountFactor> {
        DiscountFactor::new(self.discount)
    }
}

pub(crate) fn validate_max_error(max_error: f64) -> Result<f64> {
    if max_error.is_finite() && max_error > 0.0 {
        Ok(max_error)
    } else {
        Err(MdpError::invalid_parameter(
            "max_error",
            format!("{max_error} must be a positive finite number"),
        ))
    }
}

pub(crate) fn validate_num_policy_evaluation(k: usize) -> Result<usize> {
    if k >= 1 {
        Ok(k)
    } else {
        Err(MdpError::invalid_parameter(
            "num_policy_evaluation",
            "at least one evaluation sweep is required",
        ))
    }
}
