//! Error types for the MDP core library

use thiserror::Error;

/// Core error type for MDP construction and solving
#[derive(Error, Debug)]
pub enum MdpError {
    /// A coordinate outside the grid or on a wall was queried
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A solver or generator parameter is out of range
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Action outside the four-direction enumeration
    #[error("Unrecognized action: {0}")]
    UnrecognizedAction(String),

    /// Malformed grid layout
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MdpError {
    /// Shorthand for [`MdpError::InvalidParameter`]
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type alias for MDP operations
pub type Result<T> = std::result::Result<T, MdpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = MdpError::invalid_parameter("discount", "must lie strictly between 0 and 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `discount`: must lie strictly between 0 and 1"
        );
    }
}
