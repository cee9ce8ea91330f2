use thiserror::Error;

/// Main error type for the action policy
#[derive(Error, Debug)]
pub enum ArmError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging initialization failed: {0}")]
    Logging(String),

    // Caller contract violations
    #[error("Value estimate shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Invalid action dimension: {0} (must be > 0)")]
    InvalidActionDim(usize),

    #[error("Batch mismatch: expected {expected} value estimates, got {got}")]
    BatchMismatch { expected: usize, got: usize },

    #[error("Non-finite value estimate at index {index}: {value}")]
    NonFiniteValue { index: usize, value: f64 },

    // Network errors
    #[error("Value function failed: {0}")]
    ValueFunction(String),

    // Sampling errors
    #[error("Sampling failed: {0}")]
    Sampling(#[from] rand::distributions::WeightedError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for ArmError
pub type Result<T> = std::result::Result<T, ArmError>;

impl ArmError {
    /// True for errors caused by the caller breaking the policy's input contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. }
                | Self::InvalidActionDim(_)
                | Self::BatchMismatch { .. }
                | Self::NonFiniteValue { .. }
        )
    }
}
