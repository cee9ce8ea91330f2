//! Action policies
//!
//! Turn network value estimates into sampled discrete actions.

pub mod arm;
pub mod diagnostics;

use crate::error::Result;
use crate::rl::core::{ActionDistribution, AdvantageVector, ValueEstimate};

pub use arm::ArmPolicy;
pub use diagnostics::{DiagnosticSink, NoopSink, RecordingSink, TracingSink, DIAGNOSTICS_TARGET};

/// Strategy interface for anything that picks a discrete action from observations.
pub trait ActionPolicy {
    type Observation;

    /// Pick an action index in `[0, action_dim)`.
    fn select_action(&self, batch: &[Self::Observation], action_dim: usize) -> Result<usize>;
}

/// Every intermediate of a single action selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub estimate: ValueEstimate,
    pub advantages: AdvantageVector,
    pub distribution: ActionDistribution,
    pub action: usize,
}

impl Decision {
    /// Probability the sampled action had under the distribution
    pub fn action_probability(&self) -> f64 {
        self.distribution.probability(self.action).unwrap_or(0.0)
    }
}
