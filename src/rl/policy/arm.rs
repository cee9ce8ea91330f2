//! ARM policy
//!
//! Samples actions in proportion to their clipped advantage over the
//! network's baseline value estimate.

use rand::Rng;
use tracing::trace;

use super::diagnostics::{DiagnosticSink, TracingSink};
use super::{ActionPolicy, Decision};
use crate::config::PolicyConfig;
use crate::error::{ArmError, Result};
use crate::rl::core::{ActionDistribution, ValueEstimate, ValueFunction};

/// Advantage-based stochastic action policy.
///
/// The network must return `action_dim + 1` values per observation: a
/// baseline followed by one counterfactual value per action. Each action is
/// drawn with probability proportional to `max(0, counterfactual - baseline)`,
/// or uniformly when no action beats the baseline.
///
/// All configuration is fixed at construction, so a policy can be shared
/// across threads whenever its network and sink can.
#[derive(Debug, Clone)]
pub struct ArmPolicy<V, S = TracingSink> {
    network: V,
    /// Reserved for a future advantage variant; not read by selection.
    future: bool,
    debug: bool,
    sink: S,
}

impl<V: ValueFunction> ArmPolicy<V> {
    /// Create a policy around `network`. Performs no validation.
    pub fn new(network: V, future: bool, debug: bool) -> Self {
        Self {
            network,
            future,
            debug,
            sink: TracingSink,
        }
    }

    pub fn from_config(network: V, config: &PolicyConfig) -> Self {
        Self::new(network, config.future, config.debug)
    }
}

impl<V, S> ArmPolicy<V, S> {
    /// Replace the diagnostic sink used in debug mode.
    pub fn with_sink<S2: DiagnosticSink>(self, sink: S2) -> ArmPolicy<V, S2> {
        ArmPolicy {
            network: self.network,
            future: self.future,
            debug: self.debug,
            sink,
        }
    }

    pub fn network(&self) -> &V {
        &self.network
    }

    pub fn future(&self) -> bool {
        self.future
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<V: ValueFunction, S: DiagnosticSink> ArmPolicy<V, S> {
    /// Evaluate the network and validate each row against `action_dim`.
    fn estimates(&self, batch: &[V::Observation], action_dim: usize) -> Result<Vec<ValueEstimate>> {
        if action_dim == 0 {
            return Err(ArmError::InvalidActionDim(action_dim));
        }
        self.network
            .evaluate(batch)?
            .into_iter()
            .map(|row| ValueEstimate::new(row, action_dim))
            .collect()
    }

    /// Evaluate a batch that must produce exactly one value estimate.
    fn single_estimate(&self, batch: &[V::Observation], action_dim: usize) -> Result<ValueEstimate> {
        let mut estimates = self.estimates(batch, action_dim)?;
        if estimates.len() != 1 {
            return Err(ArmError::BatchMismatch {
                expected: 1,
                got: estimates.len(),
            });
        }
        Ok(estimates.remove(0))
    }

    /// Sample from one estimate and report it when in debug mode.
    fn decide_estimate<R: Rng + ?Sized>(&self, estimate: ValueEstimate, rng: &mut R) -> Result<Decision> {
        let advantages = estimate.advantages();
        let distribution = estimate.distribution();
        let action = distribution.sample(rng)?;

        let decision = Decision {
            estimate,
            advantages,
            distribution,
            action,
        };
        if self.debug {
            self.sink.record(&decision);
        }
        Ok(decision)
    }

    /// Distribution the next action would be drawn from.
    ///
    /// Deterministic for a fixed network output.
    pub fn action_distribution(
        &self,
        batch: &[V::Observation],
        action_dim: usize,
    ) -> Result<ActionDistribution> {
        let estimate = self.single_estimate(batch, action_dim)?;
        Ok(estimate.distribution())
    }

    /// Run a full selection and return every intermediate.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        batch: &[V::Observation],
        action_dim: usize,
        rng: &mut R,
    ) -> Result<Decision> {
        let estimate = self.single_estimate(batch, action_dim)?;
        self.decide_estimate(estimate, rng)
    }

    /// Select an action using the caller's RNG.
    pub fn select_action_with_rng<R: Rng + ?Sized>(
        &self,
        batch: &[V::Observation],
        action_dim: usize,
        rng: &mut R,
    ) -> Result<usize> {
        self.decide(batch, action_dim, rng).map(|d| d.action)
    }

    /// Select an action using the thread-local RNG.
    pub fn select_action(&self, batch: &[V::Observation], action_dim: usize) -> Result<usize> {
        self.select_action_with_rng(batch, action_dim, &mut rand::thread_rng())
    }

    /// Select one action per observation in the batch.
    pub fn select_actions_with_rng<R: Rng + ?Sized>(
        &self,
        batch: &[V::Observation],
        action_dim: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        let estimates = self.estimates(batch, action_dim)?;
        if estimates.len() != batch.len() {
            return Err(ArmError::BatchMismatch {
                expected: batch.len(),
                got: estimates.len(),
            });
        }
        trace!(rows = estimates.len(), action_dim, "selecting batch actions");
        estimates
            .into_iter()
            .map(|estimate| self.decide_estimate(estimate, rng).map(|d| d.action))
            .collect()
    }

    pub fn select_actions(&self, batch: &[V::Observation], action_dim: usize) -> Result<Vec<usize>> {
        self.select_actions_with_rng(batch, action_dim, &mut rand::thread_rng())
    }
}

impl<V: ValueFunction, S: DiagnosticSink> ActionPolicy for ArmPolicy<V, S> {
    type Observation = V::Observation;

    fn select_action(&self, batch: &[Self::Observation], action_dim: usize) -> Result<usize> {
        ArmPolicy::select_action(self, batch, action_dim)
    }
}
