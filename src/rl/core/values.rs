//! Value Vectors
//!
//! Raw network output, the clipped advantage derived from it, and the
//! categorical distribution actions are drawn from.

use std::cmp::Ordering;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::{ArmError, Result};

/// Raw network output for one observation.
///
/// Layout: `[baseline, counterfactual_0, .., counterfactual_{action_dim-1}]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEstimate {
    values: Vec<f64>,
}

impl ValueEstimate {
    /// Validate a raw output vector against the action space size.
    pub fn new(values: Vec<f64>, action_dim: usize) -> Result<Self> {
        if action_dim == 0 {
            return Err(ArmError::InvalidActionDim(action_dim));
        }
        if values.len() != action_dim + 1 {
            return Err(ArmError::ShapeMismatch {
                expected: action_dim + 1,
                got: values.len(),
            });
        }
        if let Some((index, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ArmError::NonFiniteValue {
                index,
                value: *value,
            });
        }
        Ok(Self { values })
    }

    /// Expected return under the current behavior
    pub fn baseline(&self) -> f64 {
        self.values[0]
    }

    /// One value per candidate action
    pub fn counterfactuals(&self) -> &[f64] {
        &self.values[1..]
    }

    pub fn action_dim(&self) -> usize {
        self.values.len() - 1
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Clipped advantage of every action over the baseline.
    pub fn advantages(&self) -> AdvantageVector {
        let baseline = self.baseline();
        AdvantageVector(
            self.counterfactuals()
                .iter()
                .map(|q| (q - baseline).max(0.0))
                .collect(),
        )
    }

    /// Distribution actions are drawn from.
    ///
    /// Matches `advantages().to_distribution()` unless a difference overflows
    /// `f64`, in which case advantages are taken over halved values so their
    /// ratios survive.
    pub fn distribution(&self) -> ActionDistribution {
        let advantages = self.advantages();
        if advantages.0.iter().all(|a| a.is_finite()) {
            return advantages.to_distribution();
        }
        let half_baseline = self.baseline() / 2.0;
        AdvantageVector(
            self.counterfactuals()
                .iter()
                .map(|q| (q / 2.0 - half_baseline).max(0.0))
                .collect(),
        )
        .to_distribution()
    }
}

/// Non-negative per-action advantage.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvantageVector(Vec<f64>);

impl AdvantageVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// No action beats the baseline.
    pub fn is_degenerate(&self) -> bool {
        self.total().partial_cmp(&0.0) != Some(Ordering::Greater)
    }

    /// Normalize into a distribution, falling back to uniform when degenerate.
    ///
    /// A sum that overflows is handled by rescaling against the largest
    /// advantage; infinite advantages share the mass equally.
    pub fn to_distribution(&self) -> ActionDistribution {
        let total = self.total();
        if total.is_finite() {
            return if total > 0.0 {
                ActionDistribution(self.0.iter().map(|a| a / total).collect())
            } else {
                ActionDistribution::uniform(self.0.len())
            };
        }

        let max = self.0.iter().copied().fold(0.0_f64, f64::max);
        if max.is_infinite() {
            let count = self.0.iter().filter(|a| a.is_infinite()).count() as f64;
            return ActionDistribution(
                self.0
                    .iter()
                    .map(|a| if a.is_infinite() { 1.0 / count } else { 0.0 })
                    .collect(),
            );
        }
        let scaled: Vec<f64> = self.0.iter().map(|a| a / max).collect();
        let scaled_total: f64 = scaled.iter().sum();
        ActionDistribution(scaled.iter().map(|a| a / scaled_total).collect())
    }
}

/// Categorical distribution over action indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDistribution(Vec<f64>);

impl ActionDistribution {
    /// Equal mass on each of `n` actions
    pub fn uniform(n: usize) -> Self {
        Self(vec![1.0 / n as f64; n])
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.0
    }

    pub fn probability(&self, action: usize) -> Option<f64> {
        self.0.get(action).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Draw a single action index with probability proportional to its mass.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        let dist = WeightedIndex::new(&self.0)?;
        Ok(dist.sample(rng))
    }
}
