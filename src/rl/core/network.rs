//! Value Network Interface
//!
//! The policy never owns a network architecture. Callers inject anything that
//! maps a batch of observations to one raw value vector per observation.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::Result;

/// Value-estimation capability consumed by the policy.
///
/// Each returned row must hold `action_dim + 1` values: the baseline first,
/// then one counterfactual value per action. The policy validates row shape,
/// so implementations may return whatever their model produced.
///
/// Implementations used from several threads must be `Send + Sync`; the policy
/// passes that requirement through without adding locking of its own.
#[cfg_attr(test, mockall::automock(type Observation = Vec<f64>;))]
pub trait ValueFunction {
    /// Single observation as the network expects it
    type Observation;

    /// Evaluate a batch of observations.
    fn evaluate(&self, batch: &[Self::Observation]) -> Result<Vec<Vec<f64>>>;
}

impl<V: ValueFunction + ?Sized> ValueFunction for &V {
    type Observation = V::Observation;

    fn evaluate(&self, batch: &[Self::Observation]) -> Result<Vec<Vec<f64>>> {
        (**self).evaluate(batch)
    }
}

impl<V: ValueFunction + ?Sized> ValueFunction for Box<V> {
    type Observation = V::Observation;

    fn evaluate(&self, batch: &[Self::Observation]) -> Result<Vec<Vec<f64>>> {
        (**self).evaluate(batch)
    }
}

impl<V: ValueFunction + ?Sized> ValueFunction for Arc<V> {
    type Observation = V::Observation;

    fn evaluate(&self, batch: &[Self::Observation]) -> Result<Vec<Vec<f64>>> {
        (**self).evaluate(batch)
    }
}

/// Closure-backed value function, built with [`from_fn`].
pub struct FnValueFunction<F, O> {
    f: F,
    _observation: PhantomData<fn(&O)>,
}

impl<F, O> std::fmt::Debug for FnValueFunction<F, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnValueFunction").finish_non_exhaustive()
    }
}

impl<F: Clone, O> Clone for FnValueFunction<F, O> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _observation: PhantomData,
        }
    }
}

/// Wrap a closure as a [`ValueFunction`].
pub fn from_fn<O, F>(f: F) -> FnValueFunction<F, O>
where
    F: Fn(&[O]) -> Result<Vec<Vec<f64>>>,
{
    FnValueFunction {
        f,
        _observation: PhantomData,
    }
}

impl<F, O> ValueFunction for FnValueFunction<F, O>
where
    F: Fn(&[O]) -> Result<Vec<Vec<f64>>>,
{
    type Observation = O;

    fn evaluate(&self, batch: &[O]) -> Result<Vec<Vec<f64>>> {
        (self.f)(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArmError;

    #[test]
    fn closure_receives_the_batch() {
        let net = from_fn(|batch: &[Vec<f64>]| {
            Ok(batch
                .iter()
                .map(|obs| vec![0.0, obs.iter().sum::<f64>()])
                .collect())
        });
        let out = net.evaluate(&[vec![1.0, 2.0], vec![3.0]]).unwrap();
        assert_eq!(out, vec![vec![0.0, 3.0], vec![0.0, 3.0]]);
    }

    #[test]
    fn shared_network_forwards_through_arc() {
        let net = Arc::new(from_fn(|_: &[u8]| Ok(vec![vec![1.0, 2.0]])));
        let by_ref = &net;
        assert_eq!(by_ref.evaluate(&[0]).unwrap(), vec![vec![1.0, 2.0]]);

        let boxed: Box<dyn ValueFunction<Observation = u8>> = Box::new(Arc::clone(&net));
        assert_eq!(boxed.evaluate(&[0]).unwrap(), vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn mock_errors_propagate() {
        let mut mock = MockValueFunction::new();
        mock.expect_evaluate()
            .times(1)
            .returning(|_| Err(ArmError::ValueFunction("weights not loaded".to_string())));

        let err = mock.evaluate(&[vec![0.0]]).unwrap_err();
        assert!(err.to_string().contains("weights not loaded"));
    }
}
