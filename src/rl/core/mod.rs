//! Core RL abstractions
//!
//! Value vectors produced by the network and the injected network interface.

pub mod network;
pub mod values;

pub use network::{from_fn, FnValueFunction, ValueFunction};
pub use values::{ActionDistribution, AdvantageVector, ValueEstimate};
