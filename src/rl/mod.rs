//! Reinforcement Learning Module
//!
//! Advantage-based action selection on top of an injected value network.
//!
//! # Features
//!
//! - **Value vectors**: baseline plus per-action counterfactual values
//! - **Clipped advantage**: `max(0, counterfactual - baseline)` per action
//! - **Sampling**: categorical draw, uniform when no action beats the baseline
//! - **Diagnostics**: pluggable sinks for debug-mode decision reports

pub mod core;
pub mod policy;

// Core exports
pub use core::{
    from_fn, ActionDistribution, AdvantageVector, FnValueFunction, ValueEstimate, ValueFunction,
};

// Policy exports
pub use policy::{
    ActionPolicy, ArmPolicy, Decision, DiagnosticSink, NoopSink, RecordingSink, TracingSink,
};
