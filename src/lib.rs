pub mod config;
pub mod error;
pub mod logging;
pub mod rl;

pub use config::{AppConfig, LoggingConfig, PolicyConfig};
pub use error::{ArmError, Result};
pub use rl::{
    from_fn, ActionDistribution, ActionPolicy, AdvantageVector, ArmPolicy, Decision,
    DiagnosticSink, NoopSink, RecordingSink, TracingSink, ValueEstimate, ValueFunction,
};
