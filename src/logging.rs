//! Subscriber setup for processes embedding the policy.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the host, which can use these helpers or its own.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{ArmError, Result};

/// Filter from `RUST_LOG`, falling back to the configured level.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install a global text or JSON subscriber.
///
/// Fails instead of panicking when a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let json_layer = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(false)
    });
    let console_layer = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
    });

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .map_err(|e| ArmError::Logging(e.to_string()))
}

pub fn init_logging_simple() {
    // Minimal logging for quick scripts
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_uses_configured_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let cfg = LoggingConfig {
            level: "warn,arm_policy=debug".to_string(),
            json: false,
        };
        let filter = env_filter(&cfg).to_string();
        assert!(filter.contains("warn"), "got: {filter}");
        assert!(filter.contains("arm_policy=debug"), "got: {filter}");
    }

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        let cfg = LoggingConfig {
            json: true,
            ..LoggingConfig::default()
        };
        // The first call may lose a race with another test's subscriber.
        let _ = init_logging(&cfg);
        let err = init_logging(&cfg).unwrap_err();
        assert!(matches!(err, ArmError::Logging(_)));
    }
}
