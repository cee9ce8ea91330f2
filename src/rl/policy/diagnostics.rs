//! Decision diagnostics
//!
//! Sinks receive every decision made while the policy runs in debug mode.
//! - NoopSink:      discards everything
//! - TracingSink:   one `tracing::debug!` line per quantity
//! - RecordingSink: keeps decisions in memory for inspection

use std::sync::Mutex;

use tracing::debug;

use super::Decision;

/// Log target used by [`TracingSink`]
pub const DIAGNOSTICS_TARGET: &str = "arm_policy::diagnostics";

/// Abstract sink for per-decision diagnostics.
pub trait DiagnosticSink {
    fn record(&self, decision: &Decision);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn record(&self, decision: &Decision) {
        (**self).record(decision)
    }
}

/// Sink that discards all decisions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&self, _decision: &Decision) {}
}

/// Default sink: reports each quantity through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, decision: &Decision) {
        debug!(target: DIAGNOSTICS_TARGET, counterfactuals = ?decision.estimate.counterfactuals(), "q_plus");
        debug!(target: DIAGNOSTICS_TARGET, baseline = decision.estimate.baseline(), "v");
        debug!(target: DIAGNOSTICS_TARGET, advantages = ?decision.advantages.as_slice(), "action values");
        debug!(target: DIAGNOSTICS_TARGET, probabilities = ?decision.distribution.probabilities(), "action probs");
        debug!(
            target: DIAGNOSTICS_TARGET,
            action = decision.action,
            uniform_fallback = decision.advantages.is_degenerate(),
            "action"
        );
    }
}

/// Keeps every recorded decision behind a mutex.
#[derive(Debug, Default)]
pub struct RecordingSink {
    decisions: Mutex<Vec<Decision>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the decisions recorded so far
    pub fn decisions(&self) -> Vec<Decision> {
        self.decisions
            .lock()
            .map(|d| d.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn len(&self) -> usize {
        self.decisions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, decision: &Decision) {
        let mut guard = self
            .decisions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.push(decision.clone());
    }
}


/// Run `f` under a scoped subscriber and return everything it logged.
#[cfg(test)]
pub(crate) fn capture_logs(f: impl FnOnce()) -> String {
    use std::sync::Arc;

    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = Arc::clone(&buffer);
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || CaptureWriter(Arc::clone(&writer)))
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_target(true)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
