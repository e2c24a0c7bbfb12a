//! Optional per-session observer for submission stages.
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::notify::NotifyError;

/// Metrics observer for submission stages.
///
/// Installed per session with
/// [`FormSession::with_metrics`](crate::FormSession::with_metrics); nothing is
/// recorded when no observer is installed.
pub trait SubmissionMetrics: Send + Sync {
    fn record_validation(&self, latency: Duration, error_count: usize);
    fn record_dispatch(&self, latency: Duration, result: Result<(), NotifyError>);
    fn record_bot(&self, signal: &'static str);
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn SubmissionMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start(recorder: Option<&Arc<dyn SubmissionMetrics>>) -> Option<Self> {
        recorder.map(|recorder| Self {
            recorder: Arc::clone(recorder),
            start: Instant::now(),
        })
    }

    pub(crate) fn record_validation(self, error_count: usize) {
        self.recorder
            .record_validation(self.start.elapsed(), error_count);
    }

    pub(crate) fn record_dispatch(self, result: Result<(), NotifyError>) {
        self.recorder.record_dispatch(self.start.elapsed(), result);
    }
}
