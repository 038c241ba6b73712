use std::sync::Mutex;

/// Counters over cycle outcomes, readable while the scheduler runs.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    cycles: usize,
    fetch_failures: usize,
    log_write_failures: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                cycles: 0,
                fetch_failures: 0,
                log_write_failures: 0,
            }),
        }
    }

    pub fn record_cycle(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.cycles += 1;
        }
    }

    pub fn record_fetch_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.fetch_failures += 1;
        }
    }

    pub fn record_log_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.log_write_failures += 1;
        }
    }

    /// `(cycles, fetch_failures, log_write_failures)` at the moment of the call.
    pub fn snapshot(&self) -> (usize, usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (
                metrics.cycles,
                metrics.fetch_failures,
                metrics.log_write_failures,
            )
        } else {
            (0, 0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
