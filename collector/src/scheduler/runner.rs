use crate::bridge::model::{CycleStatus, DashboardModel};
use crate::scheduler::config::CollectorConfig;
use crate::source::SampleSource;
use anyhow::Context;
use motioncore::model::{Alert, Reading, Sample};
use motioncore::pipeline::{evaluate, SampleLog, SeriesBuffer};
use motioncore::prelude::{clamp_interval_secs, PipelineResult, ThresholdConfig};
use motioncore::telemetry::{LogManager, MetricsRecorder};
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Runtime-adjustable pipeline controls, shared with the bridge.
#[derive(Debug, Clone)]
pub struct Controls {
    pub thresholds: ThresholdConfig,
    pub interval_secs: u64,
}

pub type SharedControls = Arc<RwLock<Controls>>;
pub type SharedDashboard = Arc<RwLock<DashboardModel>>;

/// Outcome of a single poll cycle.
pub struct CycleOutcome {
    pub appended: bool,
    pub status: CycleStatus,
    pub alerts: Vec<Alert>,
}

/// Drives the pipeline: fetch, stamp, buffer, persist, evaluate, publish.
pub struct Runner {
    source: SampleSource,
    buffer: SeriesBuffer,
    log: SampleLog,
    metrics: Arc<MetricsRecorder>,
    logger: LogManager,
    controls: SharedControls,
    dashboard: SharedDashboard,
}

impl Runner {
    pub fn new(
        config: &CollectorConfig,
        source: SampleSource,
        controls: SharedControls,
        dashboard: SharedDashboard,
    ) -> anyhow::Result<Self> {
        let log = SampleLog::create(&config.log_path)
            .with_context(|| format!("opening sample log {}", config.log_path.display()))?;
        Ok(Self {
            source,
            buffer: SeriesBuffer::new(config.retain),
            log,
            metrics: Arc::new(MetricsRecorder::new()),
            logger: LogManager::new(),
            controls,
            dashboard,
        })
    }

    pub fn metrics_handle(&self) -> Arc<MetricsRecorder> {
        self.metrics.clone()
    }

    /// Runs the poll loop until the shutdown flag flips. Missed ticks are
    /// skipped, never queued, so at most one fetch is in flight; the tick
    /// boundary is the only cancellation point, letting in-flight work
    /// finish before exit.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut period = self.current_period();
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            }

            let outcome = self.run_cycle().await;
            self.logger.record(&format!(
                "cycle complete: appended {}, status {:?}, {} buffered, {} alerts",
                outcome.appended,
                outcome.status,
                self.buffer.len(),
                outcome.alerts.len()
            ));

            // Interval updates from the bridge take effect at the next tick.
            let wanted = self.current_period();
            if wanted != period {
                period = wanted;
                ticker = time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            }
        }
    }

    /// One fetch, then the ingest path over its result.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let fetched = self.source.fetch_latest().await;
        self.ingest(fetched)
    }

    /// Applies one fetch result to the buffer, log, and evaluator, and
    /// publishes the resulting view. A failed or empty fetch is a cycle
    /// with zero new samples, never a stop.
    pub fn ingest(&mut self, fetched: PipelineResult<Option<Reading>>) -> CycleOutcome {
        self.metrics.record_cycle();
        let outcome = match fetched {
            Ok(Some(reading)) => {
                let sample = self.stamp(reading);
                self.buffer.append(sample.clone());
                if let Err(err) = self.log.append(&sample) {
                    self.metrics.record_log_failure();
                    self.logger.warn(&format!("sample kept in memory only: {err}"));
                }
                let alerts = evaluate(&sample, &self.current_thresholds());
                CycleOutcome {
                    appended: true,
                    status: CycleStatus::Ok,
                    alerts,
                }
            }
            Ok(None) => {
                let status = if self.buffer.is_empty() {
                    CycleStatus::NoData
                } else {
                    CycleStatus::Ok
                };
                CycleOutcome {
                    appended: false,
                    status,
                    alerts: Vec::new(),
                }
            }
            Err(err) => {
                self.metrics.record_fetch_failure();
                self.logger.warn(&format!("cycle skipped: {err}"));
                CycleOutcome {
                    appended: false,
                    status: CycleStatus::FetchFailed,
                    alerts: Vec::new(),
                }
            }
        };
        self.publish(&outcome);
        outcome
    }

    fn stamp(&self, reading: Reading) -> Sample {
        // Wall clock may step backwards; the series stays non-decreasing.
        let floor = self
            .buffer
            .latest()
            .map(|sample| sample.timestamp)
            .unwrap_or(0.0);
        Sample::from_reading(reading, unix_now().max(floor))
    }

    fn publish(&self, outcome: &CycleOutcome) {
        let mut guard = self.dashboard.write().unwrap();
        *guard = DashboardModel {
            series: self.buffer.snapshot(),
            alerts: outcome.alerts.clone(),
            status: outcome.status,
            thresholds: self.current_thresholds(),
        };
    }

    fn current_thresholds(&self) -> ThresholdConfig {
        self.controls.read().unwrap().thresholds.clone()
    }

    fn current_period(&self) -> Duration {
        Duration::from_secs(clamp_interval_secs(
            self.controls.read().unwrap().interval_secs,
        ))
    }
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SampleSource, SyntheticSource};
    use motioncore::pipeline::read_samples;
    use motioncore::prelude::PipelineError;
    use tempfile::TempPath;

    fn test_runner(latency_ms: u64, interval_secs: u64) -> (Runner, SharedDashboard, TempPath) {
        let path = tempfile::NamedTempFile::new().unwrap().into_temp_path();
        let mut config = CollectorConfig::default();
        config.log_path = path.to_path_buf();
        config.poll_interval_seconds = interval_secs;
        config.synthetic.latency_ms = latency_ms;

        let controls = Arc::new(RwLock::new(Controls {
            thresholds: config.thresholds.clone(),
            interval_secs: config.poll_interval_seconds,
        }));
        let dashboard = Arc::new(RwLock::new(DashboardModel::default()));
        let source = SampleSource::Synthetic(SyntheticSource::new(config.synthetic.clone()));
        let runner = Runner::new(&config, source, controls, dashboard.clone()).unwrap();
        (runner, dashboard, path)
    }

    #[tokio::test]
    async fn cycles_append_in_order_and_publish() {
        let (mut runner, dashboard, path) = test_runner(0, 5);
        for _ in 0..3 {
            let outcome = runner.run_cycle().await;
            assert!(outcome.appended);
        }

        let model = dashboard.read().unwrap().clone();
        assert_eq!(model.series.len(), 3);
        assert!(model
            .series
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp));
        assert_eq!(model.status, CycleStatus::Ok);

        let persisted = read_samples(&path).unwrap();
        assert_eq!(persisted.len(), 3);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_buffer_and_log_untouched() {
        let (mut runner, dashboard, path) = test_runner(0, 5);
        runner.run_cycle().await;
        assert_eq!(runner.buffer.len(), 1);

        let outcome = runner.ingest(Err(PipelineError::Fetch("store unreachable".into())));
        assert!(!outcome.appended);
        assert_eq!(outcome.status, CycleStatus::FetchFailed);
        assert_eq!(runner.buffer.len(), 1);
        assert_eq!(read_samples(&path).unwrap().len(), 1);
        assert_eq!(dashboard.read().unwrap().status, CycleStatus::FetchFailed);
    }

    #[test]
    fn empty_store_before_first_sample_reads_as_no_data() {
        let (mut runner, dashboard, _path) = test_runner(0, 5);
        let outcome = runner.ingest(Ok(None));
        assert!(!outcome.appended);
        assert_eq!(outcome.status, CycleStatus::NoData);
        assert!(dashboard.read().unwrap().series.is_empty());
    }

    #[test]
    fn runtime_interval_updates_are_clamped() {
        let (runner, _dashboard, _path) = test_runner(0, 5);
        runner.controls.write().unwrap().interval_secs = 120;
        assert_eq!(runner.current_period(), Duration::from_secs(10));
        runner.controls.write().unwrap().interval_secs = 0;
        assert_eq!(runner.current_period(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_skips_ticks_instead_of_queueing() {
        // 7s fetches under a 5s interval: at most one fetch per window.
        let (runner, _dashboard, _path) = test_runner(7_000, 5);
        let metrics = runner.metrics_handle();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let scheduler = tokio::spawn(runner.run(shutdown_rx));

        tokio::time::sleep(Duration::from_secs(20)).await;
        shutdown_tx.send(true).unwrap();
        scheduler.await.unwrap();

        let (cycles, fetch_failures, _) = metrics.snapshot();
        assert_eq!(fetch_failures, 0);
        assert!(cycles >= 2, "scheduler stalled: {cycles} cycles");
        assert!(cycles <= 4, "ticks queued instead of skipped: {cycles} cycles");
    }
}
