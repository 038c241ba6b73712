use anyhow::Context;
use bridge::server::Bridge;
use clap::Parser;
use scheduler::config::CollectorConfig;
use scheduler::runner::{Controls, Runner, SharedControls, SharedDashboard};
use source::{RemoteSource, SampleSource, SyntheticSource};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use tokio::sync::watch;

mod bridge;
mod scheduler;
mod source;

#[derive(Parser)]
#[command(author, version, about = "Motion-telemetry collector and alerting driver")]
struct Args {
    /// Run synthetic poll cycles offline and emit a run summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Cycle count for an offline run
    #[arg(long, default_value_t = 30)]
    cycles: usize,
    /// Load a collector config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the poll interval in seconds
    #[arg(long)]
    interval: Option<u64>,
    /// Override the remote store URL
    #[arg(long)]
    source_url: Option<String>,
    /// Override the sample log path
    #[arg(long)]
    log_path: Option<PathBuf>,
    /// Keep the bridge and scheduler alive for live polling
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match args.config.as_ref() {
        Some(path) => CollectorConfig::load(path)?,
        None => CollectorConfig::default(),
    };
    if let Some(interval) = args.interval {
        config.poll_interval_seconds = interval;
    }
    if let Some(url) = args.source_url.clone() {
        config.source_url = Some(url);
    }
    if let Some(path) = args.log_path.clone() {
        config.log_path = path;
    }
    let config = config.normalized();

    if args.offline {
        run_offline(&config, args.cycles)?;
    }
    if args.serve {
        run_serve(&config)?;
    }
    Ok(())
}

fn shared_state(config: &CollectorConfig) -> (SharedControls, SharedDashboard) {
    let controls = Arc::new(RwLock::new(Controls {
        thresholds: config.thresholds.clone(),
        interval_secs: config.poll_interval_seconds,
    }));
    (controls, Arc::new(RwLock::new(Default::default())))
}

fn build_source(config: &CollectorConfig) -> anyhow::Result<SampleSource> {
    match config.source_url.as_ref() {
        Some(url) => Ok(SampleSource::Remote(
            RemoteSource::new(url.clone(), config.fetch_timeout())
                .context("building remote sample source")?,
        )),
        None => Ok(SampleSource::Synthetic(SyntheticSource::new(
            config.synthetic.clone(),
        ))),
    }
}

fn run_offline(config: &CollectorConfig, cycles: usize) -> anyhow::Result<()> {
    let (controls, dashboard) = shared_state(config);
    let source = SampleSource::Synthetic(SyntheticSource::new(config.synthetic.clone()));
    let mut runner = Runner::new(config, source, controls, dashboard)?;

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for offline run")?;
    let mut alert_total = 0usize;
    runtime.block_on(async {
        for _ in 0..cycles {
            let outcome = runner.run_cycle().await;
            alert_total += outcome.alerts.len();
        }
    });

    println!(
        "Offline run -> cycles {}, alerts {}, log {}",
        cycles,
        alert_total,
        config.log_path.display()
    );

    let report = format!(
        "cycles={} alerts={} log={}\n",
        cycles,
        alert_total,
        config.log_path.display()
    );
    let report_path = PathBuf::from("tools/data/offline_run.log");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(report_path)?;
    file.write_all(report.as_bytes())?;
    Ok(())
}

fn run_serve(config: &CollectorConfig) -> anyhow::Result<()> {
    let (controls, dashboard) = shared_state(config);
    let source = build_source(config)?;
    let runner = Runner::new(config, source, controls.clone(), dashboard.clone())?;
    let metrics = runner.metrics_handle();
    let bridge = Bridge::new(dashboard, controls);
    bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating collector runtime")?;
    runtime.block_on(async {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let scheduler = tokio::spawn(runner.run(shutdown_rx));
        signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
        let _ = shutdown_tx.send(true);
        scheduler.await.context("joining scheduler loop")?;
        Ok::<(), anyhow::Error>(())
    })?;

    let (cycles, fetch_failures, log_failures) = metrics.snapshot();
    println!(
        "Collector stopped -> cycles {}, fetch failures {}, log failures {}",
        cycles, fetch_failures, log_failures
    );
    Ok(())
}
