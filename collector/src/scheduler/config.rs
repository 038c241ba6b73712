use crate::source::SyntheticConfig;
use anyhow::Context;
use motioncore::prelude::{clamp_interval_secs, PipelineError, ThresholdConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Collector settings, loadable from YAML with per-field CLI overrides.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub poll_interval_seconds: u64,
    pub fetch_timeout_seconds: u64,
    pub thresholds: ThresholdConfig,
    pub log_path: PathBuf,
    /// Remote store URL; when absent the synthetic source is used.
    pub source_url: Option<String>,
    /// Optional in-memory retention cap. The durable log keeps everything.
    pub retain: Option<usize>,
    pub synthetic: SyntheticConfig,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: 5,
            fetch_timeout_seconds: 10,
            thresholds: ThresholdConfig::default(),
            log_path: PathBuf::from("tools/data/sensor_log.csv"),
            source_url: None,
            retain: None,
            synthetic: SyntheticConfig::default(),
        }
    }
}

impl CollectorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading collector config {}", path_ref.display()))?;
        let config: CollectorConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing collector config {}", path_ref.display()))?;
        Ok(config.normalized())
    }

    /// Corrects every bounded field to its nearest valid value. Out-of-range
    /// settings are surfaced as a warning, never rejected.
    pub fn normalized(mut self) -> Self {
        let clamped = clamp_interval_secs(self.poll_interval_seconds);
        if clamped != self.poll_interval_seconds {
            let err = PipelineError::Configuration(format!(
                "poll interval {}s clamped to {}s",
                self.poll_interval_seconds, clamped
            ));
            log::warn!("{}", err);
        }
        self.poll_interval_seconds = clamped;
        self.fetch_timeout_seconds = self.fetch_timeout_seconds.max(1);
        self.thresholds = self.thresholds.clamped();
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_already_in_bounds() {
        let config = CollectorConfig::default().normalized();
        assert_eq!(config.poll_interval_seconds, 5);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.thresholds, ThresholdConfig::default());
    }

    #[test]
    fn out_of_range_settings_are_clamped_not_rejected() {
        let config = CollectorConfig {
            poll_interval_seconds: 60,
            fetch_timeout_seconds: 0,
            thresholds: ThresholdConfig {
                accel_limit: -1.0,
                gyro_limit: 100.0,
                temp_limit: 50.0,
            },
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.poll_interval_seconds, 10);
        assert_eq!(config.fetch_timeout_seconds, 1);
        assert_eq!(config.thresholds.accel_limit, 0.0);

        let config = CollectorConfig {
            poll_interval_seconds: 0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.poll_interval_seconds, 1);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"poll_interval_seconds: 3\nthresholds:\n  accel_limit: 12.5\nlog_path: /tmp/sensors.csv\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let config = CollectorConfig::load(&path).unwrap();
        assert_eq!(config.poll_interval_seconds, 3);
        assert_eq!(config.thresholds.accel_limit, 12.5);
        assert_eq!(config.thresholds.gyro_limit, 100.0);
        assert_eq!(config.log_path, PathBuf::from("/tmp/sensors.csv"));
    }
}
