use serde::{Deserialize, Serialize};

/// Polling cadence bounds, in seconds.
pub const MIN_POLL_INTERVAL_SECS: u64 = 1;
pub const MAX_POLL_INTERVAL_SECS: u64 = 10;

/// Clamps a requested poll interval into the allowed cadence band.
pub fn clamp_interval_secs(requested: u64) -> u64 {
    requested.clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS)
}

/// Operator-set alert limits, consulted once per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub accel_limit: f64,
    pub gyro_limit: f64,
    pub temp_limit: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            accel_limit: 10.0,
            gyro_limit: 100.0,
            temp_limit: 50.0,
        }
    }
}

impl ThresholdConfig {
    /// Corrects out-of-range limits to the nearest valid bound. Limits are
    /// never rejected, only clamped.
    pub fn clamped(mut self) -> Self {
        self.accel_limit = self.accel_limit.max(0.0);
        self.gyro_limit = self.gyro_limit.max(0.0);
        self.temp_limit = self.temp_limit.max(0.0);
        self
    }
}

/// Common error type for pipeline execution.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("fetch failure: {0}")]
    Fetch(String),
    #[error("sample log failure: {0}")]
    LogWrite(String),
    #[error("malformed log record: {0}")]
    Malformed(String),
    #[error("configuration out of bounds: {0}")]
    Configuration(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
