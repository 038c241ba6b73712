use serde::{Deserialize, Serialize};

/// Threshold categories that can raise an alert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertKind {
    AccelerationExceeded,
    GyroscopeExceeded,
    TemperatureExceeded,
}

/// One threshold breach observed during a poll cycle.
///
/// Alerts are ephemeral: a breaching cycle re-emits its alerts, nothing is
/// persisted or deduplicated across cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub observed: f64,
    pub threshold: f64,
}

impl Alert {
    pub fn new(kind: AlertKind, observed: f64, threshold: f64) -> Self {
        Self {
            kind,
            observed,
            threshold,
        }
    }
}
