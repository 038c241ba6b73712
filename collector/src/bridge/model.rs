use motioncore::model::{Alert, Sample};
use motioncore::prelude::ThresholdConfig;
use serde::{Deserialize, Serialize};

/// Per-cycle outcome the rendering layer distinguishes visually, alongside
/// any active alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CycleStatus {
    /// Nothing has ever been ingested.
    #[default]
    NoData,
    Ok,
    FetchFailed,
}

/// State served to the rendering layer after every cycle.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardModel {
    pub series: Vec<Sample>,
    pub alerts: Vec<Alert>,
    pub status: CycleStatus,
    pub thresholds: ThresholdConfig,
}
