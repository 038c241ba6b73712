use crate::math::stats::StatsHelper;
use crate::model::{Alert, AlertKind, Sample};
use crate::prelude::ThresholdConfig;

/// Evaluates the newest sample against the operator thresholds.
///
/// Emits at most one alert per category per cycle: acceleration and
/// angular velocity trigger when any axis magnitude exceeds the limit,
/// reporting the largest-magnitude axis value; temperature triggers only
/// when it rises above its limit. Equality never triggers. Carries no
/// state between evaluations.
pub fn evaluate(sample: &Sample, thresholds: &ThresholdConfig) -> Vec<Alert> {
    let mut alerts = Vec::new();

    let accel_peak = StatsHelper::max_abs(&[
        sample.acceleration.x,
        sample.acceleration.y,
        sample.acceleration.z,
    ]);
    if accel_peak.abs() > thresholds.accel_limit {
        alerts.push(Alert::new(
            AlertKind::AccelerationExceeded,
            accel_peak,
            thresholds.accel_limit,
        ));
    }

    let gyro_peak = StatsHelper::max_abs(&[
        sample.angular_velocity.x,
        sample.angular_velocity.y,
        sample.angular_velocity.z,
    ]);
    if gyro_peak.abs() > thresholds.gyro_limit {
        alerts.push(Alert::new(
            AlertKind::GyroscopeExceeded,
            gyro_peak,
            thresholds.gyro_limit,
        ));
    }

    if sample.temperature > thresholds.temp_limit {
        alerts.push(Alert::new(
            AlertKind::TemperatureExceeded,
            sample.temperature,
            thresholds.temp_limit,
        ));
    }

    alerts
}
