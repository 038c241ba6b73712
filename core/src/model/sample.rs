use serde::{Deserialize, Serialize};

/// One three-axis vector as reported by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Axes {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A sensor observation as fetched from the remote store, not yet stamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub acceleration: Axes,
    pub angular_velocity: Axes,
    pub temperature: f64,
}

/// One immutable telemetry observation.
///
/// Acceleration is in m/s², angular velocity in °/s, temperature in °C.
/// The timestamp is unix seconds assigned at ingestion, never taken from
/// the remote source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: f64,
    pub acceleration: Axes,
    pub angular_velocity: Axes,
    pub temperature: f64,
}

impl Sample {
    pub fn from_reading(reading: Reading, timestamp: f64) -> Self {
        Self {
            timestamp,
            acceleration: reading.acceleration,
            angular_velocity: reading.angular_velocity,
            temperature: reading.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_keeps_the_ingestion_timestamp() {
        let reading = Reading {
            acceleration: Axes::new(0.1, -0.2, 9.8),
            angular_velocity: Axes::new(1.0, 2.0, 3.0),
            temperature: 24.5,
        };
        let sample = Sample::from_reading(reading.clone(), 1_700_000_000.0);
        assert_eq!(sample.timestamp, 1_700_000_000.0);
        assert_eq!(sample.acceleration, reading.acceleration);
        assert_eq!(sample.temperature, 24.5);
    }

    #[test]
    fn sample_serializes_with_nested_axis_fields() {
        let sample = Sample {
            timestamp: 10.0,
            acceleration: Axes::new(11.0, 0.0, 0.0),
            angular_velocity: Axes::new(0.0, 0.0, 0.0),
            temperature: 30.0,
        };
        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["acceleration"]["x"], 11.0);
        assert_eq!(value["angular_velocity"]["z"], 0.0);
        assert_eq!(value["temperature"], 30.0);
    }
}
