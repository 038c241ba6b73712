use crate::model::sample::{Axes, Sample};
use crate::prelude::{PipelineError, PipelineResult};

/// Column header written once at the top of every sample log.
pub const LOG_HEADER: &str = "time,acc_x,acc_y,acc_z,gyro_x,gyro_y,gyro_z,temp";

/// On-disk form of a single sample: one CSV line matching [`LOG_HEADER`].
pub struct LogRecord;

impl LogRecord {
    pub fn encode(sample: &Sample) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            sample.timestamp,
            sample.acceleration.x,
            sample.acceleration.y,
            sample.acceleration.z,
            sample.angular_velocity.x,
            sample.angular_velocity.y,
            sample.angular_velocity.z,
            sample.temperature,
        )
    }

    pub fn parse(line: &str) -> PipelineResult<Sample> {
        let fields: Vec<&str> = line.trim().split(',').collect();
        if fields.len() != 8 {
            return Err(PipelineError::Malformed(format!(
                "expected 8 fields, got {}",
                fields.len()
            )));
        }

        let mut values = [0.0f64; 8];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = field
                .trim()
                .parse()
                .map_err(|_| PipelineError::Malformed(format!("not a number: {field}")))?;
        }

        Ok(Sample {
            timestamp: values[0],
            acceleration: Axes::new(values[1], values[2], values[3]),
            angular_velocity: Axes::new(values[4], values[5], values[6]),
            temperature: values[7],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_a_sample() {
        let sample = Sample {
            timestamp: 1_700_000_001.0,
            acceleration: Axes::new(0.25, -9.81, 3.5),
            angular_velocity: Axes::new(-120.0, 0.0, 42.5),
            temperature: 47.9,
        };
        let restored = LogRecord::parse(&LogRecord::encode(&sample)).unwrap();
        assert_eq!(restored, sample);
    }

    #[test]
    fn parse_rejects_truncated_lines() {
        let err = LogRecord::parse("1,2,3").unwrap_err();
        assert!(matches!(err, PipelineError::Malformed(_)));
    }

    #[test]
    fn parse_rejects_non_numeric_fields() {
        let err = LogRecord::parse("1,2,3,4,5,6,7,warm").unwrap_err();
        assert!(matches!(err, PipelineError::Malformed(_)));
    }
}
