use motioncore::model::{Axes, Reading};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::time::Duration;

/// Configuration for generating synthetic sensor readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub seed: u64,
    /// Fraction of a full vibration cycle advanced per reading.
    pub vibration_rate: f64,
    pub vibration_amplitude: f64,
    pub spin_amplitude: f64,
    pub noise: f64,
    pub base_temperature: f64,
    pub temperature_drift: f64,
    /// Simulated fetch latency, for exercising slow-store behaviour.
    pub latency_ms: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            vibration_rate: 0.05,
            vibration_amplitude: 6.0,
            spin_amplitude: 40.0,
            noise: 0.3,
            base_temperature: 24.0,
            temperature_drift: 0.02,
            latency_ms: 0,
        }
    }
}

/// Deterministic stand-in for the remote store, used offline and in tests.
pub struct SyntheticSource {
    config: SyntheticConfig,
    rng: StdRng,
    step: u64,
}

impl SyntheticSource {
    pub fn new(config: SyntheticConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            step: 0,
        }
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.config.latency_ms)
    }

    pub fn next_reading(&mut self) -> Reading {
        let phase = self.step as f64 * self.config.vibration_rate * 2.0 * PI;
        let amplitude = self.config.vibration_amplitude;
        let spin = self.config.spin_amplitude;

        let reading = Reading {
            acceleration: Axes::new(
                amplitude * phase.sin() + self.jitter(),
                amplitude * (phase + 2.1).sin() + self.jitter(),
                9.81 + self.jitter(),
            ),
            angular_velocity: Axes::new(
                spin * phase.cos() + self.jitter(),
                spin * (phase + 1.3).cos() + self.jitter(),
                self.jitter(),
            ),
            temperature: self.config.base_temperature
                + self.config.temperature_drift * self.step as f64
                + self.jitter() * 0.1,
        };
        self.step += 1;
        reading
    }

    fn jitter(&mut self) -> f64 {
        if self.config.noise > 0.0 {
            self.rng.gen_range(-self.config.noise..self.config.noise)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_produces_the_same_sequence() {
        let config = SyntheticConfig {
            seed: 13,
            ..Default::default()
        };
        let mut first = SyntheticSource::new(config.clone());
        let mut second = SyntheticSource::new(config);
        for _ in 0..5 {
            assert_eq!(first.next_reading(), second.next_reading());
        }
    }

    #[test]
    fn temperature_drifts_upward_without_noise() {
        let config = SyntheticConfig {
            noise: 0.0,
            temperature_drift: 0.5,
            ..Default::default()
        };
        let mut source = SyntheticSource::new(config);
        let start = source.next_reading().temperature;
        for _ in 0..9 {
            source.next_reading();
        }
        let later = source.next_reading().temperature;
        assert!(later > start);
    }

    #[test]
    fn vibration_stays_within_amplitude_plus_noise() {
        let mut source = SyntheticSource::new(SyntheticConfig::default());
        let bound = 6.0 + 0.3;
        for _ in 0..50 {
            let reading = source.next_reading();
            assert!(reading.acceleration.x.abs() <= bound);
            assert!(reading.acceleration.y.abs() <= bound);
        }
    }
}
