use motioncore::model::{Axes, Reading};
use motioncore::prelude::{PipelineError, PipelineResult};
use serde::Deserialize;
use std::time::Duration;

/// Latest-reading payload shape published by the remote key-value store.
/// Missing axis fields read as zero, matching what the sensor writer omits.
#[derive(Debug, Deserialize)]
struct RemotePayload {
    acceleration: AxesPayload,
    gyroscope: AxesPayload,
    #[serde(default)]
    temperature: f64,
}

#[derive(Debug, Default, Deserialize)]
struct AxesPayload {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    z: f64,
}

impl From<RemotePayload> for Reading {
    fn from(payload: RemotePayload) -> Self {
        Reading {
            acceleration: Axes::new(
                payload.acceleration.x,
                payload.acceleration.y,
                payload.acceleration.z,
            ),
            angular_velocity: Axes::new(
                payload.gyroscope.x,
                payload.gyroscope.y,
                payload.gyroscope.z,
            ),
            temperature: payload.temperature,
        }
    }
}

/// Polls the remote store for the latest published reading.
pub struct RemoteSource {
    url: String,
    client: reqwest::Client,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> PipelineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PipelineError::Fetch(format!("building http client: {err}")))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// `None` means the store answered with an empty document, which is
    /// expected before the sensor has published anything.
    pub async fn fetch_latest(&self) -> PipelineResult<Option<Reading>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| PipelineError::Fetch(format!("{}: {err}", self.url)))?;
        if !response.status().is_success() {
            return Err(PipelineError::Fetch(format!(
                "{} returned {}",
                self.url,
                response.status()
            )));
        }
        let payload: Option<RemotePayload> = response
            .json()
            .await
            .map_err(|err| PipelineError::Fetch(format!("decoding latest reading: {err}")))?;
        Ok(payload.map(Reading::from))
    }
}
