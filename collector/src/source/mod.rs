use motioncore::model::Reading;
use motioncore::prelude::PipelineResult;
use std::time::Duration;

pub mod remote;
pub mod synthetic;

pub use remote::RemoteSource;
pub use synthetic::{SyntheticConfig, SyntheticSource};

/// Where the collector pulls its readings from.
pub enum SampleSource {
    Remote(RemoteSource),
    Synthetic(SyntheticSource),
}

impl SampleSource {
    /// Fetches the latest reading, or `None` when the store holds nothing.
    pub async fn fetch_latest(&mut self) -> PipelineResult<Option<Reading>> {
        match self {
            SampleSource::Remote(source) => source.fetch_latest().await,
            SampleSource::Synthetic(source) => {
                let latency = source.latency();
                if latency > Duration::ZERO {
                    tokio::time::sleep(latency).await;
                }
                Ok(Some(source.next_reading()))
            }
        }
    }
}
