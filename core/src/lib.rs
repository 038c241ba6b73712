//! Ingestion, buffering, and threshold-alerting core for the Rust
//! motion-telemetry platform.
//!
//! The modules cover the collector pipeline end to end: the sample model,
//! the in-memory series buffer, the durable sample log, and the threshold
//! evaluator that raises operator alerts.

pub mod math;
pub mod model;
pub mod pipeline;
pub mod prelude;
pub mod telemetry;

pub use prelude::{PipelineError, PipelineResult, ThresholdConfig};
