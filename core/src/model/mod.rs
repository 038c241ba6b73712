pub mod alert;
pub mod record;
pub mod sample;

pub use alert::{Alert, AlertKind};
pub use record::{LogRecord, LOG_HEADER};
pub use sample::{Axes, Reading, Sample};
