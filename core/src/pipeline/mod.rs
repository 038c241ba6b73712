pub mod logwriter;
pub mod series;
pub mod thresholds;

pub use logwriter::{read_samples, SampleLog};
pub use series::SeriesBuffer;
pub use thresholds::evaluate;
