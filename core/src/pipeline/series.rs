use crate::model::Sample;
use std::collections::VecDeque;

/// Append-only in-memory series with an optional retention cap.
///
/// Owned by the running pipeline; readers take `snapshot()` views instead
/// of iterating the live buffer.
pub struct SeriesBuffer {
    samples: VecDeque<Sample>,
    retain: Option<usize>,
}

impl SeriesBuffer {
    pub fn new(retain: Option<usize>) -> Self {
        Self {
            samples: VecDeque::new(),
            retain: retain.map(|cap| cap.max(1)),
        }
    }

    /// Appends the sample as the newest element, evicting the oldest entry
    /// once the retention cap is reached. Never rejects a sample.
    pub fn append(&mut self, sample: Sample) {
        if let Some(cap) = self.retain {
            while self.samples.len() >= cap {
                self.samples.pop_front();
            }
        }
        self.samples.push_back(sample);
    }

    /// Ordered copy of the series at the moment of the call; later appends
    /// never affect the returned view.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
