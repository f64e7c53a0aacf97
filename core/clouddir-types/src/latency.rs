//! Round-trip latency samples.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Wall-clock time of one read iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySample {
    /// Zero-based iteration index.
    pub iteration: usize,
    pub elapsed: Duration,
}

impl LatencySample {
    #[must_use]
    pub const fn new(iteration: usize, elapsed: Duration) -> Self {
        Self { iteration, elapsed }
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl fmt::Display for LatencySample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ Retrieving Metric, takes {} sec]", self.elapsed_secs())
    }
}

/// Aggregate over a run's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub count: usize,
    pub min: Duration,
    pub max: Duration,
    pub mean: Duration,
}

impl LatencySummary {
    /// Summarizes `samples`, or `None` if there are none.
    #[must_use]
    pub fn from_samples(samples: &[LatencySample]) -> Option<Self> {
        let first = samples.first()?;
        let mut min = first.elapsed;
        let mut max = first.elapsed;
        let mut total = Duration::ZERO;
        for sample in samples {
            min = min.min(sample.elapsed);
            max = max.max(sample.elapsed);
            total += sample.elapsed;
        }
        let count = samples.len();
        let divisor = u32::try_from(count).ok()?;
        Some(Self {
            count,
            min,
            max,
            mean: total / divisor,
        })
    }
}
