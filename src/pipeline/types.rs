use std::time::Duration;

use crate::color::{Classification, LightingMetrics, LightnessReading};

/// Everything produced for one presented frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// `None` when an empty frame was presented by policy
    pub metrics: Option<LightingMetrics>,
    pub classification: Classification,
    /// Present only when lightness analysis is enabled
    pub lightness: Option<LightnessReading>,
    /// Text handed to the status sink
    pub message: String,
    /// Timestamp of the source frame (seconds)
    pub timestamp: f64,
}

impl FrameReport {
    /// Average brightness, 0 when no metrics were computed.
    pub fn brightness(&self) -> f64 {
        self.metrics.map_or(0.0, |m| m.average_brightness)
    }
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Presented(FrameReport),
    /// Frame had no pixels and was not presented
    Skipped,
    /// Source has no more frames
    EndOfStream,
}

/// Counters kept across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Frames taken from the source
    pub ticks: u64,
    pub presented: u64,
    pub skipped: u64,
    /// Ticks that took longer than the frame budget
    pub deadline_misses: u64,
    /// Longest tick observed
    pub worst_case: Duration,
}

impl LoopStats {
    pub(super) fn record_duration(&mut self, elapsed: Duration, budget: Option<Duration>) {
        if budget.is_some_and(|b| elapsed > b) {
            self.deadline_misses += 1;
        }
        if elapsed > self.worst_case {
            self.worst_case = elapsed;
        }
    }
}
