// Estimation loop: source acquisition → per-tick capture → metrics → classification → status
//
// Each tick is one synchronous pass with no state carried into the next one
// besides counters. The loop is paced to the configured frame rate and stops
// at the first failure; restarting means building a new estimator.
//
// - tick(): exactly one pass, for callers that own the scheduling
// - run(): repeat tick() until the source ends, max_frames is hit, or a tick fails

mod build;
mod modes;
mod process;
mod types;

pub use process::{analyze_frame, analyze_frame_with_focus, status_message};
pub use types::{FrameReport, LoopStats, TickOutcome};

use anyhow::Result;

use crate::capture::FrameSource;
use crate::color::RegionDetector;
use crate::config::EstimatorConfig;
use crate::status::StatusSink;

/// Lighting estimation loop
///
/// Holds the configuration, the opened frame source and the presentation
/// sink together, so the analysis itself stays free of I/O.
///
/// # Examples
/// ```no_run
/// # use lightsense::capture::StillImageSource;
/// # use lightsense::config::EstimatorConfig;
/// # use lightsense::pipeline::LightingEstimator;
/// # use lightsense::status::LogSink;
/// let config = EstimatorConfig::default().with_max_frames(10);
/// let mut estimator = LightingEstimator::start(
///     config,
///     |c| StillImageSource::open("room.jpg", c.width, c.height),
///     LogSink,
/// )?;
/// let stats = estimator.run()?;
/// println!("{} frames presented", stats.presented);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct LightingEstimator<S, K> {
    config: EstimatorConfig,
    source: S,
    sink: K,
    /// Subject-region finder for the lightness reading
    detector: Option<Box<dyn RegionDetector>>,
    stats: LoopStats,
}

impl<S: FrameSource, K: StatusSink> LightingEstimator<S, K> {
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Focus the lightness reading on the largest region `detector` reports.
    ///
    /// Only consulted when lightness analysis is enabled. A detector error
    /// fails the tick like a source error.
    pub fn with_region_detector(mut self, detector: impl RegionDetector + 'static) -> Self {
        self.detector = Some(Box::new(detector));
        self
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}

/// Open a source and run the loop to completion.
pub fn run_estimation<S, K, F>(config: EstimatorConfig, acquire: F, sink: K) -> Result<LoopStats>
where
    S: FrameSource,
    K: StatusSink,
    F: FnOnce(&EstimatorConfig) -> Result<S>,
{
    LightingEstimator::start(config, acquire, sink)?.run()
}
