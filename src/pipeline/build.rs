use log::{error, info};

use super::*;
use crate::color::DisplayColor;
use crate::status::ACCESS_DENIED_MESSAGE;

impl<S: FrameSource, K: StatusSink> LightingEstimator<S, K> {
    /// Wrap an already opened source.
    pub fn new(config: EstimatorConfig, source: S, sink: K) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            sink,
            detector: None,
            stats: LoopStats::default(),
        })
    }

    /// Open the frame source with `acquire` and build the estimator.
    ///
    /// When the source cannot be opened the sink shows "Webcam Access Denied"
    /// and the error is returned; the loop never starts.
    pub fn start<F>(config: EstimatorConfig, acquire: F, mut sink: K) -> Result<Self>
    where
        F: FnOnce(&EstimatorConfig) -> Result<S>,
    {
        config.validate()?;

        let source = match acquire(&config) {
            Ok(source) => source,
            Err(e) => {
                error!("frame source unavailable: {e:#}");
                sink.update_status(ACCESS_DENIED_MESSAGE, DisplayColor::FAILURE);
                return Err(e.context("failed to acquire frame source"));
            }
        };

        info!(
            "frame source ready: {} ({}x{} requested)",
            source.describe(),
            config.width,
            config.height
        );
        Self::new(config, source, sink)
    }
}
