//! # lightsense
//!
//! Ambient lighting estimation from live camera frames.
//!
//! Every frame is reduced to three numbers (average brightness, share of
//! bright pixels, share of dark pixels) and mapped to one of six named
//! lighting conditions, which is shown as a coloured status message.
//!
//! ## Rust usage
//!
//! ```no_run
//! use lightsense::capture::SolidColorSource;
//! use lightsense::color::{classify, compute_metrics};
//! use lightsense::config::EstimatorConfig;
//! use lightsense::pipeline;
//! use lightsense::status::ConsoleSink;
//!
//! // One frame, no loop
//! let frame = lightsense::image::load(std::path::Path::new("room.jpg"), 640, 480)?;
//! if let Some(metrics) = compute_metrics(&frame) {
//!     println!("{}", classify(&metrics).condition);
//! }
//!
//! // Paced loop until the source ends
//! let config = EstimatorConfig::default();
//! let stats = pipeline::run_estimation(
//!     config,
//!     |c| Ok(SolidColorSource::new(c.width, c.height, [180, 180, 180]).limit(60)),
//!     ConsoleSink::stdout(),
//! )?;
//! println!("{} frames", stats.presented);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod capture;
pub mod color;
pub mod config;
pub mod image;
pub mod pipeline;
pub mod status;

pub use capture::{Frame, FrameSource, PixelFormat};
pub use color::{Classification, DisplayColor, LightingCondition, LightingMetrics};
pub use config::{EmptyFramePolicy, EstimatorConfig};
pub use pipeline::{run_estimation, LightingEstimator};
pub use status::StatusSink;
