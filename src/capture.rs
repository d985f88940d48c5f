// Frame acquisition
//
// A frame source hands the estimation loop one frame per tick. Sources are
// opened by the caller (camera, still image, synthetic) and owned by the loop
// for the rest of its life.

pub mod scripted;
pub mod still;
pub mod synthetic;
pub mod types;

use anyhow::Result;

pub use scripted::ScriptedSource;
pub use still::{ImageSequenceSource, StillImageSource};
pub use synthetic::SolidColorSource;
pub use types::{Frame, PixelFormat};

/// Supplier of camera frames.
///
/// `Ok(None)` ends the stream cleanly; `Err` fails the current tick.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// Human-readable name used in log lines.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        (**self).next_frame()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
