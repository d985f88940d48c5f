// Synthetic uniform-colour source, for tests, benchmarks and demos

use std::time::Instant;

use anyhow::Result;

use super::types::{Frame, PixelFormat};
use super::FrameSource;

/// Produces frames where every pixel has the same colour.
pub struct SolidColorSource {
    template: Frame,
    remaining: Option<u64>,
    opened: Instant,
}

impl SolidColorSource {
    pub fn new(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self::with_format(width, height, PixelFormat::Rgba8, rgb)
    }

    pub fn with_format(width: u32, height: u32, format: PixelFormat, rgb: [u8; 3]) -> Self {
        Self {
            template: Frame::filled(width, height, format, rgb),
            remaining: None,
            opened: Instant::now(),
        }
    }

    /// End the stream after `frames` frames.
    pub fn limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl FrameSource for SolidColorSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Ok(None);
            }
            *remaining -= 1;
        }
        let timestamp = self.opened.elapsed().as_secs_f64();
        Ok(Some(self.template.clone().with_timestamp(timestamp)))
    }

    fn describe(&self) -> String {
        let [r, g, b] = self
            .template
            .samples()
            .next()
            .unwrap_or([0, 0, 0]);
        format!(
            "solid({}, {}, {}) {}x{}",
            r, g, b, self.template.width, self.template.height
        )
    }
}
