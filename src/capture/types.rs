// Frame types shared by sources, metrics and the estimation loop

use std::path::Path;

use anyhow::{bail, Result};
use image::RgbaImage;

/// Byte layout of a frame buffer.
///
/// Alpha, when present, is carried but never read by the metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    #[default]
    Rgba8,
    Bgra8,
    Rgb8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8 | PixelFormat::Bgra8 => 4,
            PixelFormat::Rgb8 => 3,
        }
    }

    /// Offsets of the red, green and blue channels within one pixel.
    pub fn rgb_offsets(self) -> [usize; 3] {
        match self {
            PixelFormat::Rgba8 | PixelFormat::Rgb8 => [0, 1, 2],
            PixelFormat::Bgra8 => [2, 1, 0],
        }
    }
}

/// Single captured frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Frame width (pixels)
    pub width: u32,
    /// Frame height (pixels)
    pub height: u32,
    /// Pixel format of `data`
    pub format: PixelFormat,
    /// Seconds since the producing source was opened
    pub timestamp: f64,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a pixel buffer, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let frame = Self {
            width,
            height,
            format,
            timestamp: 0.0,
            data,
        };
        frame.check_layout()?;
        Ok(frame)
    }

    /// Fail with "malformed frame" when the buffer length disagrees with
    /// `width`, `height` and `format`.
    ///
    /// The size fields are public, so a frame that passed `new` can still
    /// be altered afterwards.
    pub fn check_layout(&self) -> Result<()> {
        let expected = self.pixel_count() * self.format.bytes_per_pixel();
        if self.data.len() != expected {
            bail!(
                "malformed frame: {}x{} {:?} needs {} bytes, got {}",
                self.width,
                self.height,
                self.format,
                expected,
                self.data.len()
            );
        }
        Ok(())
    }

    /// Uniform frame where every pixel is `rgb` (alpha fully opaque).
    pub fn filled(width: u32, height: u32, format: PixelFormat, rgb: [u8; 3]) -> Self {
        let bpp = format.bytes_per_pixel();
        let mut pixel = vec![255u8; bpp];
        for (channel, offset) in format.rgb_offsets().into_iter().enumerate() {
            pixel[offset] = rgb[channel];
        }
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            format,
            timestamp: 0.0,
            data: pixel.repeat(count),
        }
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn from_rgba_image(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            format: PixelFormat::Rgba8,
            timestamp: 0.0,
            data: image.as_raw().clone(),
        }
    }

    /// Convert to an RGBA8 image buffer, reordering channels when needed.
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        let rgba = crate::image::basic::to_rgba(&self.data, self.format);
        match RgbaImage::from_raw(self.width, self.height, rgba) {
            Some(image) => Ok(image),
            None => bail!("frame buffer does not fit {}x{}", self.width, self.height),
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the frame has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// `(r, g, b)` triples in storage order.
    pub fn samples(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        let [r, g, b] = self.format.rgb_offsets();
        self.data
            .chunks_exact(self.format.bytes_per_pixel())
            .map(move |px| [px[r], px[g], px[b]])
    }

    /// Save frame to file.
    ///
    /// Format is determined by file extension: `.png` `.bmp` `.jpg` `.tiff`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::image::save(
            path.as_ref(),
            &self.data,
            self.width,
            self.height,
            self.format,
        )
    }
}

impl std::ops::Deref for Frame {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
