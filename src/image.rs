// Image file I/O for frames.
//
// - load(): decode any format the `image` crate knows, scaled to frame size
// - save(): encode by file extension (see `basic`)
// - overlay: brightness bar drawn onto saved snapshots

pub mod basic;
pub mod overlay;

use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};

use crate::capture::{Frame, PixelFormat};

/// Decode an image file into an RGBA8 frame of `width` x `height`.
///
/// The picture is stretched to the target size, like a camera image drawn
/// onto a fixed canvas.
pub fn load(path: &Path, width: u32, height: u32) -> Result<Frame> {
    let decoded = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?
        .to_rgba8();

    let rgba = if decoded.dimensions() == (width, height) {
        decoded
    } else {
        imageops::resize(&decoded, width, height, FilterType::Triangle)
    };
    Ok(Frame::from_rgba_image(&rgba))
}

/// Save pixel data to file. Format is determined by extension.
///
/// Supported extensions:
/// - `.png` — PNG (lossless)
/// - `.bmp` — BMP (lossless)
/// - `.jpg` / `.jpeg` — JPEG (lossy, alpha dropped)
/// - `.tiff` / `.tif` — TIFF (lossless)
pub fn save(path: &Path, data: &[u8], width: u32, height: u32, format: PixelFormat) -> Result<()> {
    basic::save(path, data, width, height, format)
}
