// Standard image format encoding via the `image` crate.
//
// - PNG  (lossless)
// - BMP  (lossless)
// - JPEG (lossy, RGB only)
// - TIFF (lossless)

use std::path::Path;

use anyhow::{bail, Context, Result};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageFormat};

use crate::capture::PixelFormat;

enum FileFormat {
    Png,
    Bmp,
    Jpeg,
    Tiff,
}

/// Normalise any frame layout to tightly packed RGBA8.
pub(crate) fn to_rgba(data: &[u8], format: PixelFormat) -> Vec<u8> {
    match format {
        PixelFormat::Rgba8 => data.to_vec(),
        PixelFormat::Bgra8 => {
            let mut rgba = data.to_vec();
            for pixel in rgba.chunks_exact_mut(4) {
                pixel.swap(0, 2);
            }
            rgba
        }
        PixelFormat::Rgb8 => data
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
    }
}

/// Save a frame buffer using the `image` crate.
///
/// The target format is inferred from the file extension.
pub fn save(path: &Path, data: &[u8], width: u32, height: u32, format: PixelFormat) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file_fmt = match ext.as_str() {
        "png" => FileFormat::Png,
        "bmp" => FileFormat::Bmp,
        "jpg" | "jpeg" => FileFormat::Jpeg,
        "tiff" | "tif" => FileFormat::Tiff,
        _ => bail!(
            "unsupported extension '.{}'; supported: .png .bmp .jpg .tiff",
            ext
        ),
    };

    let expected = width as usize * height as usize * format.bytes_per_pixel();
    if data.len() != expected {
        bail!(
            "frame buffer is {} bytes, expected {} for {}x{} {:?}",
            data.len(),
            expected,
            width,
            height,
            format
        );
    }

    let rgba = to_rgba(data, format);

    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);

    match file_fmt {
        FileFormat::Png => {
            let encoder =
                PngEncoder::new_with_quality(writer, CompressionType::Fast, FilterType::Sub);
            encoder.write_image(&rgba, width, height, ExtendedColorType::Rgba8)?;
        }
        FileFormat::Jpeg => {
            // JPEG doesn't support alpha; strip to RGB
            let rgb: Vec<u8> = rgba
                .chunks_exact(4)
                .flat_map(|px| &px[..3])
                .copied()
                .collect();
            image::write_buffer_with_format(
                &mut writer,
                &rgb,
                width,
                height,
                ExtendedColorType::Rgb8,
                ImageFormat::Jpeg,
            )?;
        }
        FileFormat::Bmp | FileFormat::Tiff => {
            let img_fmt = match file_fmt {
                FileFormat::Bmp => ImageFormat::Bmp,
                _ => ImageFormat::Tiff,
            };
            image::write_buffer_with_format(
                &mut writer,
                &rgba,
                width,
                height,
                ExtendedColorType::Rgba8,
                img_fmt,
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgra_is_swapped_to_rgba() {
        assert_eq!(to_rgba(&[1, 2, 3, 4], PixelFormat::Bgra8), vec![3, 2, 1, 4]);
    }

    #[test]
    fn rgb_gains_opaque_alpha() {
        assert_eq!(to_rgba(&[1, 2, 3], PixelFormat::Rgb8), vec![1, 2, 3, 255]);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = save(Path::new("frame.webm"), &[], 0, 0, PixelFormat::Rgba8).unwrap_err();
        assert!(err.to_string().contains("unsupported extension"));
    }
}
