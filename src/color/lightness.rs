// Perceptual lightness of a frame from the CIELAB L channel.
//
// L is rescaled from 0-100 to 0-255 so its levels line up with the
// brightness thresholds used elsewhere. A reading covers either the whole
// frame or, when a detector reports one, the largest subject region.

use std::fmt;

use palette::{FromColor, Lab, Srgb};

use super::parallel;
use super::region::Region;
use crate::capture::Frame;

const L_TO_8BIT: f64 = 255.0 / 100.0;

/// Mean and spread of per-pixel lightness on the 0-255 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightnessStats {
    pub mean: f64,
    pub std_dev: f64,
}

/// Coarse whole-frame lightness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightnessLevel {
    Dark,
    LowLight,
    Moderate,
    Bright,
}

impl LightnessLevel {
    pub fn label(self) -> &'static str {
        match self {
            LightnessLevel::Dark => "Dark",
            LightnessLevel::LowLight => "Low Light",
            LightnessLevel::Moderate => "Moderate",
            LightnessLevel::Bright => "Bright",
        }
    }
}

impl fmt::Display for LightnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lightness level of a subject region such as a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionLightingLevel {
    PoorlyLit,
    Soft,
    WellLit,
    BrightDirect,
}

impl RegionLightingLevel {
    pub fn label(self) -> &'static str {
        match self {
            RegionLightingLevel::PoorlyLit => "Poorly Lit Face",
            RegionLightingLevel::Soft => "Soft Lighting",
            RegionLightingLevel::WellLit => "Well Lit",
            RegionLightingLevel::BrightDirect => "Bright Direct Light",
        }
    }
}

impl fmt::Display for RegionLightingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lightness of one sRGB pixel, 0-255.
pub fn pixel_lightness(r: u8, g: u8, b: u8) -> f64 {
    let srgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let lab: Lab = Lab::from_color(srgb);
    (lab.l as f64 * L_TO_8BIT).clamp(0.0, 255.0)
}

impl LightnessStats {
    /// `None` for a frame without pixels.
    pub fn compute(frame: &Frame) -> Option<Self> {
        if frame.is_empty() {
            return None;
        }
        let [r, g, b] = frame.format.rgb_offsets();
        let (sum, sum_sq, count) = parallel::fold_reduce(
            frame.as_slice(),
            frame.format.bytes_per_pixel(),
            || (0.0f64, 0.0f64, 0u64),
            |(sum, sum_sq, count), px| {
                let l = pixel_lightness(px[r], px[g], px[b]);
                (sum + l, sum_sq + l * l, count + 1)
            },
            |x, y| (x.0 + y.0, x.1 + y.1, x.2 + y.2),
        );
        Some(Self::from_sums(sum, sum_sq, count))
    }

    /// Statistics over `region`, clipped to the frame.
    ///
    /// `None` when the region does not overlap the frame or the frame is
    /// malformed.
    pub fn compute_region(frame: &Frame, region: &Region) -> Option<Self> {
        frame.check_layout().ok()?;
        let region = region.clip(frame.width, frame.height)?;
        let bpp = frame.format.bytes_per_pixel();
        let stride = frame.width as usize * bpp;
        let [r, g, b] = frame.format.rgb_offsets();

        let (mut sum, mut sum_sq, mut count) = (0.0f64, 0.0f64, 0u64);
        for y in region.y..region.y + region.height {
            let start = y as usize * stride + region.x as usize * bpp;
            let end = start + region.width as usize * bpp;
            for px in frame.as_slice()[start..end].chunks_exact(bpp) {
                let l = pixel_lightness(px[r], px[g], px[b]);
                sum += l;
                sum_sq += l * l;
                count += 1;
            }
        }
        Some(Self::from_sums(sum, sum_sq, count))
    }

    fn from_sums(sum: f64, sum_sq: f64, count: u64) -> Self {
        let n = count as f64;
        let mean = sum / n;
        let variance = (sum_sq / n - mean * mean).max(0.0);
        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    pub fn level(&self) -> LightnessLevel {
        if self.mean < 50.0 {
            LightnessLevel::Dark
        } else if self.mean < 100.0 {
            LightnessLevel::LowLight
        } else if self.mean < 150.0 {
            LightnessLevel::Moderate
        } else {
            LightnessLevel::Bright
        }
    }

    /// Same cut points as `level`, with the subject-region labels.
    pub fn region_level(&self) -> RegionLightingLevel {
        if self.mean < 50.0 {
            RegionLightingLevel::PoorlyLit
        } else if self.mean < 100.0 {
            RegionLightingLevel::Soft
        } else if self.mean < 150.0 {
            RegionLightingLevel::WellLit
        } else {
            RegionLightingLevel::BrightDirect
        }
    }
}

/// Lightness of either the whole frame or the largest subject region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightnessReading {
    Frame(LightnessStats),
    Region(Region, LightnessStats),
}

impl LightnessReading {
    /// Read `focus` when it overlaps the frame, the whole frame otherwise.
    pub fn measure(frame: &Frame, focus: Option<&Region>) -> Option<Self> {
        if let Some(region) = focus.and_then(|r| r.clip(frame.width, frame.height)) {
            if let Some(stats) = LightnessStats::compute_region(frame, &region) {
                return Some(LightnessReading::Region(region, stats));
            }
        }
        LightnessStats::compute(frame).map(LightnessReading::Frame)
    }

    pub fn stats(&self) -> &LightnessStats {
        match self {
            LightnessReading::Frame(stats) | LightnessReading::Region(_, stats) => stats,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LightnessReading::Frame(stats) => stats.level().label(),
            LightnessReading::Region(_, stats) => stats.region_level().label(),
        }
    }
}
