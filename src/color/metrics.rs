// Brightness metrics: one pass over every pixel of a frame
//
// Per-pixel brightness is the unweighted mean of R, G and B. Thresholds are
// compared on the channel sum (brightness > 200  <=>  r+g+b > 600) so the
// reduction stays in integers and is independent of visit order.

use crate::capture::Frame;

use super::parallel;

/// Brightness above which a pixel counts as bright.
pub const BRIGHT_PIXEL_THRESHOLD: f64 = 200.0;
/// Brightness below which a pixel counts as dark.
pub const DARK_PIXEL_THRESHOLD: f64 = 50.0;

// Both thresholds are whole numbers, so the channel-sum form is exact.
const BRIGHT_CHANNEL_SUM: u32 = BRIGHT_PIXEL_THRESHOLD as u32 * 3;
const DARK_CHANNEL_SUM: u32 = DARK_PIXEL_THRESHOLD as u32 * 3;

/// Scalar statistics of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingMetrics {
    /// Mean pixel brightness, 0-255
    pub average_brightness: f64,
    /// Fraction of pixels brighter than 200
    pub brightness_ratio: f64,
    /// Fraction of pixels darker than 50
    pub dark_ratio: f64,
    /// Number of pixels the statistics were computed from (never 0)
    pub pixel_count: u64,
}

/// Running totals of the metrics reduction.
///
/// Accumulators of disjoint pixel sets can be merged in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsAccumulator {
    channel_sum: u64,
    bright: u64,
    dark: u64,
    count: u64,
}

impl MetricsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pixel(&mut self, r: u8, g: u8, b: u8) {
        let sum = r as u32 + g as u32 + b as u32;
        self.channel_sum += sum as u64;
        if sum > BRIGHT_CHANNEL_SUM {
            self.bright += 1;
        }
        if sum < DARK_CHANNEL_SUM {
            self.dark += 1;
        }
        self.count += 1;
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.channel_sum += other.channel_sum;
        self.bright += other.bright;
        self.dark += other.dark;
        self.count += other.count;
        self
    }

    pub fn pixel_count(&self) -> u64 {
        self.count
    }

    /// Final metrics, or `None` when no pixel was added.
    pub fn finish(&self) -> Option<LightingMetrics> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some(LightingMetrics {
            average_brightness: self.channel_sum as f64 / (3.0 * n),
            brightness_ratio: self.bright as f64 / n,
            dark_ratio: self.dark as f64 / n,
            pixel_count: self.count,
        })
    }
}

/// Reduce a frame to its lighting metrics.
///
/// Every pixel is visited exactly once; large frames are split across the
/// rayon pool. Returns `None` for a frame without pixels.
pub fn compute_metrics(frame: &Frame) -> Option<LightingMetrics> {
    if frame.is_empty() {
        return None;
    }
    let [r, g, b] = frame.format.rgb_offsets();
    let acc = parallel::fold_reduce(
        frame.as_slice(),
        frame.format.bytes_per_pixel(),
        MetricsAccumulator::new,
        |mut acc, px| {
            acc.add_pixel(px[r], px[g], px[b]);
            acc
        },
        MetricsAccumulator::merge,
    );
    acc.finish()
}
