// Per-frame colour analysis: brightness metrics, lighting classification and
// the auxiliary CIELAB lightness reading.

pub mod classify;
pub mod lightness;
pub mod metrics;
mod parallel;
pub mod region;

use std::fmt;

pub use classify::{classify, matching_conditions, Classification, LightingCondition};
pub use lightness::{LightnessLevel, LightnessReading, LightnessStats, RegionLightingLevel};
pub use metrics::{compute_metrics, LightingMetrics, MetricsAccumulator};
pub use region::{largest_region, FixedRegions, Region, RegionDetector};

/// Display colour attached to a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayColor {
    /// Neutral status colour (`#333333`).
    pub const STATUS_DEFAULT: DisplayColor = DisplayColor::new(0x33, 0x33, 0x33);
    /// Terminal failure colour (`#FF0000`).
    pub const FAILURE: DisplayColor = DisplayColor::new(0xFF, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB`, upper case.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for DisplayColor {
    fn default() -> Self {
        Self::STATUS_DEFAULT
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
