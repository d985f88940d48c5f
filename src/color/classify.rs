// Lighting classification: ordered rule table, first match wins.

use std::fmt;

use super::metrics::LightingMetrics;
use super::DisplayColor;

/// Average brightness below which the scene is dark.
pub const DARK_ENVIRONMENT_MAX: f64 = 50.0;
/// Average brightness below which ambient light is low.
pub const LOW_AMBIENT_MAX: f64 = 100.0;
/// Dark-pixel ratio above which lighting is uneven.
pub const UNEVEN_DARK_RATIO: f64 = 0.3;
/// Bright-pixel ratio above which light is direct.
pub const DIRECT_BRIGHT_RATIO: f64 = 0.4;
/// Diffused light needs a brighter average than this...
pub const DIFFUSED_MIN_BRIGHTNESS: f64 = 150.0;
/// ...and fewer bright pixels than this.
pub const DIFFUSED_MAX_BRIGHT_RATIO: f64 = 0.2;

/// Named lighting conditions, in rule priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightingCondition {
    DarkEnvironment,
    LowAmbientLight,
    UnevenLighting,
    BrightDirectLight,
    SoftDiffusedLight,
    OptimalLighting,
}

impl LightingCondition {
    pub const ALL: [LightingCondition; 6] = [
        LightingCondition::DarkEnvironment,
        LightingCondition::LowAmbientLight,
        LightingCondition::UnevenLighting,
        LightingCondition::BrightDirectLight,
        LightingCondition::SoftDiffusedLight,
        LightingCondition::OptimalLighting,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LightingCondition::DarkEnvironment => "Dark Environment",
            LightingCondition::LowAmbientLight => "Low Ambient Light",
            LightingCondition::UnevenLighting => "Uneven Lighting",
            LightingCondition::BrightDirectLight => "Bright Direct Light",
            LightingCondition::SoftDiffusedLight => "Soft, Diffused Light",
            LightingCondition::OptimalLighting => "Optimal Lighting",
        }
    }

    pub fn color(self) -> DisplayColor {
        match self {
            // dark red
            LightingCondition::DarkEnvironment => DisplayColor::new(0x8B, 0x00, 0x00),
            // orange red
            LightingCondition::LowAmbientLight => DisplayColor::new(0xFF, 0x45, 0x00),
            // orange
            LightingCondition::UnevenLighting => DisplayColor::new(0xFF, 0xA5, 0x00),
            // bright green
            LightingCondition::BrightDirectLight => DisplayColor::new(0x00, 0xFF, 0x00),
            // dark turquoise
            LightingCondition::SoftDiffusedLight => DisplayColor::new(0x00, 0xCE, 0xD1),
            // lime green
            LightingCondition::OptimalLighting => DisplayColor::new(0x32, 0xCD, 0x32),
        }
    }
}

impl fmt::Display for LightingCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Condition plus the colour it is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub condition: LightingCondition,
    pub color: DisplayColor,
}

impl From<LightingCondition> for Classification {
    fn from(condition: LightingCondition) -> Self {
        Self {
            condition,
            color: condition.color(),
        }
    }
}

type Rule = (LightingCondition, fn(&LightingMetrics) -> bool);

const RULES: [Rule; 5] = [
    (LightingCondition::DarkEnvironment, |m| {
        m.average_brightness < DARK_ENVIRONMENT_MAX
    }),
    (LightingCondition::LowAmbientLight, |m| {
        m.average_brightness < LOW_AMBIENT_MAX
    }),
    (LightingCondition::UnevenLighting, |m| {
        m.dark_ratio > UNEVEN_DARK_RATIO
    }),
    (LightingCondition::BrightDirectLight, |m| {
        m.brightness_ratio > DIRECT_BRIGHT_RATIO
    }),
    (LightingCondition::SoftDiffusedLight, |m| {
        m.average_brightness > DIFFUSED_MIN_BRIGHTNESS
            && m.brightness_ratio < DIFFUSED_MAX_BRIGHT_RATIO
    }),
];

/// Classify metrics by the first matching rule; Optimal Lighting otherwise.
pub fn classify(metrics: &LightingMetrics) -> Classification {
    RULES
        .iter()
        .find(|(_, matches)| matches(metrics))
        .map(|&(condition, _)| condition)
        .unwrap_or(LightingCondition::OptimalLighting)
        .into()
}

/// Every rule the metrics satisfy, in priority order.
///
/// The fallback condition is never listed.
pub fn matching_conditions(metrics: &LightingMetrics) -> Vec<LightingCondition> {
    RULES
        .iter()
        .filter(|(_, matches)| matches(metrics))
        .map(|&(condition, _)| condition)
        .collect()
}
