// Estimation loop configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};

/// Frame width requested from sources by default.
pub const DEFAULT_WIDTH: u32 = 640;
/// Frame height requested from sources by default.
pub const DEFAULT_HEIGHT: u32 = 480;
/// One tick per display refresh.
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// What the loop does with a frame that has no pixels.
///
/// - `Skip`: present nothing for that tick and count it as skipped.
/// - `AssumeOptimal`: present "Optimal Lighting" with brightness 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyFramePolicy {
    #[default]
    Skip,
    AssumeOptimal,
}

impl EmptyFramePolicy {
    /// Parse from a mode string ("skip", "optimal").
    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode {
            "skip" => Some(Self::Skip),
            "optimal" => Some(Self::AssumeOptimal),
            _ => None,
        }
    }
}

/// Settings for one run of the estimation loop.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Frame width requested from the source (pixels)
    pub width: u32,
    /// Frame height requested from the source (pixels)
    pub height: u32,
    /// Tick rate; 0 runs unpaced
    pub target_fps: u32,
    /// Stop after this many ticks (None = until the source ends)
    pub max_frames: Option<u64>,
    pub empty_frame_policy: EmptyFramePolicy,
    /// Add the CIELAB lightness reading to every status
    pub lightness_analysis: bool,
    /// Directory for annotated PNG snapshots (None = disabled)
    pub snapshot_dir: Option<PathBuf>,
    /// Save every Nth presented frame when snapshots are enabled
    pub snapshot_every: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            max_frames: None,
            empty_frame_policy: EmptyFramePolicy::Skip,
            lightness_analysis: false,
            snapshot_dir: None,
            snapshot_every: 30,
        }
    }
}

impl EstimatorConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn with_empty_frame_policy(mut self, policy: EmptyFramePolicy) -> Self {
        self.empty_frame_policy = policy;
        self
    }

    pub fn with_lightness_analysis(mut self, enabled: bool) -> Self {
        self.lightness_analysis = enabled;
        self
    }

    pub fn with_snapshots(mut self, dir: impl Into<PathBuf>, every: u64) -> Self {
        self.snapshot_dir = Some(dir.into());
        self.snapshot_every = every;
        self
    }

    /// Time budget of one tick, `None` when unpaced.
    pub fn frame_budget(&self) -> Option<Duration> {
        if self.target_fps == 0 {
            return None;
        }
        Some(Duration::from_nanos(1_000_000_000 / self.target_fps as u64))
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!(
                "frame size must be non-zero, got {}x{}",
                self.width,
                self.height
            );
        }
        if self.snapshot_dir.is_some() && self.snapshot_every == 0 {
            bail!("snapshot_every must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canvas_size() {
        let config = EstimatorConfig::default();
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.empty_frame_policy, EmptyFramePolicy::Skip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn frame_budget_follows_fps() {
        let config = EstimatorConfig::default().with_target_fps(50);
        assert_eq!(config.frame_budget(), Some(Duration::from_millis(20)));
        assert_eq!(config.with_target_fps(0).frame_budget(), None);
    }

    #[test]
    fn rejects_zero_size_and_zero_snapshot_interval() {
        assert!(EstimatorConfig::default().with_size(0, 480).validate().is_err());
        assert!(EstimatorConfig::default()
            .with_snapshots("snaps", 0)
            .validate()
            .is_err());
    }

    #[test]
    fn parses_policy_modes() {
        assert_eq!(EmptyFramePolicy::from_mode("skip"), Some(EmptyFramePolicy::Skip));
        assert_eq!(
            EmptyFramePolicy::from_mode("optimal"),
            Some(EmptyFramePolicy::AssumeOptimal)
        );
        assert_eq!(EmptyFramePolicy::from_mode("retry"), None);
    }
}
