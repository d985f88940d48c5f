use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

use super::*;
use crate::capture::Frame;
use crate::color::{self, Classification, LightingCondition, LightnessReading, Region};
use crate::config::EmptyFramePolicy;
use crate::image::overlay;

/// Status text for one classified frame.
///
/// `Lighting: <condition>` and `Brightness: <avg>` lines, plus a
/// `Lightness:` line when a lightness reading is given.
pub fn status_message(
    classification: &Classification,
    brightness: f64,
    lightness: Option<&LightnessReading>,
) -> String {
    let mut message = format!(
        "Lighting: {}\nBrightness: {:.2}",
        classification.condition, brightness
    );
    if let Some(reading) = lightness {
        message.push_str(&format!(
            "\nLightness: {} ({:.2})",
            reading.label(),
            reading.stats().mean
        ));
    }
    message
}

/// Compute metrics and classification for one frame.
///
/// Returns `None` for an empty frame under `EmptyFramePolicy::Skip`.
pub fn analyze_frame(frame: &Frame, config: &EstimatorConfig) -> Option<FrameReport> {
    analyze_frame_with_focus(frame, config, None)
}

/// Like [`analyze_frame`], with the lightness reading taken over `focus`
/// when it overlaps the frame.
///
/// The focus region never changes the classification.
pub fn analyze_frame_with_focus(
    frame: &Frame,
    config: &EstimatorConfig,
    focus: Option<&Region>,
) -> Option<FrameReport> {
    let (metrics, classification) = match color::compute_metrics(frame) {
        Some(metrics) => (Some(metrics), color::classify(&metrics)),
        None => match config.empty_frame_policy {
            EmptyFramePolicy::Skip => return None,
            EmptyFramePolicy::AssumeOptimal => {
                (None, Classification::from(LightingCondition::OptimalLighting))
            }
        },
    };

    let lightness = if config.lightness_analysis {
        LightnessReading::measure(frame, focus)
    } else {
        None
    };

    let brightness = metrics.map_or(0.0, |m| m.average_brightness);
    Some(FrameReport {
        metrics,
        classification,
        message: status_message(&classification, brightness, lightness.as_ref()),
        lightness,
        timestamp: frame.timestamp,
    })
}

fn write_snapshot(path: &Path, frame: &Frame, report: &FrameReport) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create snapshot dir {}", dir.display()))?;
    }
    let mut image = frame.to_rgba_image()?;
    overlay::draw_brightness_bar(&mut image, report.brightness(), report.classification.color);
    Frame::from_rgba_image(&image).save(path)
}

impl<S: FrameSource, K: StatusSink> LightingEstimator<S, K> {
    /// Present a report and save a snapshot when one is due.
    pub(super) fn present(&mut self, frame: &Frame, report: &FrameReport) {
        self.sink
            .update_status(&report.message, report.classification.color);
        self.stats.presented += 1;

        let Some(dir) = self.config.snapshot_dir.as_ref() else {
            return;
        };
        // first presented frame, then every Nth
        if (self.stats.presented - 1) % self.config.snapshot_every != 0 {
            return;
        }
        let path = dir.join(format!("frame_{:06}.png", self.stats.presented));
        // snapshot failures never stop the loop
        if let Err(e) = write_snapshot(&path, frame, report) {
            warn!("snapshot {} failed: {e:#}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::PixelFormat;
    use crate::color::LightnessStats;

    #[test]
    fn message_has_label_and_two_decimals() {
        let c = Classification::from(LightingCondition::SoftDiffusedLight);
        assert_eq!(
            status_message(&c, 180.0, None),
            "Lighting: Soft, Diffused Light\nBrightness: 180.00"
        );
    }

    #[test]
    fn message_appends_lightness() {
        let c = Classification::from(LightingCondition::OptimalLighting);
        let stats = LightnessStats {
            mean: 120.456,
            std_dev: 3.0,
        };
        assert_eq!(
            status_message(&c, 120.0, Some(&LightnessReading::Frame(stats))),
            "Lighting: Optimal Lighting\nBrightness: 120.00\nLightness: Moderate (120.46)"
        );

        let region = LightnessReading::Region(Region::new(0, 0, 10, 10), stats);
        assert_eq!(
            status_message(&c, 120.0, Some(&region)),
            "Lighting: Optimal Lighting\nBrightness: 120.00\nLightness: Well Lit (120.46)"
        );
    }

    #[test]
    fn empty_frame_follows_policy() {
        let empty = Frame::new(0, 0, PixelFormat::Rgba8, Vec::new()).unwrap();
        let skip = EstimatorConfig::default();
        assert!(analyze_frame(&empty, &skip).is_none());

        let optimal =
            EstimatorConfig::default().with_empty_frame_policy(EmptyFramePolicy::AssumeOptimal);
        let report = analyze_frame(&empty, &optimal).unwrap();
        assert_eq!(
            report.classification.condition,
            LightingCondition::OptimalLighting
        );
        assert_eq!(report.metrics, None);
        assert_eq!(report.message, "Lighting: Optimal Lighting\nBrightness: 0.00");
    }

    #[test]
    fn focus_changes_lightness_not_classification() {
        // dark left half, white right half
        let (w, h) = (8u32, 2u32);
        let data: Vec<u8> = (0..w * h)
            .flat_map(|i| if i % w < 4 { [0, 0, 0, 255] } else { [255, 255, 255, 255] })
            .collect();
        let frame = Frame::new(w, h, PixelFormat::Rgba8, data).unwrap();
        let config = EstimatorConfig::default().with_lightness_analysis(true);

        let whole = analyze_frame(&frame, &config).unwrap();
        let focused =
            analyze_frame_with_focus(&frame, &config, Some(&Region::new(0, 0, 4, 2))).unwrap();
        assert_eq!(whole.classification, focused.classification);
        assert!(matches!(whole.lightness, Some(LightnessReading::Frame(_))));
        assert!(focused.message.ends_with("Lightness: Poorly Lit Face (0.00)"));
    }

    #[test]
    fn lightness_only_when_enabled() {
        let frame = Frame::filled(4, 4, PixelFormat::Rgba8, [90, 90, 90]);
        let off = analyze_frame(&frame, &EstimatorConfig::default()).unwrap();
        assert!(off.lightness.is_none());

        let config = EstimatorConfig::default().with_lightness_analysis(true);
        let on = analyze_frame(&frame, &config).unwrap();
        assert!(on.lightness.is_some());
        assert!(on.message.contains("\nLightness: "));
    }
}
