use std::thread;
use std::time::Instant;

use log::{debug, error, info, warn};

use super::*;
use crate::color::{largest_region, DisplayColor};
use crate::status::ESTIMATION_FAILED_MESSAGE;

impl<S: FrameSource, K: StatusSink> LightingEstimator<S, K> {
    /// One capture → compute → classify → present pass.
    ///
    /// Errors are returned without touching the sink; `run()` decides how
    /// they are presented.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let Some(frame) = self.source.next_frame()? else {
            return Ok(TickOutcome::EndOfStream);
        };
        self.stats.ticks += 1;
        frame.check_layout()?;

        let focus = match self.detector.as_mut() {
            Some(detector) if self.config.lightness_analysis => {
                largest_region(&detector.detect(&frame)?)
            }
            _ => None,
        };

        let Some(report) = analyze_frame_with_focus(&frame, &self.config, focus.as_ref()) else {
            self.stats.skipped += 1;
            warn!(
                "skipping empty {}x{} frame at {:.3}s",
                frame.width, frame.height, frame.timestamp
            );
            return Ok(TickOutcome::Skipped);
        };

        debug!(
            "frame {} at {:.3}s: {} (brightness {:.2})",
            self.stats.ticks,
            frame.timestamp,
            report.classification.condition,
            report.brightness()
        );
        self.present(&frame, &report);
        Ok(TickOutcome::Presented(report))
    }

    /// Tick until the source ends or `max_frames` ticks have run.
    ///
    /// Ticks are paced to the configured frame rate. The first failing tick
    /// shows "Estimation Failed" and ends the loop with its error.
    pub fn run(&mut self) -> Result<LoopStats> {
        let budget = self.config.frame_budget();
        info!(
            "lighting estimation started: {} at {} fps",
            self.source.describe(),
            self.config.target_fps
        );

        loop {
            if let Some(max) = self.config.max_frames {
                if self.stats.ticks >= max {
                    break;
                }
            }

            let cycle_start = Instant::now();
            let outcome = match self.tick() {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("lighting estimation failed: {e:#}");
                    self.sink
                        .update_status(ESTIMATION_FAILED_MESSAGE, DisplayColor::FAILURE);
                    return Err(e.context("lighting estimation failed"));
                }
            };
            if outcome == TickOutcome::EndOfStream {
                break;
            }

            let elapsed = cycle_start.elapsed();
            self.stats.record_duration(elapsed, budget);

            if let Some(budget) = budget {
                if elapsed < budget {
                    thread::sleep(budget - elapsed);
                }
            }
        }

        info!(
            "lighting estimation stopped: {} ticks, {} presented, {} skipped, {} over budget",
            self.stats.ticks, self.stats.presented, self.stats.skipped, self.stats.deadline_misses
        );
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{Frame, PixelFormat, ScriptedSource, SolidColorSource};
    use crate::color::{FixedRegions, LightingCondition, LightnessReading, Region};
    use crate::status::MemorySink;

    fn unpaced() -> EstimatorConfig {
        EstimatorConfig::default().with_target_fps(0)
    }

    #[test]
    fn tick_presents_one_frame() {
        let source = SolidColorSource::new(8, 8, [0, 0, 0]);
        let mut estimator = LightingEstimator::new(unpaced(), source, MemorySink::new()).unwrap();

        let TickOutcome::Presented(report) = estimator.tick().unwrap() else {
            panic!("expected a presented frame");
        };
        assert_eq!(report.classification.condition, LightingCondition::DarkEnvironment);
        assert_eq!(estimator.sink().len(), 1);
        assert_eq!(estimator.stats().ticks, 1);
    }

    #[test]
    fn run_stops_at_max_frames() {
        let source = SolidColorSource::new(4, 4, [120, 120, 120]);
        let config = unpaced().with_max_frames(5);
        let mut estimator = LightingEstimator::new(config, source, MemorySink::new()).unwrap();

        let stats = estimator.run().unwrap();
        assert_eq!(stats.ticks, 5);
        assert_eq!(stats.presented, 5);
        assert_eq!(estimator.sink().len(), 5);
    }

    #[test]
    fn empty_frames_are_skipped_silently() {
        let empty = Frame::new(0, 0, PixelFormat::Rgba8, Vec::new()).unwrap();
        let source = ScriptedSource::from_frames([
            empty,
            Frame::filled(2, 2, PixelFormat::Rgba8, [255, 255, 255]),
        ]);
        let mut estimator = LightingEstimator::new(unpaced(), source, MemorySink::new()).unwrap();

        let stats = estimator.run().unwrap();
        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.presented, 1);
        assert_eq!(estimator.sink().len(), 1);
    }

    #[test]
    fn failing_tick_reports_and_stops() {
        let mut malformed = Frame::filled(2, 2, PixelFormat::Rgba8, [120, 120, 120]);
        malformed.width = 640;
        let source = ScriptedSource::new()
            .push_frame(Frame::filled(2, 2, PixelFormat::Rgba8, [120, 120, 120]))
            .push_frame(malformed)
            .push_frame(Frame::filled(2, 2, PixelFormat::Rgba8, [120, 120, 120]));
        let mut estimator = LightingEstimator::new(unpaced(), source, MemorySink::new()).unwrap();

        let err = estimator.run().unwrap_err();
        assert!(format!("{err:#}").contains("malformed frame"));

        let last = estimator.sink().last().unwrap();
        assert_eq!(last.message, ESTIMATION_FAILED_MESSAGE);
        assert_eq!(last.color, DisplayColor::FAILURE);
        // no restart: the frame after the failure is never read
        let (source, _) = estimator.into_parts();
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn detector_focuses_lightness_reading() {
        // black top half, white bottom half
        let (w, h) = (4u32, 4u32);
        let data: Vec<u8> = (0..w * h)
            .flat_map(|i| if i / w < 2 { [0, 0, 0, 255] } else { [255, 255, 255, 255] })
            .collect();
        let frame = Frame::new(w, h, PixelFormat::Rgba8, data).unwrap();
        let source = ScriptedSource::from_frames([frame.clone(), frame]);
        let config = unpaced().with_lightness_analysis(true);
        let detector = FixedRegions(vec![Region::new(0, 0, 1, 1), Region::new(0, 2, 4, 2)]);
        let mut estimator = LightingEstimator::new(config, source, MemorySink::new())
            .unwrap()
            .with_region_detector(detector);

        let TickOutcome::Presented(report) = estimator.tick().unwrap() else {
            panic!("expected a presented frame");
        };
        assert!(matches!(
            report.lightness,
            Some(LightnessReading::Region(r, _)) if r == Region::new(0, 2, 4, 2)
        ));
        assert!(report.message.contains("Lightness: Bright Direct Light"));
    }

    #[test]
    fn detector_error_fails_tick() {
        let source = SolidColorSource::new(2, 2, [0, 0, 0]);
        let config = unpaced().with_lightness_analysis(true);
        let mut estimator = LightingEstimator::new(config, source, MemorySink::new())
            .unwrap()
            .with_region_detector(|_: &Frame| -> Result<Vec<Region>> {
                anyhow::bail!("detector model missing")
            });

        let err = estimator.run().unwrap_err();
        assert!(format!("{err:#}").contains("detector model missing"));
        assert_eq!(estimator.sink().last().unwrap().message, ESTIMATION_FAILED_MESSAGE);
    }

    #[test]
    fn paced_run_records_budget() {
        let source = SolidColorSource::new(2, 2, [120, 120, 120]).limit(3);
        let config = EstimatorConfig::default().with_target_fps(200);
        let mut estimator = LightingEstimator::new(config, source, MemorySink::new()).unwrap();

        let started = Instant::now();
        let stats = estimator.run().unwrap();
        assert_eq!(stats.presented, 3);
        // three ticks at 5ms each
        assert!(started.elapsed() >= std::time::Duration::from_millis(15));
    }
}
