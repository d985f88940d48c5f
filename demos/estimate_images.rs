// Run the estimation loop over a still image or a directory of images
//
// Each frame's status is printed as `[#RRGGBB] Lighting: ... | Brightness: ...`.
// Annotated snapshots (brightness bar in the status colour) go to
// tests/results/snapshots/.
//
// Usage:
//   cargo run --example estimate_images -- <image-or-directory> [skip|optimal] [x,y,w,h]
//   RUST_LOG=debug cargo run --example estimate_images -- photos/
//
// The optional x,y,w,h region stands in for a face detector: the lightness
// line then describes that region instead of the whole frame.

use std::path::PathBuf;
use std::process;

use lightsense::capture::{FrameSource, ImageSequenceSource, StillImageSource};
use lightsense::color::{FixedRegions, Region};
use lightsense::status::ConsoleSink;
use lightsense::{EmptyFramePolicy, EstimatorConfig, LightingEstimator};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Ticks per second; a still image is re-estimated at this rate
const TARGET_FPS: u32 = 10;

/// Ticks to run for a single still image
const STILL_IMAGE_TICKS: u64 = 20;

/// Save an annotated snapshot every N presented frames
const SNAPSHOT_EVERY: u64 = 5;

const SNAPSHOT_DIR: &str = "tests/results/snapshots";

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(target) = args.next().map(PathBuf::from) else {
        eprintln!("usage: estimate_images <image-or-directory> [skip|optimal] [x,y,w,h]");
        process::exit(2);
    };
    let policy = match args.next() {
        None => EmptyFramePolicy::default(),
        Some(mode) => match EmptyFramePolicy::from_mode(&mode) {
            Some(policy) => policy,
            None => {
                eprintln!("unknown empty-frame policy '{mode}', expected skip or optimal");
                process::exit(2);
            }
        },
    };
    let focus = match args.next().map(|s| s.parse::<Region>()).transpose() {
        Ok(focus) => focus,
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(2);
        }
    };

    let mut config = EstimatorConfig::default()
        .with_target_fps(TARGET_FPS)
        .with_empty_frame_policy(policy)
        .with_lightness_analysis(true)
        .with_snapshots(SNAPSHOT_DIR, SNAPSHOT_EVERY);
    if target.is_file() {
        config = config.with_max_frames(STILL_IMAGE_TICKS);
    }

    let estimator = LightingEstimator::start(
        config,
        |c| -> anyhow::Result<Box<dyn FrameSource>> {
            if target.is_dir() {
                Ok(Box::new(ImageSequenceSource::open(&target, c.width, c.height)?))
            } else {
                Ok(Box::new(StillImageSource::open(&target, c.width, c.height)?))
            }
        },
        ConsoleSink::stdout(),
    );
    let result = estimator.and_then(|estimator| {
        let mut estimator = match focus {
            Some(region) => estimator.with_region_detector(FixedRegions(vec![region])),
            None => estimator,
        };
        estimator.run()
    });

    match result {
        Ok(stats) => println!(
            "done: {} presented, {} skipped, worst tick {:.2} ms",
            stats.presented,
            stats.skipped,
            stats.worst_case.as_secs_f64() * 1000.0
        ),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}
