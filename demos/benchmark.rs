// Performance benchmark: measure per-frame analysis latency
//
// Test scenarios:
// 1. Metrics only: compute_metrics() on a 640x480 frame
// 2. Full analysis: metrics + classification (+ optional lightness) per frame
// 3. Loop: unpaced estimation loop over a synthetic source
//
// Results saved to tests/results/
//
// Usage: cargo run --release --example benchmark

use std::fmt::Write as FmtWrite;
use std::fs;
use std::time::Instant;

use lightsense::capture::SolidColorSource;
use lightsense::color::{classify, compute_metrics};
use lightsense::pipeline::{analyze_frame, LightingEstimator};
use lightsense::status::MemorySink;
use lightsense::{EstimatorConfig, Frame, PixelFormat};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Frame size, matching the default canvas
const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

/// Warm-up rounds (thread pool spin-up, caches)
const WARMUP_ROUNDS: usize = 10;

/// Measured rounds per scenario
const ROUNDS: usize = 200;

/// Frames pushed through the loop scenario
const LOOP_FRAMES: u64 = 200;

// ---------------------------------------------------------------------------
// Statistics utilities
// ---------------------------------------------------------------------------

struct Stats {
    avg_ms: f64,
    min_ms: f64,
    max_ms: f64,
    p50_ms: f64,
    p95_ms: f64,
    p99_ms: f64,
}

fn compute_stats(durations: &mut [f64]) -> Stats {
    durations.sort_by(|a, b| a.total_cmp(b));
    let n = durations.len();
    let total: f64 = durations.iter().sum();
    Stats {
        avg_ms: total / n as f64,
        min_ms: durations[0],
        max_ms: durations[n - 1],
        p50_ms: durations[n / 2],
        p95_ms: durations[n * 95 / 100],
        p99_ms: durations[n * 99 / 100],
    }
}

fn format_stats(label: &str, count: usize, stats: &Stats) -> String {
    let mut s = String::new();
    writeln!(s, "[{}] {}x{}, {} rounds:", label, WIDTH, HEIGHT, count).unwrap();
    writeln!(s, "  avg: {:.3} ms", stats.avg_ms).unwrap();
    writeln!(
        s,
        "  min: {:.3} ms | max: {:.3} ms",
        stats.min_ms, stats.max_ms
    )
    .unwrap();
    writeln!(
        s,
        "  p50: {:.3} ms | p95: {:.3} ms | p99: {:.3} ms",
        stats.p50_ms, stats.p95_ms, stats.p99_ms
    )
    .unwrap();
    s
}

/// Noisy frame so the bright/dark branches are both taken.
fn noisy_frame() -> Frame {
    let data: Vec<u8> = (0..WIDTH * HEIGHT)
        .flat_map(|i| {
            let v = i.wrapping_mul(2654435761);
            [(v >> 8) as u8, (v >> 16) as u8, (v >> 24) as u8, 255]
        })
        .collect();
    Frame::new(WIDTH, HEIGHT, PixelFormat::Rgba8, data).expect("buffer matches size")
}

fn bench<F: FnMut()>(label: &str, mut f: F, report: &mut String) {
    for _ in 0..WARMUP_ROUNDS {
        f();
    }
    let mut durations = Vec::with_capacity(ROUNDS);
    for _ in 0..ROUNDS {
        let t = Instant::now();
        f();
        durations.push(t.elapsed().as_secs_f64() * 1000.0);
    }
    let stats = compute_stats(&mut durations);
    let s = format_stats(label, ROUNDS, &stats);
    print!("{s}");
    write!(report, "{s}").unwrap();
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();

    let mut report = String::new();
    writeln!(report, "=== lightsense benchmark ===").unwrap();
    writeln!(report).unwrap();

    let frame = noisy_frame();

    bench(
        "metrics",
        || {
            std::hint::black_box(compute_metrics(&frame));
        },
        &mut report,
    );

    bench(
        "metrics + classify",
        || {
            let metrics = compute_metrics(&frame).expect("frame is not empty");
            std::hint::black_box(classify(&metrics));
        },
        &mut report,
    );

    let with_lightness = EstimatorConfig::default().with_lightness_analysis(true);
    bench(
        "full analysis + lightness",
        || {
            std::hint::black_box(analyze_frame(&frame, &with_lightness));
        },
        &mut report,
    );

    // Loop: unpaced, so elapsed time is pure processing
    let config = EstimatorConfig::default()
        .with_target_fps(0)
        .with_max_frames(LOOP_FRAMES);
    let source = SolidColorSource::new(WIDTH, HEIGHT, [120, 120, 120]);
    let mut estimator =
        LightingEstimator::new(config, source, MemorySink::new()).expect("valid config");
    let t = Instant::now();
    let stats = estimator.run().expect("synthetic source never fails");
    let elapsed = t.elapsed().as_secs_f64();
    let s = format!(
        "[loop] {} frames in {:.3} s ({:.1} fps), worst tick {:.3} ms\n",
        stats.presented,
        elapsed,
        stats.presented as f64 / elapsed,
        stats.worst_case.as_secs_f64() * 1000.0
    );
    print!("{s}");
    write!(report, "{s}").unwrap();

    // Save report
    fs::create_dir_all("tests/results").ok();
    fs::write("tests/results/benchmark_report.txt", &report).expect("Failed to save report");
    println!("Report saved to tests/results/benchmark_report.txt");
}
