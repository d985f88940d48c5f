// Integration test: uniform frames through metrics and classification

use lightsense::color::{classify, compute_metrics, matching_conditions, LightingMetrics};
use lightsense::{Frame, LightingCondition, PixelFormat};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn uniform(rgb: [u8; 3]) -> LightingMetrics {
    let frame = Frame::filled(WIDTH, HEIGHT, PixelFormat::Rgba8, rgb);
    compute_metrics(&frame).expect("non-empty frame has metrics")
}

#[test]
fn test_all_black_is_dark_environment() {
    let m = uniform([0, 0, 0]);
    assert_eq!(m.average_brightness, 0.0);
    assert_eq!(m.brightness_ratio, 0.0);
    assert_eq!(m.dark_ratio, 1.0);
    assert_eq!(classify(&m).condition, LightingCondition::DarkEnvironment);
}

#[test]
fn test_all_white_is_bright_direct_light() {
    let m = uniform([255, 255, 255]);
    assert_eq!(m.average_brightness, 255.0);
    assert_eq!(m.brightness_ratio, 1.0);
    assert_eq!(m.dark_ratio, 0.0);
    // bright-direct is listed before soft-diffused
    assert_eq!(classify(&m).condition, LightingCondition::BrightDirectLight);
}

#[test]
fn test_mid_grey_is_optimal() {
    let m = uniform([120, 120, 120]);
    assert_eq!(m.average_brightness, 120.0);
    assert_eq!(m.brightness_ratio, 0.0);
    assert_eq!(m.dark_ratio, 0.0);
    assert!(matching_conditions(&m).is_empty());
    assert_eq!(classify(&m).condition, LightingCondition::OptimalLighting);
}

#[test]
fn test_light_grey_is_soft_diffused() {
    let m = uniform([180, 180, 180]);
    assert_eq!(m.average_brightness, 180.0);
    assert_eq!(m.brightness_ratio, 0.0);
    assert_eq!(m.dark_ratio, 0.0);
    let c = classify(&m);
    assert_eq!(c.condition, LightingCondition::SoftDiffusedLight);
    assert_eq!(c.color.to_hex(), "#00CED1");
}

#[test]
fn test_spotlight_on_dark_room_is_uneven() {
    // 40% black, 60% bright: average 153, dark ratio 0.4
    let (w, h) = (100u32, 10u32);
    let data: Vec<u8> = (0..w * h)
        .flat_map(|i| {
            if i % 10 < 4 {
                [0, 0, 0, 255]
            } else {
                [255, 255, 255, 255]
            }
        })
        .collect();
    let frame = Frame::new(w, h, PixelFormat::Rgba8, data).unwrap();
    let m = compute_metrics(&frame).unwrap();
    assert!((m.dark_ratio - 0.4).abs() < 1e-12);
    assert!((m.brightness_ratio - 0.6).abs() < 1e-12);
    assert_eq!(classify(&m).condition, LightingCondition::UnevenLighting);
}

#[test]
fn test_dim_grey_is_low_ambient_light() {
    let m = uniform([70, 80, 90]);
    assert_eq!(m.average_brightness, 80.0);
    assert_eq!(classify(&m).condition, LightingCondition::LowAmbientLight);
}

#[test]
fn test_metrics_stay_in_range_for_many_frames() {
    for seed in 0u32..32 {
        let data: Vec<u8> = (0..64u32 * 48)
            .flat_map(|i| {
                let v = i.wrapping_mul(2654435761).wrapping_add(seed * 97);
                [(v >> 8) as u8, (v >> 16) as u8, (v >> 24) as u8, 255]
            })
            .collect();
        let frame = Frame::new(64, 48, PixelFormat::Rgba8, data).unwrap();
        let m = compute_metrics(&frame).unwrap();
        assert!((0.0..=255.0).contains(&m.average_brightness));
        assert!((0.0..=1.0).contains(&m.brightness_ratio));
        assert!((0.0..=1.0).contains(&m.dark_ratio));

        // pure and idempotent
        assert_eq!(classify(&m), classify(&m));
        assert_eq!(compute_metrics(&frame), Some(m));
    }
}

/// The decision table written out as a plain if-chain, independent of the classifier.
fn documented_label(average_brightness: f64, brightness_ratio: f64, dark_ratio: f64) -> &'static str {
    if average_brightness < 50.0 {
        "Dark Environment"
    } else if average_brightness < 100.0 {
        "Low Ambient Light"
    } else if dark_ratio > 0.3 {
        "Uneven Lighting"
    } else if brightness_ratio > 0.4 {
        "Bright Direct Light"
    } else if average_brightness > 150.0 && brightness_ratio < 0.2 {
        "Soft, Diffused Light"
    } else {
        "Optimal Lighting"
    }
}

#[test]
fn test_first_matching_rule_always_wins() {
    let grid = [0.0, 25.0, 49.9, 50.0, 75.0, 99.9, 100.0, 125.0, 150.0, 150.1, 175.0, 200.0, 255.0];
    let ratios = [0.0, 0.1, 0.19, 0.2, 0.3, 0.31, 0.35, 0.4, 0.41, 0.5, 1.0];
    for &average_brightness in &grid {
        for &brightness_ratio in &ratios {
            for &dark_ratio in &ratios {
                let m = LightingMetrics {
                    average_brightness,
                    brightness_ratio,
                    dark_ratio,
                    pixel_count: 1,
                };
                let expected = documented_label(average_brightness, brightness_ratio, dark_ratio);
                assert_eq!(classify(&m).condition.label(), expected, "{m:?}");

                // diagnostics agree with the winner
                let first = matching_conditions(&m)
                    .first()
                    .copied()
                    .unwrap_or(LightingCondition::OptimalLighting);
                assert_eq!(first.label(), expected, "{m:?}");
            }
        }
    }
}
