// Brightness bar overlay for annotated snapshots

use image::{Rgba, RgbaImage};

use crate::color::DisplayColor;

const BAR_LEFT: u32 = 50;
const BAR_MAX_WIDTH: f64 = 200.0;
/// Distance from the bottom edge to the bar's top row.
const BAR_TOP_FROM_BOTTOM: u32 = 100;
/// Distance from the bottom edge to the row just below the bar.
const BAR_BOTTOM_FROM_BOTTOM: u32 = 80;

/// Draw a filled bar whose length is proportional to `brightness` (0-255).
///
/// The bar starts 50px from the left and sits 80-100px above the bottom
/// edge; anything outside the image is clipped.
pub fn draw_brightness_bar(image: &mut RgbaImage, brightness: f64, color: DisplayColor) {
    let (width, height) = image.dimensions();
    let progress = (brightness / 255.0).clamp(0.0, 1.0);
    let bar_width = (progress * BAR_MAX_WIDTH) as u32;

    let top = height.saturating_sub(BAR_TOP_FROM_BOTTOM);
    let bottom = height.saturating_sub(BAR_BOTTOM_FROM_BOTTOM);
    let right = (BAR_LEFT + bar_width).min(width);
    let pixel = Rgba(color.to_rgba());

    for y in top..bottom {
        for x in BAR_LEFT.min(right)..right {
            image.put_pixel(x, y, pixel);
        }
    }
}
