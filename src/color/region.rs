// Subject regions (typically faces) supplied by an external detector.
//
// Detection itself is out of scope; callers plug a detector in and the
// lightness reading then focuses on the largest region it reports.

use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::capture::Frame;

/// Axis-aligned rectangle in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Intersection with a `width` x `height` frame, `None` if empty.
    pub fn clip(&self, width: u32, height: u32) -> Option<Region> {
        let right = self.x.saturating_add(self.width).min(width);
        let bottom = self.y.saturating_add(self.height).min(height);
        if self.x >= right || self.y >= bottom {
            return None;
        }
        Some(Region::new(self.x, self.y, right - self.x, bottom - self.y))
    }
}

impl FromStr for Region {
    type Err = anyhow::Error;

    /// Parses `x,y,width,height`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, width, height] = parts.as_slice() else {
            bail!("invalid region '{}': expected x,y,width,height", s);
        };
        let field = |value: &str| {
            value
                .parse::<u32>()
                .with_context(|| format!("invalid region '{}'", s))
        };
        Ok(Region::new(field(x)?, field(y)?, field(width)?, field(height)?))
    }
}

/// Largest region by area; the first one wins a tie.
pub fn largest_region(regions: &[Region]) -> Option<Region> {
    regions
        .iter()
        .copied()
        .reduce(|best, r| if r.area() > best.area() { r } else { best })
}

/// Finds subject regions in a frame.
///
/// An empty list means no subject; the whole frame is analysed instead.
pub trait RegionDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>>;
}

impl<F> RegionDetector for F
where
    F: FnMut(&Frame) -> Result<Vec<Region>>,
{
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>> {
        self(frame)
    }
}

/// Reports the same regions for every frame.
#[derive(Debug, Clone, Default)]
pub struct FixedRegions(pub Vec<Region>);

impl RegionDetector for FixedRegions {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Region>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_to_frame() {
        let r = Region::new(600, 400, 100, 100);
        assert_eq!(r.clip(640, 480), Some(Region::new(600, 400, 40, 80)));
        assert_eq!(Region::new(640, 0, 10, 10).clip(640, 480), None);
        assert_eq!(Region::new(0, 0, 0, 10).clip(640, 480), None);
        assert_eq!(
            Region::new(u32::MAX - 1, 0, 10, 10).clip(u32::MAX, 4),
            Some(Region::new(u32::MAX - 1, 0, 1, 4))
        );
    }

    #[test]
    fn largest_wins_first_on_tie() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 5, 20, 5);
        let c = Region::new(1, 1, 30, 30);
        assert_eq!(largest_region(&[a, c, b]), Some(c));
        assert_eq!(largest_region(&[a, Region::new(9, 9, 5, 20)]), Some(a));
        assert_eq!(largest_region(&[]), None);
    }

    #[test]
    fn parses_region() {
        assert_eq!(
            "10, 20,30,40".parse::<Region>().unwrap(),
            Region::new(10, 20, 30, 40)
        );
        assert!("10,20,30".parse::<Region>().is_err());
        assert!("a,b,c,d".parse::<Region>().is_err());
    }

    #[test]
    fn closures_are_detectors() {
        let frame = Frame::filled(4, 4, crate::capture::PixelFormat::Rgba8, [0, 0, 0]);
        let mut detector = |_: &Frame| -> Result<Vec<Region>> { Ok(vec![Region::new(0, 0, 2, 2)]) };
        assert_eq!(detector.detect(&frame).unwrap().len(), 1);
        assert!(FixedRegions::default().detect(&frame).unwrap().is_empty());
    }
}
