// Still-image sources: a single picture or a directory of pictures
//
// Images are scaled to the requested frame size on load, the same way a
// camera image is drawn onto a fixed-size canvas before being sampled.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use image::ImageFormat;

use super::types::Frame;
use super::FrameSource;

/// Yields the same decoded image on every tick.
pub struct StillImageSource {
    path: PathBuf,
    frame: Frame,
    opened: Instant,
}

impl StillImageSource {
    /// Decode `path` and scale it to `width` x `height`.
    pub fn open(path: impl AsRef<Path>, width: u32, height: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let frame = crate::image::load(&path, width, height)?;
        Ok(Self {
            path,
            frame,
            opened: Instant::now(),
        })
    }
}

impl FrameSource for StillImageSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let timestamp = self.opened.elapsed().as_secs_f64();
        Ok(Some(self.frame.clone().with_timestamp(timestamp)))
    }

    fn describe(&self) -> String {
        format!("still image {}", self.path.display())
    }
}

/// Yields every image of a directory in file-name order, one per tick.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    cursor: usize,
    looping: bool,
    width: u32,
    height: u32,
    opened: Instant,
}

impl ImageSequenceSource {
    /// Scan `dir` for files with a known image extension.
    ///
    /// Fails when the directory cannot be read or holds no images.
    pub fn open(dir: impl AsRef<Path>, width: u32, height: u32) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("cannot read image directory {}", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && ImageFormat::from_path(&path).is_ok() {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            bail!("no images found in {}", dir.display());
        }
        paths.sort();

        Ok(Self {
            paths,
            cursor: 0,
            looping: false,
            width,
            height,
            opened: Instant::now(),
        })
    }

    /// Restart from the first image instead of ending the stream.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.cursor == self.paths.len() {
            if !self.looping {
                return Ok(None);
            }
            self.cursor = 0;
        }
        let path = &self.paths[self.cursor];
        self.cursor += 1;

        let frame = crate::image::load(path, self.width, self.height)?;
        let timestamp = self.opened.elapsed().as_secs_f64();
        Ok(Some(frame.with_timestamp(timestamp)))
    }

    fn describe(&self) -> String {
        match self.paths.first().and_then(|p| p.parent()) {
            Some(dir) => format!("image sequence {} ({} images)", dir.display(), self.len()),
            None => format!("image sequence ({} images)", self.len()),
        }
    }
}
