//! Directory-backed capture: a sorted image folder stands in for each
//! camera, and a sink writes annotated frames back out as PNGs.

use std::path::{Path, PathBuf};

use crate::capture::domain::camera_provider::{CameraFacing, CameraProvider};
use crate::capture::domain::frame_source::FrameSource;
use crate::capture::domain::render_sink::RenderSink;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Streams the images of a directory in lexicographic filename order.
pub struct ImageDirSource {
    paths: Vec<PathBuf>,
    next: usize,
}

impl ImageDirSource {
    pub fn new(dir: &Path) -> std::io::Result<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image(p))
            .collect();
        paths.sort();
        log::debug!("{} frames under {}", paths.len(), dir.display());
        Ok(Self { paths, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageDirSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(path) = self.paths.get(self.next) else {
            return Ok(None);
        };
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        let frame = Frame::new(rgb.into_raw(), width, height, 3, self.next);
        self.next += 1;
        Ok(Some(frame))
    }
}

/// Maps camera facings to image directories. The front directory is
/// optional; opening the front camera without one fails.
pub struct ImageDirProvider {
    back: PathBuf,
    front: Option<PathBuf>,
}

impl ImageDirProvider {
    pub fn new(back: PathBuf, front: Option<PathBuf>) -> Self {
        Self { back, front }
    }
}

impl CameraProvider for ImageDirProvider {
    fn open(
        &self,
        facing: CameraFacing,
    ) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
        let dir = match facing {
            CameraFacing::Back => &self.back,
            CameraFacing::Front => self
                .front
                .as_ref()
                .ok_or("no front camera directory configured")?,
        };
        Ok(Box::new(ImageDirSource::new(dir)?))
    }
}

/// Writes each rendered frame as a numbered PNG.
pub struct ImageDirSink {
    dir: PathBuf,
}

impl ImageDirSink {
    pub fn new(dir: PathBuf) -> std::io::Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl RenderSink for ImageDirSink {
    fn render(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if frame.channels() != 3 {
            return Err(format!("expected 3 channels, got {}", frame.channels()).into());
        }
        let buffer = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("frame buffer does not match its dimensions")?;
        let path = self.dir.join(format!("frame-{:05}.png", frame.index()));
        buffer.save(&path)?;
        Ok(())
    }
}
