use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TileforgeError, TileforgeResult};
use crate::present::surface::PresentSurface;
use crate::render::frame::FrameBuffer;

/// Write `frame` to `path` as an 8-bit RGB PNG, creating parent directories.
pub fn save_png(path: &Path, frame: &FrameBuffer) -> TileforgeResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Surface that writes each swapped frame to `<dir>/<prefix>_<index>.png`.
#[derive(Debug)]
pub struct PngSurface {
    dir: PathBuf,
    prefix: String,
    back: Option<(FrameIndex, FrameBuffer)>,
    written: Vec<PathBuf>,
}

impl PngSurface {
    /// Surface writing into `dir`, file names starting with `prefix`.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            back: None,
            written: Vec::new(),
        }
    }

    /// File name for frame `idx`.
    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}_{:05}.png", self.prefix, idx.0))
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl PresentSurface for PngSurface {
    fn present(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> TileforgeResult<()> {
        self.back = Some((idx, frame.clone()));
        Ok(())
    }

    fn swap_buffers(&mut self) -> TileforgeResult<()> {
        let Some((idx, frame)) = self.back.take() else {
            return Err(TileforgeError::validation(
                "png surface swap without a presented frame",
            ));
        };
        let path = self.path_for(idx);
        save_png(&path, &frame)?;
        tracing::debug!(path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/png.rs"]
mod tests;
