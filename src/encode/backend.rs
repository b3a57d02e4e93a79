use std::collections::VecDeque;

use crate::encode::yuv::Yuv420Frame;
use crate::foundation::core::Fps;
use crate::foundation::error::{TileforgeError, TileforgeResult};

/// Codec and container settings shared by every backend.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeParams {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Container frame rate.
    pub fps: Fps,
    /// Target video bitrate in kbit/s.
    pub bitrate_kbps: u32,
    /// x264 speed/quality preset.
    pub preset: String,
    /// Optional x264 tuning (`film`, `animation`, ...).
    pub tune: Option<String>,
    /// Expected frame count, used for progress reporting only.
    pub target_frames: Option<u64>,
}

impl EncodeParams {
    /// Defaults: 8000 kbit/s, `medium` preset, no tune.
    pub fn new(width: u32, height: u32, fps: Fps) -> Self {
        Self {
            width,
            height,
            fps,
            bitrate_kbps: 8000,
            preset: "medium".to_owned(),
            tune: None,
            target_frames: None,
        }
    }

    /// Check the values every backend relies on.
    pub fn validate(&self) -> TileforgeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TileforgeError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(TileforgeError::validation("encode fps must be non-zero"));
        }
        if self.bitrate_kbps == 0 {
            return Err(TileforgeError::validation("encode bitrate must be non-zero"));
        }
        Ok(())
    }
}

/// One compressed unit handed to the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packet {
    /// Presentation timestamp, in frames.
    pub pts: u64,
    /// Payload size in bytes.
    pub size: usize,
    /// Intra frame.
    pub keyframe: bool,
}

/// Container totals reported when the trailer is written.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerStats {
    /// Packets written to the container.
    pub packets: u64,
    /// Payload bytes, when the backend can observe them.
    pub bytes: u64,
    /// Container duration in seconds.
    pub duration_secs: f64,
}

/// Codec plus container behind an [`EncodeSession`](crate::EncodeSession).
///
/// Call order is `open`, any number of `send_frame(Some(..))`, then `send_frame(None)` to drain and
/// finally `write_trailer`. `write_trailer` may follow a failed `send_frame`; it finalizes whatever
/// was written.
pub trait EncodeBackend: Send + std::fmt::Debug {
    /// Open the codec and write the container header.
    fn open(&mut self, params: &EncodeParams) -> TileforgeResult<()>;
    /// Submit one frame (or `None` to drain). Returns the packets written as a result.
    fn send_frame(&mut self, frame: Option<&Yuv420Frame>) -> TileforgeResult<usize>;
    /// Finalize the container.
    fn write_trailer(&mut self) -> TileforgeResult<ContainerStats>;
}

/// In-memory codec/container model.
///
/// Holds back `reorder_depth` frames before emitting packets, the way a B-frame encoder does, so
/// draining on close is observable. Keyframes are every `gop` frames.
#[derive(Debug)]
pub struct MemoryBackend {
    reorder_depth: usize,
    gop: u64,
    fail_at: Option<u64>,
    fps: Option<Fps>,
    frame_bytes: usize,
    next_pts: u64,
    pending: VecDeque<u64>,
    packets: Vec<Packet>,
    finalized: bool,
}

impl MemoryBackend {
    /// Backend buffering `reorder_depth` frames.
    pub fn new(reorder_depth: usize) -> Self {
        Self {
            reorder_depth,
            gop: 30,
            fail_at: None,
            fps: None,
            frame_bytes: 0,
            next_pts: 0,
            pending: VecDeque::new(),
            packets: Vec::new(),
            finalized: false,
        }
    }

    /// Make the submission of frame number `frame` (0-based) fail, to exercise error paths.
    pub fn fail_at_frame(mut self, frame: u64) -> Self {
        self.fail_at = Some(frame);
        self
    }

    /// Packets written so far, in container order.
    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    /// Frames submitted but not yet emitted.
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    /// `true` once the trailer is written.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn emit(&mut self, pts: u64) {
        self.packets.push(Packet {
            pts,
            // Stand-in for compressed size.
            size: self.frame_bytes / 8,
            keyframe: pts % self.gop == 0,
        });
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(2)
    }
}

impl EncodeBackend for MemoryBackend {
    fn open(&mut self, params: &EncodeParams) -> TileforgeResult<()> {
        params.validate()?;
        self.fps = Some(params.fps);
        self.frame_bytes = params.width as usize * params.height as usize * 3 / 2;
        Ok(())
    }

    fn send_frame(&mut self, frame: Option<&Yuv420Frame>) -> TileforgeResult<usize> {
        if self.fps.is_none() {
            return Err(TileforgeError::encode("memory backend not opened"));
        }
        if self.finalized {
            return Err(TileforgeError::encode("memory backend already finalized"));
        }
        let before = self.packets.len();
        match frame {
            Some(_) => {
                if self.fail_at == Some(self.next_pts) {
                    return Err(TileforgeError::encode(format!(
                        "injected failure at frame {}",
                        self.next_pts
                    )));
                }
                self.pending.push_back(self.next_pts);
                self.next_pts += 1;
                while self.pending.len() > self.reorder_depth {
                    if let Some(pts) = self.pending.pop_front() {
                        self.emit(pts);
                    }
                }
            }
            None => {
                while let Some(pts) = self.pending.pop_front() {
                    self.emit(pts);
                }
            }
        }
        Ok(self.packets.len() - before)
    }

    fn write_trailer(&mut self) -> TileforgeResult<ContainerStats> {
        let fps = self
            .fps
            .ok_or_else(|| TileforgeError::encode("memory backend not opened"))?;
        self.finalized = true;
        let packets = self.packets.len() as u64;
        Ok(ContainerStats {
            packets,
            bytes: self.packets.iter().map(|p| p.size as u64).sum(),
            duration_secs: fps.frames_to_secs(packets),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/backend.rs"]
mod tests;
