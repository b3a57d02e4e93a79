use std::time::{Duration, Instant};

use crate::encode::backend::{EncodeBackend, EncodeParams, MemoryBackend};
use crate::encode::ffmpeg::{FfmpegBackend, FfmpegOpts};
use crate::encode::yuv::Yuv420Converter;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{TileforgeError, TileforgeResult};
use crate::render::frame::FrameBuffer;

/// Where an encode session writes.
#[derive(Debug)]
pub enum EncodeTarget {
    /// H.264 MP4 through the system `ffmpeg`.
    Mp4(FfmpegOpts),
    /// In-memory container with the given reorder depth.
    Memory {
        /// Frames held back before packets are emitted.
        reorder_depth: usize,
    },
    /// Caller-supplied backend.
    Backend(Box<dyn EncodeBackend>),
}

impl EncodeTarget {
    fn into_backend(self) -> Box<dyn EncodeBackend> {
        match self {
            EncodeTarget::Mp4(opts) => Box::new(FfmpegBackend::new(opts)),
            EncodeTarget::Memory { reorder_depth } => Box::new(MemoryBackend::new(reorder_depth)),
            EncodeTarget::Backend(b) => b,
        }
    }
}

/// Lifecycle of an [`EncodeSession`].
///
/// `Uninitialized -> Open -> Encoding -> Flushing -> Closed`. A backend error while open or
/// encoding moves to `Failed`; closing a failed session still finalizes the container and ends in
/// `Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Created, backend not opened.
    Uninitialized,
    /// Backend opened, no frame submitted yet.
    Open,
    /// At least one frame submitted.
    Encoding,
    /// Draining buffered packets during close.
    Flushing,
    /// Trailer written (or attempted). Terminal.
    Closed,
    /// A submission failed; only `close` is accepted.
    Failed,
}

/// What a closed session produced.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeSummary {
    /// Frames accepted by the backend.
    pub frames: u64,
    /// Packets written to the container.
    pub packets: u64,
    /// Container duration in seconds.
    pub duration_secs: f64,
    /// Wall time from open to close.
    pub elapsed: Duration,
    /// `true` when the session had failed before closing; the container holds partial output.
    pub failed: bool,
}

/// One encode run: RGB frames in, a finalized container out.
///
/// Frames are converted to YUV 4:2:0, handed to the backend in submission order and counted. The
/// first backend error stops the session.
#[derive(Debug)]
pub struct EncodeSession {
    params: EncodeParams,
    backend: Box<dyn EncodeBackend>,
    converter: Yuv420Converter,
    state: SessionState,
    frames: u64,
    packets: u64,
    started: Option<Instant>,
    progress_every: u64,
    failure: Option<String>,
}

/// Open a session for `width x height` frames at `fps` with default codec settings.
pub fn open_encode_session(
    target: EncodeTarget,
    fps: Fps,
    width: u32,
    height: u32,
) -> TileforgeResult<EncodeSession> {
    EncodeSession::open(target.into_backend(), EncodeParams::new(width, height, fps))
}

impl EncodeSession {
    /// Create an unopened session.
    pub fn new(backend: Box<dyn EncodeBackend>, params: EncodeParams) -> TileforgeResult<Self> {
        params.validate()?;
        let converter = Yuv420Converter::new(Canvas {
            width: params.width,
            height: params.height,
        })?;
        let progress_every = u64::from((params.fps.num / params.fps.den.max(1)).max(1));
        Ok(Self {
            params,
            backend,
            converter,
            state: SessionState::Uninitialized,
            frames: 0,
            packets: 0,
            started: None,
            progress_every,
            failure: None,
        })
    }

    /// Create and open a session in one step.
    #[tracing::instrument(
        skip(backend, params),
        fields(width = params.width, height = params.height)
    )]
    pub fn open(backend: Box<dyn EncodeBackend>, params: EncodeParams) -> TileforgeResult<Self> {
        let mut session = Self::new(backend, params)?;
        session.begin()?;
        Ok(session)
    }

    /// Build a session for `target` with explicit codec parameters.
    pub fn with_target(target: EncodeTarget, params: EncodeParams) -> TileforgeResult<Self> {
        Self::open(target.into_backend(), params)
    }

    /// Open the codec and write the container header.
    pub fn begin(&mut self) -> TileforgeResult<()> {
        if self.state != SessionState::Uninitialized {
            return Err(TileforgeError::validation(format!(
                "encode session already started (state {:?})",
                self.state
            )));
        }
        self.backend.open(&self.params)?;
        self.state = SessionState::Open;
        self.started = Some(Instant::now());
        tracing::info!(
            fps = self.params.fps.as_f64(),
            bitrate_kbps = self.params.bitrate_kbps,
            preset = %self.params.preset,
            "encode session opened"
        );
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Codec parameters.
    pub fn params(&self) -> &EncodeParams {
        &self.params
    }

    /// Frames accepted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Packets the backend reported so far.
    pub fn packets(&self) -> u64 {
        self.packets
    }

    /// Message of the error that failed the session, if any.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Convert and submit one frame.
    pub fn submit_frame(&mut self, frame: &FrameBuffer) -> TileforgeResult<()> {
        match self.state {
            SessionState::Open | SessionState::Encoding => {}
            SessionState::Failed => {
                return Err(TileforgeError::validation(format!(
                    "encode session failed earlier: {}",
                    self.failure.as_deref().unwrap_or("unknown error")
                )));
            }
            other => {
                return Err(TileforgeError::validation(format!(
                    "cannot submit a frame to an encode session in state {other:?}"
                )));
            }
        }

        let yuv = self.converter.convert(frame)?;
        match self.backend.send_frame(Some(yuv)) {
            Ok(n) => self.packets += n as u64,
            Err(e) => {
                tracing::error!(frame = self.frames, error = %e, "encoder rejected frame");
                self.failure = Some(e.to_string());
                self.state = SessionState::Failed;
                return Err(e);
            }
        }
        self.frames += 1;
        self.state = SessionState::Encoding;

        if self.frames.is_multiple_of(self.progress_every) {
            self.log_progress();
        }
        Ok(())
    }

    fn log_progress(&self) {
        let elapsed = self.started.map(|t| t.elapsed()).unwrap_or_default();
        let rate = self.frames as f64 / elapsed.as_secs_f64().max(1e-9);
        match self.params.target_frames {
            Some(total) if total > 0 => {
                let eta_secs = total.saturating_sub(self.frames) as f64 / rate;
                tracing::info!(
                    frames = self.frames,
                    total,
                    percent = self.frames as f64 * 100.0 / total as f64,
                    fps = rate,
                    eta_secs,
                    "encoding"
                );
            }
            _ => tracing::info!(frames = self.frames, fps = rate, "encoding"),
        }
    }

    /// Drain buffered packets and write the trailer.
    ///
    /// A failed session skips the drain but still finalizes what was written.
    #[tracing::instrument(skip(self), fields(frames = self.frames))]
    pub fn close(&mut self) -> TileforgeResult<EncodeSummary> {
        let failed = match self.state {
            SessionState::Open | SessionState::Encoding => false,
            SessionState::Failed => true,
            other => {
                return Err(TileforgeError::validation(format!(
                    "cannot close an encode session in state {other:?}"
                )));
            }
        };

        let drained = if failed {
            Ok(0)
        } else {
            self.state = SessionState::Flushing;
            self.backend.send_frame(None)
        };
        let trailer = self.backend.write_trailer();
        self.state = SessionState::Closed;

        self.packets += drained? as u64;
        let stats = trailer?;
        let summary = EncodeSummary {
            frames: self.frames,
            packets: stats.packets,
            duration_secs: stats.duration_secs,
            elapsed: self.started.map(|t| t.elapsed()).unwrap_or_default(),
            failed,
        };
        tracing::info!(
            frames = summary.frames,
            duration_secs = summary.duration_secs,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            failed,
            "encode session closed"
        );
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/session.rs"]
mod tests;
