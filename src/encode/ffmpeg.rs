use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::backend::{ContainerStats, EncodeBackend, EncodeParams};
use crate::encode::yuv::Yuv420Frame;
use crate::foundation::core::Fps;
use crate::foundation::error::{TileforgeError, TileforgeResult};

/// Output options for [`FfmpegBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FfmpegOpts {
    /// Output MP4 path.
    pub out_path: PathBuf,
    /// Replace an existing file.
    pub overwrite: bool,
}

impl FfmpegOpts {
    /// Write (and overwrite) `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// H.264/MP4 backend that pipes raw `yuv420p` planes into the system `ffmpeg`.
///
/// ffmpeg owns packetization and muxing, so every frame written to its stdin counts as one packet.
pub struct FfmpegBackend {
    opts: FfmpegOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    fps: Option<Fps>,
    frames: u64,
}

impl FfmpegBackend {
    /// Backend writing to `opts.out_path`. Nothing is spawned until `open`.
    pub fn new(opts: FfmpegOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            fps: None,
            frames: 0,
        }
    }

    fn command(&self, params: &EncodeParams) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.opts.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "yuv420p",
            "-s",
            &format!("{}x{}", params.width, params.height),
            "-r",
            &format!("{}/{}", params.fps.num, params.fps.den),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-b:v",
            &format!("{}k", params.bitrate_kbps),
            "-preset",
            &params.preset,
        ]);
        if let Some(tune) = params.tune.as_deref() {
            cmd.args(["-tune", tune]);
        }
        cmd.args(["-pix_fmt", "yuv420p", "-movflags", "+faststart"])
            .arg(&self.opts.out_path);
        cmd
    }
}

impl std::fmt::Debug for FfmpegBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegBackend")
            .field("opts", &self.opts)
            .field("running", &self.child.is_some())
            .field("frames", &self.frames)
            .finish()
    }
}

impl EncodeBackend for FfmpegBackend {
    fn open(&mut self, params: &EncodeParams) -> TileforgeResult<()> {
        params.validate()?;
        if !params.width.is_multiple_of(2) || !params.height.is_multiple_of(2) {
            return Err(TileforgeError::validation(
                "ffmpeg width/height must be even (required for yuv420p mp4 output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(TileforgeError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(TileforgeError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut child = self.command(params).spawn().map_err(|e| {
            TileforgeError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TileforgeError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| TileforgeError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg started");
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.fps = Some(params.fps);
        self.frames = 0;
        Ok(())
    }

    fn send_frame(&mut self, frame: Option<&Yuv420Frame>) -> TileforgeResult<usize> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(TileforgeError::encode("ffmpeg backend is not running"));
        };
        match frame {
            Some(frame) => {
                frame.write_planes(stdin).map_err(|e| {
                    TileforgeError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
                })?;
                self.frames += 1;
                Ok(1)
            }
            None => {
                stdin.flush().map_err(|e| {
                    TileforgeError::encode(format!("failed to flush ffmpeg stdin: {e}"))
                })?;
                Ok(0)
            }
        }
    }

    fn write_trailer(&mut self) -> TileforgeResult<ContainerStats> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| TileforgeError::encode("ffmpeg backend not started"))?;

        let status = child.wait().map_err(|e| {
            TileforgeError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| TileforgeError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| TileforgeError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(TileforgeError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        let fps = self
            .fps
            .ok_or_else(|| TileforgeError::encode("ffmpeg backend not started"))?;
        let bytes = std::fs::metadata(&self.opts.out_path)
            .map_err(|e| {
                TileforgeError::encode(format!(
                    "ffmpeg output '{}' unreadable after encode: {e}",
                    self.opts.out_path.display()
                ))
            })?
            .len();
        Ok(ContainerStats {
            packets: self.frames,
            bytes,
            duration_secs: fps.frames_to_secs(self.frames),
        })
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> TileforgeResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
