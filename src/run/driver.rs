use std::time::{Duration, Instant};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::encode::session::EncodeSession;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TileforgeError, TileforgeResult};
use crate::present::surface::PresentSurface;
use crate::render::pipeline::FramePipeline;

/// Default animation clock advance per frame.
pub const DEFAULT_TIME_STEP: f32 = 0.05;

/// Seed and clock plan for a multi-frame run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSchedule {
    /// Seed of the first frame, and of the reseed stream.
    pub seed: u64,
    /// Frames to produce.
    pub frames: u64,
    /// Clock of the first frame.
    pub start_time: f32,
    /// Clock advance per frame.
    pub time_step: f32,
    /// Draw a fresh seed for every frame after the first.
    pub reseed_each_frame: bool,
}

impl RunSchedule {
    /// `frames` frames from `seed`, clock starting at 0 and advancing by [`DEFAULT_TIME_STEP`].
    pub fn new(seed: u64, frames: u64) -> Self {
        Self {
            seed,
            frames,
            start_time: 0.0,
            time_step: DEFAULT_TIME_STEP,
            reseed_each_frame: false,
        }
    }

    /// Clock value of frame `idx`.
    ///
    /// Computed from the index rather than accumulated, so long runs do not drift.
    pub fn time_at(&self, idx: u64) -> f32 {
        (f64::from(self.start_time) + f64::from(self.time_step) * idx as f64) as f32
    }

    /// Per-frame `(index, seed, time)` in order.
    pub fn frame_plan(&self) -> impl Iterator<Item = (FrameIndex, u64, f32)> + '_ {
        let mut reseed = ChaCha8Rng::seed_from_u64(self.seed);
        (0..self.frames).map(move |i| {
            let seed = if self.reseed_each_frame && i > 0 {
                reseed.next_u64()
            } else {
                self.seed
            };
            (FrameIndex(i), seed, self.time_at(i))
        })
    }
}

/// Keyboard reseed: the run seed with the key code folded in.
pub fn seed_with_key(seed: u64, key: u32) -> u64 {
    seed | (u64::from(key) * 10)
}

/// Totals of a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderStats {
    /// Frames generated and handed to the sink.
    pub frames: u64,
    /// Tile evaluations across all frames.
    pub tiles_evaluated: u64,
    /// Seed of the last frame.
    pub last_seed: u64,
    /// Wall time spent.
    pub elapsed: Duration,
}

impl RenderStats {
    /// Frames per wall-clock second.
    pub fn frames_per_sec(&self) -> f64 {
        self.frames as f64 / self.elapsed.as_secs_f64().max(1e-9)
    }
}

fn validate_schedule(schedule: &RunSchedule) -> TileforgeResult<()> {
    if schedule.frames == 0 {
        return Err(TileforgeError::validation("run must produce at least one frame"));
    }
    if !schedule.time_step.is_finite() || !schedule.start_time.is_finite() {
        return Err(TileforgeError::validation("run clock must be finite"));
    }
    Ok(())
}

/// Generate every scheduled frame and submit it to `session`.
///
/// Stops at the first error. The session is left open (or failed) for the caller to close.
#[tracing::instrument(skip(pipeline, session), fields(frames = schedule.frames))]
pub fn render_to_session(
    pipeline: &mut FramePipeline,
    session: &mut EncodeSession,
    schedule: &RunSchedule,
) -> TileforgeResult<RenderStats> {
    validate_schedule(schedule)?;
    let started = Instant::now();
    let mut stats = RenderStats::default();
    for (idx, seed, t) in schedule.frame_plan() {
        let frame = pipeline.generate_frame(seed, t)?;
        session.submit_frame(frame)?;
        stats.frames = idx.0 + 1;
        stats.tiles_evaluated += pipeline.last_report().tiles_evaluated;
        stats.last_seed = seed;
    }
    stats.elapsed = started.elapsed();
    tracing::info!(
        frames = stats.frames,
        fps = stats.frames_per_sec(),
        "render finished"
    );
    Ok(stats)
}

/// Generate every scheduled frame, presenting and swapping each one.
#[tracing::instrument(skip(pipeline, surface), fields(frames = schedule.frames))]
pub fn present_frames(
    pipeline: &mut FramePipeline,
    surface: &mut dyn PresentSurface,
    schedule: &RunSchedule,
) -> TileforgeResult<RenderStats> {
    validate_schedule(schedule)?;
    let started = Instant::now();
    let mut stats = RenderStats::default();
    for (idx, seed, t) in schedule.frame_plan() {
        let frame = pipeline.generate_frame(seed, t)?;
        surface.present(idx, frame)?;
        surface.swap_buffers()?;
        stats.frames = idx.0 + 1;
        stats.tiles_evaluated += pipeline.last_report().tiles_evaluated;
        stats.last_seed = seed;
    }
    stats.elapsed = started.elapsed();
    tracing::debug!(frames = stats.frames, "presentation finished");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/run/driver.rs"]
mod tests;
