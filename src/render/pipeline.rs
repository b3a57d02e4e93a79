use std::thread;

use crate::foundation::core::TileGrid;
use crate::foundation::error::{TileforgeError, TileforgeResult};
use crate::pattern::chaos::{ChaoticState, chaos_seed_table};
use crate::pattern::kinds::{ColorMode, PatternKind, RandomnessMode, TileFill};
use crate::pattern::seed::PatternContext;
use crate::render::assemble::{AssemblyReport, assemble, join_workers};
use crate::render::config::{AssemblyStrategy, PipelineConfig, validate_workers};
use crate::render::frame::FrameBuffer;
use crate::render::partition::partition_rows;
use crate::render::worker::{FramePlan, WorkerOutput, run_direct, run_scratch};

/// Owns the frame buffer, the active configuration and the chaotic state.
///
/// Each [`FramePipeline::generate_frame`] call partitions the rows, spawns one scoped thread per
/// span, joins them all and assembles the result before handing the frame out. Setters take
/// `&mut self`, so configuration can only change between frames.
#[derive(Debug)]
pub struct FramePipeline {
    config: PipelineConfig,
    grid: TileGrid,
    frame: FrameBuffer,
    chaos: ChaoticState,
    chaos_seed: Option<u64>,
    last_report: AssemblyReport,
    frames_generated: u64,
}

/// Shorthand for [`FramePipeline::configure`].
pub fn configure(config: PipelineConfig) -> TileforgeResult<FramePipeline> {
    FramePipeline::configure(config)
}

impl FramePipeline {
    /// Validate `config` and allocate the frame buffer.
    #[tracing::instrument(skip(config), fields(width = config.width, height = config.height))]
    pub fn configure(config: PipelineConfig) -> TileforgeResult<Self> {
        config.validate()?;
        let grid = config.grid()?;
        let frame = FrameBuffer::black(config.width, config.height)?;
        tracing::debug!(
            tiles = grid.tile_count(),
            workers = config.effective_workers(),
            "pipeline configured"
        );
        Ok(Self {
            config,
            grid,
            frame,
            chaos: ChaoticState::INITIAL,
            chaos_seed: None,
            last_report: AssemblyReport::default(),
            frames_generated: 0,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Select the coordinate-to-seed transform.
    pub fn set_pattern(&mut self, pattern: PatternKind) {
        self.config.pattern = pattern;
    }

    /// Select the seed-to-RGB mapping.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.config.color_mode = mode;
    }

    /// Select the randomness mode. Switching modes resets the chaotic state.
    pub fn set_randomness(&mut self, mode: RandomnessMode) {
        if self.config.randomness != mode {
            self.reset_chaos();
        }
        self.config.randomness = mode;
    }

    /// Solid or outlined tiles.
    pub fn set_fill(&mut self, fill: TileFill) {
        self.config.fill = fill;
    }

    /// Toggle the time-driven pattern variants.
    pub fn set_animated(&mut self, animated: bool) {
        self.config.animated = animated;
    }

    /// Change the worker count for subsequent frames.
    pub fn set_worker_count(&mut self, workers: usize) -> TileforgeResult<()> {
        validate_workers(workers)?;
        self.config.workers = workers;
        Ok(())
    }

    /// Change how worker output reaches the frame.
    pub fn set_assembly(&mut self, assembly: AssemblyStrategy) {
        self.config.assembly = assembly;
    }

    /// Return the chaotic state to its initial value.
    pub fn reset_chaos(&mut self) {
        self.chaos.reset();
        self.chaos_seed = None;
    }

    /// Current chaotic state.
    pub fn chaotic_state(&self) -> ChaoticState {
        self.chaos
    }

    /// The most recently generated frame (black before the first call).
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Assembly summary of the last frame.
    pub fn last_report(&self) -> AssemblyReport {
        self.last_report
    }

    /// Frames generated since configuration.
    pub fn frames_generated(&self) -> u64 {
        self.frames_generated
    }

    /// Render one complete frame for `seed` at `time_offset`.
    ///
    /// Returns only after every worker has joined; a worker panic or scratch allocation failure
    /// fails the whole frame.
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(pattern = %self.config.pattern, randomness = %self.config.randomness)
    )]
    pub fn generate_frame(&mut self, seed: u64, time_offset: f32) -> TileforgeResult<&FrameBuffer> {
        let cfg = &self.config;
        let ctx = PatternContext {
            canvas: self.grid.canvas,
            tile_size: self.grid.tile_size,
            time_offset,
            animated: cfg.animated,
        };

        let chaos_table = if cfg.randomness == RandomnessMode::ChaoticAttractor {
            if self.chaos_seed != Some(seed) {
                if self.chaos_seed.is_some() {
                    tracing::debug!(seed, "seed changed, resetting chaotic state");
                }
                self.chaos.reset();
                self.chaos_seed = Some(seed);
            }
            Some(chaos_seed_table(
                &mut self.chaos,
                self.grid,
                cfg.pattern,
                &ctx,
                seed,
            )?)
        } else {
            None
        };

        let plan = FramePlan {
            grid: self.grid,
            ctx,
            pattern: cfg.pattern,
            color_mode: cfg.color_mode,
            randomness: cfg.randomness,
            fill: cfg.fill,
            base_seed: seed,
            chaos_table: chaos_table.as_deref(),
        };
        let spans = partition_rows(cfg.height, cfg.effective_workers())?;
        let assembly = cfg.assembly;
        let row_bytes = self.frame.row_bytes();
        let frame_data = self.frame.data_mut();

        let outputs = thread::scope(|s| {
            let plan = &plan;
            let mut rest: &mut [u8] = frame_data;
            let mut handles = Vec::with_capacity(spans.len());
            for (index, &span) in spans.iter().enumerate() {
                let builder = thread::Builder::new().name(format!("tileforge-worker-{index}"));
                let spawned = match assembly {
                    AssemblyStrategy::Direct => {
                        let (chunk, tail) =
                            std::mem::take(&mut rest).split_at_mut(span.len() as usize * row_bytes);
                        rest = tail;
                        builder.spawn_scoped(s, move || -> TileforgeResult<WorkerOutput> {
                            Ok(run_direct(plan, span, chunk))
                        })
                    }
                    AssemblyStrategy::Scratch => {
                        builder.spawn_scoped(s, move || run_scratch(plan, span))
                    }
                };
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        if let Err(joined) = join_workers(handles) {
                            tracing::warn!(error = %joined, "worker failed while aborting spawn");
                        }
                        return Err(TileforgeError::Other(anyhow::anyhow!(
                            "failed to spawn tileforge-worker-{index}: {e}"
                        )));
                    }
                }
            }
            join_workers(handles)
        })?;

        let report = assemble(self.frame.data_mut(), row_bytes, outputs)?;
        self.last_report = report;
        self.frames_generated += 1;
        tracing::debug!(
            frame = self.frames_generated,
            workers = report.workers,
            tiles = report.tiles_evaluated,
            copied = report.copied_bytes,
            "frame assembled"
        );
        Ok(&self.frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
