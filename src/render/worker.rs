use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::foundation::core::TileGrid;
use crate::foundation::error::{TileforgeError, TileforgeResult};
use crate::pattern::color::{ColorContext, seed_to_color};
use crate::pattern::kinds::{ColorMode, PatternKind, RandomnessMode, TileFill};
use crate::pattern::seed::{PatternContext, derive_seed, enhanced_seed};
use crate::render::frame::FrameBuffer;
use crate::render::partition::RowSpan;

/// Immutable per-frame inputs shared by all workers.
#[derive(Debug)]
pub(crate) struct FramePlan<'a> {
    pub(crate) grid: TileGrid,
    pub(crate) ctx: PatternContext,
    pub(crate) pattern: PatternKind,
    pub(crate) color_mode: ColorMode,
    pub(crate) randomness: RandomnessMode,
    pub(crate) fill: TileFill,
    pub(crate) base_seed: u64,
    /// Row-major per-tile seeds, present in chaotic mode only.
    pub(crate) chaos_table: Option<&'a [u64]>,
}

impl FramePlan<'_> {
    pub(crate) fn tile_seed(&self, tx: u32, ty: u32) -> u64 {
        let (x, y) = self.grid.origin(tx, ty);
        match (self.randomness, self.chaos_table) {
            (RandomnessMode::ChaoticAttractor, Some(table)) => table[self.grid.index(tx, ty)],
            (RandomnessMode::Enhanced, _) => enhanced_seed(
                derive_seed(x, y, self.pattern, &self.ctx, self.base_seed),
                self.base_seed,
                tx,
                ty,
            ),
            _ => derive_seed(x, y, self.pattern, &self.ctx, self.base_seed),
        }
    }

    pub(crate) fn tile_color(&self, tx: u32, ty: u32) -> [u8; 3] {
        let seed = self.tile_seed(tx, ty);
        let (x, y) = self.grid.origin(tx, ty);
        let (nx, ny) = self.ctx.normalized(x, y);
        let color_ctx = ColorContext {
            time_offset: self.ctx.time_offset,
            nx,
            ny,
            pattern: self.pattern,
            animated: self.ctx.animated,
        };
        let mut stream = ChaCha8Rng::seed_from_u64(seed);
        seed_to_color(seed, self.color_mode, &color_ctx, &mut stream)
    }
}

/// What one worker hands back at the join.
#[derive(Debug)]
pub(crate) struct WorkerOutput {
    pub(crate) span: RowSpan,
    pub(crate) tiles_evaluated: u64,
    /// Private pixels for `span`; `None` when the worker wrote straight into the frame.
    pub(crate) scratch: Option<Vec<u8>>,
}

/// Render `span` into `out`, which holds exactly the span's rows.
///
/// Tiles that straddle a span boundary are evaluated by both neighbors; each pixel is still written
/// by one worker only.
pub(crate) fn render_span(plan: &FramePlan<'_>, span: RowSpan, out: &mut [u8]) -> u64 {
    if span.is_empty() {
        return 0;
    }
    let grid = plan.grid;
    let width = grid.canvas.width;
    let row_bytes = width as usize * FrameBuffer::CHANNELS;
    debug_assert_eq!(out.len(), span.len() as usize * row_bytes);

    let tile = grid.tile_size;
    let mut colors = vec![[0u8; 3]; grid.cols as usize];
    let mut tiles_evaluated = 0u64;

    for ty in grid.tile_row_of(span.start)..=grid.tile_row_of(span.end - 1) {
        for (tx, c) in colors.iter_mut().enumerate() {
            *c = plan.tile_color(tx as u32, ty);
        }
        tiles_evaluated += u64::from(grid.cols);

        let tile_top = ty * tile;
        let y0 = tile_top.max(span.start);
        let y1 = tile_top.saturating_add(tile).min(span.end);
        for y in y0..y1 {
            let local_y = y - tile_top;
            let edge_row = local_y == 0 || local_y == tile - 1;
            let row_off = (y - span.start) as usize * row_bytes;
            let row = &mut out[row_off..row_off + row_bytes];
            for (x, px) in row.chunks_exact_mut(FrameBuffer::CHANNELS).enumerate() {
                let x = x as u32;
                let local_x = x % tile;
                let painted = match plan.fill {
                    TileFill::Filled => true,
                    TileFill::Outline => edge_row || local_x == 0 || local_x == tile - 1,
                };
                if painted {
                    px.copy_from_slice(&colors[(x / tile) as usize]);
                } else {
                    px.fill(0);
                }
            }
        }
    }
    tiles_evaluated
}

/// Worker entry point for [`AssemblyStrategy::Direct`](crate::AssemblyStrategy::Direct).
pub(crate) fn run_direct(plan: &FramePlan<'_>, span: RowSpan, out: &mut [u8]) -> WorkerOutput {
    let tiles_evaluated = render_span(plan, span, out);
    WorkerOutput {
        span,
        tiles_evaluated,
        scratch: None,
    }
}

/// Worker entry point for [`AssemblyStrategy::Scratch`](crate::AssemblyStrategy::Scratch).
pub(crate) fn run_scratch(plan: &FramePlan<'_>, span: RowSpan) -> TileforgeResult<WorkerOutput> {
    let len = span.len() as usize * plan.grid.canvas.width as usize * FrameBuffer::CHANNELS;
    let mut scratch = Vec::new();
    scratch.try_reserve_exact(len).map_err(|e| {
        TileforgeError::allocation(format!(
            "worker scratch for rows {}..{} ({len} bytes): {e}",
            span.start, span.end
        ))
    })?;
    scratch.resize(len, 0);
    let tiles_evaluated = render_span(plan, span, &mut scratch);
    Ok(WorkerOutput {
        span,
        tiles_evaluated,
        scratch: Some(scratch),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/worker.rs"]
mod tests;
