use crate::foundation::error::TileforgeResult;
use crate::pattern::chaos::{ChaoticState, advance_chaos_seed};
use crate::pattern::kinds::RandomnessMode;
use crate::pattern::seed::PatternContext;
use crate::render::config::PipelineConfig;
use crate::render::frame::FrameBuffer;
use crate::render::partition::RowSpan;
use crate::render::worker::{FramePlan, render_span};

/// Render a frame on the calling thread, one tile row at a time.
///
/// Ignores the worker count and assembly strategy. In chaotic mode `chaos` is advanced inline in
/// row-major tile order, the same sequence [`FramePipeline`](crate::FramePipeline) runs before
/// fanning out.
pub fn render_reference(
    config: &PipelineConfig,
    seed: u64,
    time_offset: f32,
    chaos: &mut ChaoticState,
) -> TileforgeResult<FrameBuffer> {
    config.validate()?;
    let grid = config.grid()?;
    let ctx = PatternContext {
        canvas: grid.canvas,
        tile_size: grid.tile_size,
        time_offset,
        animated: config.animated,
    };

    let chaos_table = (config.randomness == RandomnessMode::ChaoticAttractor).then(|| {
        let mut table = Vec::with_capacity(grid.tile_count());
        for ty in 0..grid.rows {
            for tx in 0..grid.cols {
                let (x, y) = grid.origin(tx, ty);
                table.push(advance_chaos_seed(chaos, x, y, config.pattern, &ctx, seed));
            }
        }
        table
    });

    let plan = FramePlan {
        grid,
        ctx,
        pattern: config.pattern,
        color_mode: config.color_mode,
        randomness: config.randomness,
        fill: config.fill,
        base_seed: seed,
        chaos_table: chaos_table.as_deref(),
    };

    let mut frame = FrameBuffer::black(config.width, config.height)?;
    let row_bytes = frame.row_bytes();
    for (ty, rows) in frame
        .data_mut()
        .chunks_mut(grid.tile_size as usize * row_bytes)
        .enumerate()
    {
        let start = ty as u32 * grid.tile_size;
        let span = RowSpan {
            start,
            end: start + (rows.len() / row_bytes) as u32,
        };
        render_span(&plan, span, rows);
    }
    Ok(frame)
}
