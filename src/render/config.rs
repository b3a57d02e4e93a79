use crate::foundation::core::{Canvas, TileGrid};
use crate::foundation::error::{TileforgeError, TileforgeResult};
use crate::pattern::kinds::{ColorMode, PatternKind, RandomnessMode, TileFill};

/// Upper bound on workers per frame.
pub const MAX_WORKERS: usize = 256;

/// Where workers put their pixels.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyStrategy {
    /// Each worker writes its disjoint slice of the frame buffer.
    #[default]
    Direct,
    /// Each worker fills a private buffer that is copied into place after the join.
    Scratch,
}

/// Everything that shapes a frame apart from the seed and the clock.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Coordinate-to-seed transform.
    pub pattern: PatternKind,
    /// Seed-to-RGB mapping.
    pub color_mode: ColorMode,
    /// Extra per-tile entropy.
    pub randomness: RandomnessMode,
    /// Solid or outlined tiles.
    pub fill: TileFill,
    /// Use time-driven pattern variants.
    pub animated: bool,
    /// Worker threads per frame, `1..=MAX_WORKERS`.
    pub workers: usize,
    /// Worker output placement.
    pub assembly: AssemblyStrategy,
}

impl PipelineConfig {
    /// Config with filled, static tiles and direct assembly.
    pub fn new(
        width: u32,
        height: u32,
        tile_size: u32,
        pattern: PatternKind,
        color_mode: ColorMode,
        randomness: RandomnessMode,
        workers: usize,
    ) -> Self {
        Self {
            width,
            height,
            tile_size,
            pattern,
            color_mode,
            randomness,
            fill: TileFill::Filled,
            animated: false,
            workers,
            assembly: AssemblyStrategy::Direct,
        }
    }

    /// Check ranges. Nothing is allocated.
    pub fn validate(&self) -> TileforgeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TileforgeError::validation(format!(
                "image dimensions must be non-zero (got {}x{})",
                self.width, self.height
            )));
        }
        if self.tile_size == 0 {
            return Err(TileforgeError::validation("tile_size must be >= 1"));
        }
        validate_workers(self.workers)
    }

    /// Image dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Tile layout implied by the dimensions and tile size.
    pub fn grid(&self) -> TileforgeResult<TileGrid> {
        TileGrid::new(self.canvas(), self.tile_size)
    }

    /// Workers actually spawned: never more than there are rows.
    pub fn effective_workers(&self) -> usize {
        self.workers.clamp(1, self.height.max(1) as usize)
    }
}

pub(crate) fn validate_workers(workers: usize) -> TileforgeResult<()> {
    if workers == 0 || workers > MAX_WORKERS {
        return Err(TileforgeError::validation(format!(
            "worker count must be in [1, {MAX_WORKERS}] (got {workers})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
