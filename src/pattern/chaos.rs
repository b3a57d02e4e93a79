//! Lorenz-style attractor used as an extra entropy source.
//!
//! The state advances once per tile in row-major order and carries over between frames, so every
//! step depends on the previous one. [`chaos_seed_table`] runs that sequence on a single thread and
//! hands workers an immutable per-tile seed table.

use crate::foundation::core::TileGrid;
use crate::foundation::error::{TileforgeError, TileforgeResult};
use crate::pattern::kinds::PatternKind;
use crate::pattern::seed::{PatternContext, derive_seed};

const LANE_BITS: u32 = 21;
const LANE_MASK: u64 = (1 << LANE_BITS) - 1;

/// Phase `(x, y, z)` of the attractor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChaoticState {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl ChaoticState {
    /// Value the state starts from and returns to on reset.
    pub const INITIAL: ChaoticState = ChaoticState {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    /// Return to [`ChaoticState::INITIAL`].
    pub fn reset(&mut self) {
        *self = Self::INITIAL;
    }

    /// One explicit-Euler step with step size `params.dt * influence`.
    ///
    /// A step that leaves the finite range resets the state instead.
    pub fn step(&mut self, params: &LorenzParams, influence: f64) {
        let dx = params.sigma * (self.y - self.x);
        let dy = self.x * (params.rho - self.z) - self.y;
        let dz = self.x * self.y - params.beta * self.z;
        let h = params.dt * influence;
        self.x += dx * h;
        self.y += dy * h;
        self.z += dz * h;
        if !(self.x.is_finite() && self.y.is_finite() && self.z.is_finite()) {
            tracing::warn!("chaotic state diverged, resetting");
            self.reset();
        }
    }
}

impl Default for ChaoticState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// How folded attractor bits meet the pattern seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoldOp {
    /// `seed ^ bits`
    Xor,
    /// `seed | bits`
    Or,
}

/// Per-pattern integration constants and folding layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorenzParams {
    /// Prandtl-like coupling.
    pub sigma: f64,
    /// Rayleigh-like forcing.
    pub rho: f64,
    /// Geometric damping.
    pub beta: f64,
    /// Base step size.
    pub dt: f64,
    /// `fmod` modulus for `|x|`, `|y|`, `|z|` before quantization.
    pub scale: [f64; 3],
    /// Left shifts applied to the three quantized lanes.
    pub shifts: [u32; 3],
    /// Combination with the pattern seed.
    pub fold: FoldOp,
}

impl LorenzParams {
    const fn new(
        sigma: f64,
        rho: f64,
        beta: f64,
        dt: f64,
        scale: [f64; 3],
        shifts: [u32; 3],
        fold: FoldOp,
    ) -> Self {
        Self {
            sigma,
            rho,
            beta,
            dt,
            scale,
            shifts,
            fold,
        }
    }
}

/// Integration constants for `pattern`.
pub fn lorenz_params(pattern: PatternKind) -> LorenzParams {
    use FoldOp::{Or, Xor};
    const B: f64 = 8.0 / 3.0;
    match pattern {
        PatternKind::Original => {
            LorenzParams::new(10.0, 28.0, B, 0.010, [20.0, 25.0, 45.0], [0, 21, 42], Or)
        }
        PatternKind::Polar => {
            LorenzParams::new(10.0, 28.0, B, 0.005, [25.0, 25.0, 50.0], [5, 26, 42], Xor)
        }
        PatternKind::Trigonometric => {
            LorenzParams::new(12.0, 30.0, 3.0, 0.008, [22.0, 28.0, 48.0], [0, 20, 40], Xor)
        }
        PatternKind::Fractal => {
            LorenzParams::new(10.0, 35.0, B, 0.010, [24.0, 30.0, 55.0], [8, 29, 42], Or)
        }
        PatternKind::WaveInterference => {
            LorenzParams::new(14.0, 28.0, 2.5, 0.006, [20.0, 26.0, 44.0], [3, 24, 40], Xor)
        }
        PatternKind::Symmetry => {
            LorenzParams::new(10.0, 26.0, B, 0.010, [18.0, 24.0, 40.0], [0, 21, 42], Or)
        }
        PatternKind::Wave2 => {
            LorenzParams::new(16.0, 45.92, 4.0, 0.004, [30.0, 40.0, 70.0], [11, 32, 42], Xor)
        }
        PatternKind::Vortex => {
            LorenzParams::new(10.0, 99.96, B, 0.003, [50.0, 70.0, 140.0], [1, 22, 43], Xor)
        }
        PatternKind::Kaleidoscope => {
            LorenzParams::new(10.0, 28.0, B, 0.012, [20.0, 25.0, 45.0], [6, 27, 42], Xor)
        }
        PatternKind::Psychedelic => {
            LorenzParams::new(13.0, 32.0, 3.0, 0.009, [22.0, 30.0, 50.0], [2, 23, 43], Xor)
        }
        PatternKind::Cellular => {
            LorenzParams::new(10.0, 28.0, 1.5, 0.010, [20.0, 25.0, 60.0], [9, 30, 42], Xor)
        }
    }
}

/// Step-size multiplier growing with distance from the image center, in `[1, 1 + 0.25 * sqrt 2]`.
pub fn chaos_influence(ctx: &PatternContext, x: u32, y: u32) -> f64 {
    let (nx, ny) = ctx.normalized(x, y);
    let cx = nx * 2.0 - 1.0;
    let cy = ny * 2.0 - 1.0;
    1.0 + 0.25 * cx.hypot(cy)
}

/// Fold the current state into `pattern_seed`.
pub fn fold_chaos_seed(pattern_seed: u64, state: &ChaoticState, params: &LorenzParams) -> u64 {
    let lanes = [state.x, state.y, state.z];
    let mut bits = 0u64;
    for ((v, scale), shift) in lanes.iter().zip(params.scale).zip(params.shifts) {
        let unit = (v.abs() % scale) / scale;
        let lane = ((unit * (1u64 << LANE_BITS) as f64) as u64) & LANE_MASK;
        bits ^= lane << shift;
    }
    match params.fold {
        FoldOp::Xor => pattern_seed ^ bits,
        FoldOp::Or => pattern_seed | bits,
    }
}

/// Advance `state` one step for the tile at `(x, y)` and return its chaotic seed.
pub fn advance_chaos_seed(
    state: &mut ChaoticState,
    x: u32,
    y: u32,
    pattern: PatternKind,
    ctx: &PatternContext,
    base_seed: u64,
) -> u64 {
    let params = lorenz_params(pattern);
    state.step(&params, chaos_influence(ctx, x, y));
    fold_chaos_seed(derive_seed(x, y, pattern, ctx, base_seed), state, &params)
}

/// Visit every tile of `grid` in row-major order, advancing `state` once per tile.
///
/// Entry `grid.index(tx, ty)` holds the derived seed for that tile.
#[tracing::instrument(level = "debug", skip(state, ctx))]
pub fn chaos_seed_table(
    state: &mut ChaoticState,
    grid: TileGrid,
    pattern: PatternKind,
    ctx: &PatternContext,
    base_seed: u64,
) -> TileforgeResult<Vec<u64>> {
    let mut table = Vec::new();
    table.try_reserve_exact(grid.tile_count()).map_err(|e| {
        TileforgeError::allocation(format!(
            "chaos seed table for {} tiles: {e}",
            grid.tile_count()
        ))
    })?;
    for ty in 0..grid.rows {
        for tx in 0..grid.cols {
            let (x, y) = grid.origin(tx, ty);
            table.push(advance_chaos_seed(state, x, y, pattern, ctx, base_seed));
        }
    }
    Ok(table)
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/chaos.rs"]
mod tests;
