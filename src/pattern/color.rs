use std::f64::consts::{PI, TAU};

use rand::Rng;

use crate::foundation::math::{fract01, mix64, stretch, unit_to_u8};
use crate::pattern::kinds::{ColorMode, PatternKind};

/// Per-channel phase offsets of the DirectRgb time pulse (0, 2π/3, 4π/3).
const PULSE_PHASES: [f64; 3] = [0.0, 2.094, 4.189];

/// Tile-level inputs for color mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorContext {
    /// Animation clock.
    pub time_offset: f32,
    /// Tile origin, normalized to `[0, 1]`.
    pub nx: f64,
    /// Tile origin, normalized to `[0, 1]`.
    pub ny: f64,
    /// Active pattern, used for hue warping.
    pub pattern: PatternKind,
    /// Whether time-driven pulses apply.
    pub animated: bool,
}

/// Map a derived seed to an RGB8 triple.
///
/// `stream` is the tile's own generator; DirectRgb consumes exactly one draw from it.
pub fn seed_to_color<R: Rng + ?Sized>(
    seed: u64,
    mode: ColorMode,
    ctx: &ColorContext,
    stream: &mut R,
) -> [u8; 3] {
    let t = f64::from(ctx.time_offset);
    let [r, g, b] = match mode {
        ColorMode::DirectRgb => {
            let mixed = mix64(seed);
            let jitter = stream.r#gen::<f64>() * 0.1 - 0.05;
            let mut out = [0.0; 3];
            for (c, (lane, phase)) in out.iter_mut().zip([16u32, 8, 0].iter().zip(PULSE_PHASES)) {
                let base = ((mixed >> lane) & 0xFF) as f64 / 255.0;
                let pulse = if ctx.animated {
                    0.7 + 0.3 * (t + phase).sin()
                } else {
                    1.0
                };
                *c = (base + jitter) * pulse;
            }
            out
        }
        ColorMode::EnhancedRelational => {
            let base = (seed % 1000) as f64 / 1000.0;
            let g = fract01(base + 1.0 / 3.0 + 0.05 * (t + base * TAU).sin());
            let b = fract01(base + 2.0 / 3.0 + 0.05 * (t * 1.3 + base * TAU).cos());
            [base, g, b].map(|c| stretch(c, 1.4))
        }
        ColorMode::Monochrome => {
            let base = (mix64(seed) % 1000) as f64 / 1000.0;
            let v = stretch(base + 0.05 * (t + ctx.nx * PI).sin(), 1.5);
            [v, v, v]
        }
        ColorMode::RainbowHsv => {
            let seed_offset = (seed % 360) as f64 / 360.0 * 0.25;
            let hue = fract01(
                (ctx.nx + ctx.ny) * 0.5 + hue_warp(ctx.pattern, ctx.nx, ctx.ny) + t * 0.05
                    + seed_offset,
            );
            let sat = 0.75 + 0.25 * (t + ctx.nx * PI).sin();
            let val = 0.8 + 0.2 * (t * 0.7 + ctx.ny * PI).cos();
            hsv_to_rgb(hue * 360.0, sat, val)
        }
    };
    [unit_to_u8(r), unit_to_u8(g), unit_to_u8(b)]
}

fn hue_warp(pattern: PatternKind, nx: f64, ny: f64) -> f64 {
    let dx = nx - 0.5;
    let dy = ny - 0.5;
    match pattern {
        PatternKind::Original | PatternKind::Cellular => 0.0,
        PatternKind::Polar => dx.hypot(dy),
        PatternKind::Trigonometric => 0.1 * (nx * TAU * 2.0).sin(),
        PatternKind::Fractal => ((nx * 8.0).floor() + (ny * 8.0).floor()) / 16.0,
        PatternKind::WaveInterference => 0.15 * ((nx + ny) * TAU).sin(),
        PatternKind::Symmetry => dx.abs() + dy.abs(),
        PatternKind::Wave2 => 0.1 * ((nx * TAU * 3.0).sin() + (ny * TAU * 3.0).cos()),
        PatternKind::Vortex => dy.atan2(dx) / TAU + dx.hypot(dy),
        PatternKind::Kaleidoscope => fract01(dy.atan2(dx) / TAU * 6.0) * 0.3,
        PatternKind::Psychedelic => 0.25 * (nx * TAU * 4.0).sin() * (ny * TAU * 4.0).cos(),
    }
}

/// Six-sector HSV to RGB. `h` in degrees, `s` and `v` in `[0, 1]`.
pub(crate) fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [r + m, g + m, b + m]
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/color.rs"]
mod tests;
