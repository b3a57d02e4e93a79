//! Coordinate-to-seed transforms.
//!
//! Every transform works on the top-left pixel of a tile. Float intermediates are truncated toward
//! zero into `i32` before they meet the seed; negative values sign-extend into the high bits. The
//! truncation produces the banded look of the output and must stay exactly as written.

use std::f32::consts::PI;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::foundation::core::Canvas;
use crate::foundation::math::Fnv1a64;
use crate::pattern::kinds::PatternKind;

/// Frame-wide inputs shared by every tile evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternContext {
    /// Full image dimensions.
    pub canvas: Canvas,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Animation clock.
    pub time_offset: f32,
    /// Use the time-driven variants of the classic patterns.
    pub animated: bool,
}

impl PatternContext {
    /// Position of `(x, y)` normalized to `[0, 1]` on both axes.
    pub fn normalized(&self, x: u32, y: u32) -> (f64, f64) {
        let w = f64::from(self.canvas.width.max(1));
        let h = f64::from(self.canvas.height.max(1));
        (f64::from(x) / w, f64::from(y) / h)
    }
}

/// Derive the 64-bit tile seed for `pattern` at pixel `(x, y)`.
pub fn derive_seed(
    x: u32,
    y: u32,
    pattern: PatternKind,
    ctx: &PatternContext,
    base_seed: u64,
) -> u64 {
    let i = x as i32;
    let j = y as i32;
    let t = ctx.time_offset;
    let anim = ctx.animated;
    let cx = ctx.canvas.center_x();
    let cy = ctx.canvas.center_y();

    match pattern {
        PatternKind::Original => {
            let ij = i.wrapping_mul(j);
            if anim {
                let skew = (f64::from(i) * f64::from(t).cos() * f64::from(j)) as i32;
                or_int(base_seed, ij & skew)
            } else {
                or_int(base_seed, ij & ij)
            }
        }
        PatternKind::Polar => {
            let dx = (i - cx) as f32;
            let dy = (j - cy) as f32;
            let mut distance = (dx * dx + dy * dy).sqrt();
            let mut angle = dy.atan2(dx);
            if anim {
                distance *= t.sin() * 2.0;
                angle += t;
            }
            or_int(base_seed, (distance * 10.0) as i32 & (angle * 1000.0) as i32)
        }
        PatternKind::Trigonometric => {
            let (ti, tj) = if anim { (t, -t) } else { (0.0, 0.0) };
            let a = ((f64::from(i) * 0.05 + f64::from(ti)) as f32).sin() * 100.0;
            let b = ((f64::from(j) * 0.05 + f64::from(tj)) as f32).cos() * 100.0;
            or_int(base_seed, (a as i32).wrapping_mul(b as i32))
        }
        PatternKind::Fractal => {
            let ij = i.wrapping_mul(j);
            let coarse = if anim {
                let scale = 8.0 + t.sin() * 4.0;
                ((i as f32 / scale) as i32).wrapping_mul((j as f32 / scale) as i32)
            } else {
                (i / 8).wrapping_mul(j / 8)
            };
            or_int(base_seed, (ij & ij) ^ (coarse & coarse))
        }
        PatternKind::WaveInterference => {
            let (t1, t2, t3) = if anim {
                (t, -t * 1.5, t * 0.5)
            } else {
                (0.0, 0.0, 0.0)
            };
            let (fi, fj) = (f64::from(i), f64::from(j));
            let wave1 = ((fi * 0.05 + fj * 0.05 + f64::from(t1)) as f32).sin() * 100.0;
            let wave2 = ((fi * 0.08 - fj * 0.03 + f64::from(t2)) as f32).sin() * 100.0;
            let rx = (i - cx) as f32;
            let ry = (j - cy) as f32;
            let radial = (rx.powi(2) + ry.powi(2)).sqrt();
            let wave3 = ((f64::from(radial) * 0.1 + f64::from(t3)) as f32).sin() * 100.0;
            or_int(base_seed, (wave1 + wave2 + wave3) as i32)
        }
        PatternKind::Symmetry => {
            let half_w = cx.max(1);
            let half_h = cy.max(1);
            let mut sx = i % half_w;
            let mut sy = j % half_h;
            if i >= half_w {
                sx = half_w - sx;
            }
            if j >= half_h {
                sy = half_h - sy;
            }
            if anim {
                sx = (sx as f32 * (1.0 + 0.5 * t.sin())) as i32;
                sy = (sy as f32 * (1.0 + 0.5 * t.cos())) as i32;
            }
            let p = sx.wrapping_mul(sy);
            or_int(base_seed, p & p)
        }
        PatternKind::Wave2 => {
            const SOURCES: [(f32, f32, f32, f32); 4] = [
                (0.25, 0.25, 0.060, 1.0),
                (0.75, 0.25, 0.075, -1.3),
                (0.25, 0.75, 0.090, 0.7),
                (0.75, 0.75, 0.045, -0.9),
            ];
            let w = ctx.canvas.width as f32;
            let h = ctx.canvas.height as f32;
            let mut sum = 0.0f32;
            for (sx, sy, k, speed) in SOURCES {
                let dx = i as f32 - sx * w;
                let dy = j as f32 - sy * h;
                sum += ((dx * dx + dy * dy).sqrt() * k + t * speed).sin();
            }
            xor_int(base_seed, (sum * 100.0) as i32)
        }
        PatternKind::Vortex => {
            let dx = (i - cx) as f32;
            let dy = (j - cy) as f32;
            let distance = (dx * dx + dy * dy).sqrt();
            let spiral = dy.atan2(dx) + distance * 0.05 + t;
            let swirl = ((spiral * 3.0).sin() * 1000.0) as i32;
            xor_int(base_seed, swirl ^ distance as i32)
        }
        PatternKind::Kaleidoscope => {
            const SEGMENTS: f32 = 6.0;
            let dx = (i - cx) as f32;
            let dy = (j - cy) as f32;
            let distance = (dx * dx + dy * dy).sqrt();
            let wedge = 2.0 * PI / SEGMENTS;
            let mut folded = dy.atan2(dx).rem_euclid(wedge);
            if folded > wedge * 0.5 {
                folded = wedge - folded;
            }
            folded += t * 0.2;
            let kx = (distance * folded.cos()) as i32;
            let ky = (distance * folded.sin()) as i32;
            or_int(base_seed, kx.wrapping_mul(ky) ^ distance as i32)
        }
        PatternKind::Psychedelic => {
            let fx = i as f32;
            let fy = j as f32;
            let dx = (i - cx) as f32;
            let dy = (j - cy) as f32;
            let distance = (dx * dx + dy * dy).sqrt();
            let s = (fx * 0.03 + t).sin()
                + (fy * 0.05 - t * 1.3).sin()
                + ((fx + fy) * 0.02 + t * 0.7).sin()
                + (distance * 0.04 - t * 0.5).sin();
            let base = or_int(base_seed, i.wrapping_mul(j));
            xor_int(base, (s * 250.0) as i32)
        }
        PatternKind::Cellular => cellular_seed(i, j, ctx, base_seed),
    }
}

/// Fold one draw from the tile's own stream into `pattern_seed`.
///
/// The stream is seeded from `(base_seed, tile_x, tile_y)`, so the result does not depend on which
/// worker visits the tile or in what order.
pub fn enhanced_seed(pattern_seed: u64, base_seed: u64, tile_x: u32, tile_y: u32) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(base_seed);
    h.write_u32(tile_x);
    h.write_u32(tile_y);
    let mut stream = ChaCha8Rng::seed_from_u64(h.finish());
    pattern_seed ^ stream.next_u64()
}

fn cellular_seed(i: i32, j: i32, ctx: &PatternContext, base_seed: u64) -> u64 {
    let breathing = 1.0 + 0.25 * ctx.time_offset.sin();
    let cell = ctx.tile_size.saturating_mul(4).max(16) as f32 * breathing;
    let fx = i as f32;
    let fy = j as f32;
    let home_x = (fx / cell).floor() as i32;
    let home_y = (fy / cell).floor() as i32;

    let mut best_d2 = f32::MAX;
    let mut best_id = 0u64;
    for oy in -1..=1 {
        for ox in -1..=1 {
            let nx = home_x + ox;
            let ny = home_y + oy;
            let id = cell_hash(nx, ny);
            let jitter_x = (id & 0xFFFF) as f32 / 65536.0;
            let jitter_y = ((id >> 16) & 0xFFFF) as f32 / 65536.0;
            let px = (nx as f32 + jitter_x) * cell;
            let py = (ny as f32 + jitter_y) * cell;
            let d2 = (fx - px) * (fx - px) + (fy - py) * (fy - py);
            if d2 < best_d2 {
                best_d2 = d2;
                best_id = id;
            }
        }
    }

    let band = (best_d2.sqrt() as i32) >> 2;
    xor_int(base_seed ^ (best_id >> 16), band)
}

fn cell_hash(cx: i32, cy: i32) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u32(cx as u32);
    h.write_u32(cy as u32);
    h.finish()
}

fn or_int(seed: u64, v: i32) -> u64 {
    seed | (v as i64 as u64)
}

fn xor_int(seed: u64, v: i32) -> u64 {
    seed ^ (v as i64 as u64)
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/seed.rs"]
mod tests;
