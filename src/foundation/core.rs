use crate::foundation::error::{TileforgeError, TileforgeResult};

/// Absolute 0-based frame index within a run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> TileforgeResult<Self> {
        if den == 0 {
            return Err(TileforgeError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(TileforgeError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Integer frame rate (`den == 1`).
    pub fn integer(num: u32) -> TileforgeResult<Self> {
        Self::new(num, 1)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }
}

/// Output image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Number of pixels covered by the canvas.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Horizontal center, rounded down.
    pub fn center_x(self) -> i32 {
        (self.width / 2) as i32
    }

    /// Vertical center, rounded down.
    pub fn center_y(self) -> i32 {
        (self.height / 2) as i32
    }
}

/// Tile layout over a canvas. Edge tiles are clipped to the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    /// Canvas the grid covers.
    pub canvas: Canvas,
    /// Tile edge length in pixels (>= 1).
    pub tile_size: u32,
    /// Tiles per row.
    pub cols: u32,
    /// Tile rows.
    pub rows: u32,
}

impl TileGrid {
    /// Lay `tile_size` tiles over `canvas`.
    pub fn new(canvas: Canvas, tile_size: u32) -> TileforgeResult<Self> {
        if tile_size == 0 {
            return Err(TileforgeError::validation("tile_size must be >= 1"));
        }
        Ok(Self {
            canvas,
            tile_size,
            cols: canvas.width.div_ceil(tile_size),
            rows: canvas.height.div_ceil(tile_size),
        })
    }

    /// Total number of tiles.
    pub fn tile_count(self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Row-major index of tile `(tx, ty)`.
    pub fn index(self, tx: u32, ty: u32) -> usize {
        ty as usize * self.cols as usize + tx as usize
    }

    /// Tile row containing pixel row `y`.
    pub fn tile_row_of(self, y: u32) -> u32 {
        y / self.tile_size
    }

    /// Top-left pixel of tile `(tx, ty)`.
    pub fn origin(self, tx: u32, ty: u32) -> (u32, u32) {
        (tx * self.tile_size, ty * self.tile_size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
