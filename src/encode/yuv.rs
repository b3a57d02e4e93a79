use crate::foundation::core::Canvas;
use crate::foundation::error::{TileforgeError, TileforgeResult};
use crate::render::frame::FrameBuffer;

/// Planar YUV 4:2:0 image (I420 plane order).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Yuv420Frame {
    canvas: Canvas,
    y: Vec<u8>,
    u: Vec<u8>,
    v: Vec<u8>,
}

impl Yuv420Frame {
    /// Zeroed planes for `canvas`. Chroma planes round odd dimensions up.
    pub fn new(canvas: Canvas) -> TileforgeResult<Self> {
        let (cw, ch) = chroma_dims(canvas);
        Ok(Self {
            canvas,
            y: alloc_plane(canvas.pixel_count(), "luma")?,
            u: alloc_plane(cw * ch, "chroma")?,
            v: alloc_plane(cw * ch, "chroma")?,
        })
    }

    /// Luma dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Luma plane, `width * height`.
    pub fn y(&self) -> &[u8] {
        &self.y
    }

    /// Cb plane.
    pub fn u(&self) -> &[u8] {
        &self.u
    }

    /// Cr plane.
    pub fn v(&self) -> &[u8] {
        &self.v
    }

    /// Total bytes across the three planes.
    pub fn byte_len(&self) -> usize {
        self.y.len() + self.u.len() + self.v.len()
    }

    /// Write Y, U, V back to back.
    pub fn write_planes(&self, w: &mut impl std::io::Write) -> std::io::Result<()> {
        w.write_all(&self.y)?;
        w.write_all(&self.u)?;
        w.write_all(&self.v)
    }
}

/// RGB8 to YUV 4:2:0 converter with BT.601 limited-range coefficients.
///
/// Luma spans `[16, 235]`, chroma `[16, 240]`. Chroma is taken from the average of each 2x2 block
/// (edge blocks average what exists).
#[derive(Debug)]
pub struct Yuv420Converter {
    canvas: Canvas,
    out: Yuv420Frame,
}

impl Yuv420Converter {
    /// Converter for frames of exactly `canvas` size.
    pub fn new(canvas: Canvas) -> TileforgeResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(TileforgeError::validation(
                "yuv converter dimensions must be non-zero",
            ));
        }
        Ok(Self {
            canvas,
            out: Yuv420Frame::new(canvas)?,
        })
    }

    /// Convert `frame` into the internal planes and borrow them.
    pub fn convert(&mut self, frame: &FrameBuffer) -> TileforgeResult<&Yuv420Frame> {
        if frame.canvas() != self.canvas {
            return Err(TileforgeError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.canvas.width,
                self.canvas.height
            )));
        }
        let w = self.canvas.width as usize;
        let h = self.canvas.height as usize;
        let src = frame.data();

        for (dst, px) in self.out.y.iter_mut().zip(src.chunks_exact(3)) {
            *dst = luma(px[0], px[1], px[2]);
        }

        let (cw, _) = chroma_dims(self.canvas);
        for (ci, (u, v)) in self.out.u.iter_mut().zip(self.out.v.iter_mut()).enumerate() {
            let cx = (ci % cw) * 2;
            let cy = (ci / cw) * 2;
            let mut sum = [0u32; 3];
            let mut n = 0u32;
            for y in cy..(cy + 2).min(h) {
                for x in cx..(cx + 2).min(w) {
                    let off = (y * w + x) * 3;
                    sum[0] += u32::from(src[off]);
                    sum[1] += u32::from(src[off + 1]);
                    sum[2] += u32::from(src[off + 2]);
                    n += 1;
                }
            }
            let [r, g, b] = sum.map(|s| ((s + n / 2) / n) as u8);
            (*u, *v) = chroma(r, g, b);
        }
        Ok(&self.out)
    }
}

pub(crate) fn luma(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    (((66 * r + 129 * g + 25 * b + 128) >> 8) + 16) as u8
}

pub(crate) fn chroma(r: u8, g: u8, b: u8) -> (u8, u8) {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let u = ((-38 * r - 74 * g + 112 * b + 128) >> 8) + 128;
    let v = ((112 * r - 94 * g - 18 * b + 128) >> 8) + 128;
    (u as u8, v as u8)
}

fn chroma_dims(canvas: Canvas) -> (usize, usize) {
    (
        canvas.width.div_ceil(2) as usize,
        canvas.height.div_ceil(2) as usize,
    )
}

fn alloc_plane(len: usize, what: &str) -> TileforgeResult<Vec<u8>> {
    let mut plane = Vec::new();
    plane
        .try_reserve_exact(len)
        .map_err(|e| TileforgeError::allocation(format!("{what} plane ({len} bytes): {e}")))?;
    plane.resize(len, 0);
    Ok(plane)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/yuv.rs"]
mod tests;
