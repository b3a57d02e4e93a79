use crate::foundation::core::Canvas;
use crate::foundation::error::{TileforgeError, TileforgeResult};

/// One rendered frame as tightly packed, row-major RGB8.
///
/// Dimensions are fixed at construction; the pipeline rewrites the same buffer every frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Bytes per pixel.
    pub const CHANNELS: usize = 3;

    /// Allocate an all-black frame.
    pub fn black(width: u32, height: u32) -> TileforgeResult<Self> {
        if width == 0 || height == 0 {
            return Err(TileforgeError::validation(
                "frame width/height must be non-zero",
            ));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(Self::CHANNELS))
            .ok_or_else(|| {
                TileforgeError::allocation(format!("frame {width}x{height} overflows usize"))
            })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            TileforgeError::allocation(format!("frame buffer {width}x{height} ({len} bytes): {e}"))
        })?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Bytes in one pixel row.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * Self::CHANNELS
    }

    /// Raw RGB8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the frame, returning its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// RGB at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = y as usize * self.row_bytes() + x as usize * Self::CHANNELS;
        Some([self.data[off], self.data[off + 1], self.data[off + 2]])
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
