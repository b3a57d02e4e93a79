use std::collections::VecDeque;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TileforgeError, TileforgeResult};
use crate::render::frame::FrameBuffer;

/// Live display target for generated frames.
///
/// `present` hands a finished frame to the back buffer; `swap_buffers` makes it visible. Frames
/// arrive in strictly increasing [`FrameIndex`] order. Any error is fatal to the run.
pub trait PresentSurface {
    /// Stage `frame` for display.
    fn present(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> TileforgeResult<()>;
    /// Flip the staged frame to the front.
    fn swap_buffers(&mut self) -> TileforgeResult<()>;
}

/// Frames [`InMemorySurface::new`] keeps before dropping the oldest.
pub const DEFAULT_SURFACE_HISTORY: usize = 16;

/// Surface that keeps the most recent shown frames in memory. For tests and debugging.
#[derive(Debug)]
pub struct InMemorySurface {
    back: Option<(FrameIndex, FrameBuffer)>,
    shown: VecDeque<(FrameIndex, FrameBuffer)>,
    history: usize,
    last_shown: Option<FrameIndex>,
    swaps: u64,
}

impl Default for InMemorySurface {
    fn default() -> Self {
        Self::with_history(DEFAULT_SURFACE_HISTORY)
    }
}

impl InMemorySurface {
    /// Create an empty surface keeping [`DEFAULT_SURFACE_HISTORY`] frames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty surface keeping at most `history` shown frames (at least one).
    pub fn with_history(history: usize) -> Self {
        Self {
            back: None,
            shown: VecDeque::new(),
            history: history.max(1),
            last_shown: None,
            swaps: 0,
        }
    }

    /// Retained frames that reached the front buffer, oldest first.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = &(FrameIndex, FrameBuffer)> + '_ {
        self.shown.iter()
    }

    /// The frame currently on the front buffer.
    pub fn front(&self) -> Option<&FrameBuffer> {
        self.shown.back().map(|(_, f)| f)
    }

    /// Index of the frame currently on the front buffer.
    pub fn front_index(&self) -> Option<FrameIndex> {
        self.last_shown
    }

    /// Number of `swap_buffers` calls.
    pub fn swaps(&self) -> u64 {
        self.swaps
    }
}

impl PresentSurface for InMemorySurface {
    fn present(&mut self, idx: FrameIndex, frame: &FrameBuffer) -> TileforgeResult<()> {
        if let Some(last) = self.last_shown
            && idx <= last
        {
            return Err(TileforgeError::validation(format!(
                "surface received out-of-order frame {} after {}",
                idx.0, last.0
            )));
        }
        self.back = Some((idx, frame.clone()));
        Ok(())
    }

    fn swap_buffers(&mut self) -> TileforgeResult<()> {
        self.swaps += 1;
        if let Some(staged) = self.back.take() {
            self.last_shown = Some(staged.0);
            if self.shown.len() == self.history {
                self.shown.pop_front();
            }
            self.shown.push_back(staged);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/surface.rs"]
mod tests;
