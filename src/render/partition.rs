use crate::foundation::error::{TileforgeError, TileforgeResult};

/// Half-open pixel row range `[start, end)` owned by one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowSpan {
    /// First row (inclusive).
    pub start: u32,
    /// Past-the-end row.
    pub end: u32,
}

impl RowSpan {
    /// Number of rows.
    pub fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// `true` when the span holds no rows.
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// `true` when row `y` is inside the span.
    pub fn contains(self, y: u32) -> bool {
        self.start <= y && y < self.end
    }
}

/// Split `[0, height)` into `workers` contiguous spans.
///
/// The first `height % workers` spans get one extra row. With more workers than rows the trailing
/// spans are empty.
pub fn partition_rows(height: u32, workers: usize) -> TileforgeResult<Vec<RowSpan>> {
    if workers == 0 {
        return Err(TileforgeError::validation(
            "partition needs at least one worker",
        ));
    }
    let n = u32::try_from(workers)
        .map_err(|_| TileforgeError::validation(format!("too many workers: {workers}")))?;
    let base = height / n;
    let extra = height % n;

    let mut spans = Vec::with_capacity(workers);
    let mut start = 0u32;
    for w in 0..n {
        let len = base + u32::from(w < extra);
        spans.push(RowSpan {
            start,
            end: start + len,
        });
        start += len;
    }
    debug_assert_eq!(start, height);
    Ok(spans)
}

#[cfg(test)]
#[path = "../../tests/unit/render/partition.rs"]
mod tests;
