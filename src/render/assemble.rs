use std::thread::ScopedJoinHandle;

use crate::foundation::error::{TileforgeError, TileforgeResult};
use crate::render::worker::WorkerOutput;

/// Summary of one assembled frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Workers joined for the frame.
    pub workers: usize,
    /// Tile evaluations across all workers. Tiles straddling a span boundary count once per worker.
    pub tiles_evaluated: u64,
    /// Bytes copied from scratch buffers into the frame (0 for direct assembly).
    pub copied_bytes: usize,
}

/// Join every handle before returning, even after a failure, so no worker outlives the frame.
///
/// The first worker error (or panic) wins.
pub(crate) fn join_workers(
    handles: Vec<ScopedJoinHandle<'_, TileforgeResult<WorkerOutput>>>,
) -> TileforgeResult<Vec<WorkerOutput>> {
    let mut outputs = Vec::with_capacity(handles.len());
    let mut first_err = None;
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(Ok(out)) => outputs.push(out),
            Ok(Err(e)) => {
                first_err.get_or_insert(e);
            }
            Err(_) => {
                first_err.get_or_insert(TileforgeError::Other(anyhow::anyhow!(
                    "tileforge-worker-{index} panicked"
                )));
            }
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(outputs),
    }
}

/// Copy scratch output into `frame` at each span's row offset.
pub(crate) fn assemble(
    frame: &mut [u8],
    row_bytes: usize,
    outputs: Vec<WorkerOutput>,
) -> TileforgeResult<AssemblyReport> {
    let mut report = AssemblyReport {
        workers: outputs.len(),
        ..AssemblyReport::default()
    };
    for out in outputs {
        report.tiles_evaluated += out.tiles_evaluated;
        let Some(scratch) = out.scratch else {
            continue;
        };
        let start = out.span.start as usize * row_bytes;
        let end = start + scratch.len();
        let dst = frame.get_mut(start..end).ok_or_else(|| {
            TileforgeError::validation(format!(
                "worker rows {}..{} fall outside the frame",
                out.span.start, out.span.end
            ))
        })?;
        dst.copy_from_slice(&scratch);
        report.copied_bytes += scratch.len();
    }
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/render/assemble.rs"]
mod tests;
