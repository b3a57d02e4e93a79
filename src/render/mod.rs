//! Parallel frame production.
//!
//! Rows are split into contiguous spans, one scoped worker thread per span, and the frame is only
//! exposed after every worker has joined.

pub(crate) mod assemble;
pub(crate) mod config;
pub(crate) mod frame;
pub(crate) mod partition;
pub(crate) mod pipeline;
pub(crate) mod reference;
pub(crate) mod worker;
