//! Live presentation targets.

pub(crate) mod png;
pub(crate) mod surface;
