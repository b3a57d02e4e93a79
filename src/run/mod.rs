//! Multi-frame runs and their configuration files.

pub(crate) mod config;
pub(crate) mod driver;
