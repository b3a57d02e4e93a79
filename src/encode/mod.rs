//! Video encoding.
//!
//! An [`EncodeSession`](crate::EncodeSession) converts finished RGB frames to YUV 4:2:0 and feeds
//! them to an [`EncodeBackend`](crate::EncodeBackend) in submission order.

/// Backend trait, codec parameters and the in-memory backend.
pub(crate) mod backend;
/// `ffmpeg`-based MP4 backend.
pub(crate) mod ffmpeg;
/// Session state machine.
pub(crate) mod session;
/// RGB to planar YUV conversion.
pub(crate) mod yuv;
