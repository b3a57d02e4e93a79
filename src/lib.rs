//! tileforge generates procedural tile art in parallel.
//!
//! Every frame is a grid of square tiles. Each tile's color is a pure function of its position, a
//! base seed and an animation clock, so frames are reproducible and rows can be rendered by
//! independent workers:
//!
//! - Configure a [`FramePipeline`] from a [`PipelineConfig`]
//! - Call [`FramePipeline::generate_frame`] for each `(seed, time)` pair
//! - Hand frames to a [`PresentSurface`] or an [`EncodeSession`], or let [`present_frames`] and
//!   [`render_to_session`] drive a whole [`RunSchedule`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod encode;
mod foundation;
mod pattern;
mod present;
mod render;
mod run;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, TileGrid};
pub use crate::foundation::error::{TileforgeError, TileforgeResult};

pub use crate::pattern::chaos::{
    ChaoticState, FoldOp, LorenzParams, advance_chaos_seed, chaos_influence, chaos_seed_table,
    fold_chaos_seed, lorenz_params,
};
pub use crate::pattern::color::{ColorContext, seed_to_color};
pub use crate::pattern::kinds::{ColorMode, PatternKind, RandomnessMode, TileFill};
pub use crate::pattern::seed::{PatternContext, derive_seed, enhanced_seed};

pub use crate::render::assemble::AssemblyReport;
pub use crate::render::config::{AssemblyStrategy, MAX_WORKERS, PipelineConfig};
pub use crate::render::frame::FrameBuffer;
pub use crate::render::partition::{RowSpan, partition_rows};
pub use crate::render::pipeline::{FramePipeline, configure};
pub use crate::render::reference::render_reference;

pub use crate::present::png::{PngSurface, save_png};
pub use crate::present::surface::{DEFAULT_SURFACE_HISTORY, InMemorySurface, PresentSurface};

pub use crate::encode::backend::{
    ContainerStats, EncodeBackend, EncodeParams, MemoryBackend, Packet,
};
pub use crate::encode::ffmpeg::{FfmpegBackend, FfmpegOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::session::{
    EncodeSession, EncodeSummary, EncodeTarget, SessionState, open_encode_session,
};
pub use crate::encode::yuv::{Yuv420Converter, Yuv420Frame};

pub use crate::run::config::{EncoderConfig, RunConfig};
pub use crate::run::driver::{
    DEFAULT_TIME_STEP, RenderStats, RunSchedule, present_frames, render_to_session, seed_with_key,
};
