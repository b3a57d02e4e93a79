use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::encode::backend::EncodeParams;
use crate::foundation::core::Fps;
use crate::foundation::error::{TileforgeError, TileforgeResult};
use crate::pattern::kinds::{ColorMode, PatternKind, RandomnessMode, TileFill};
use crate::render::config::{AssemblyStrategy, PipelineConfig};
use crate::run::driver::{DEFAULT_TIME_STEP, RunSchedule};

/// Codec settings of a run file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EncoderConfig {
    /// Target bitrate in kbit/s.
    pub bitrate_kbps: u32,
    /// x264 preset.
    pub preset: String,
    /// Optional x264 tune.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tune: Option<String>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            bitrate_kbps: 8000,
            preset: "medium".to_owned(),
            tune: None,
        }
    }
}

/// A complete run description, usually loaded from JSON.
///
/// Every field is optional in the file; missing ones take the defaults below. Unknown fields are
/// rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RunConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Coordinate-to-seed transform.
    pub pattern: PatternKind,
    /// Seed-to-RGB mapping.
    pub color_mode: ColorMode,
    /// Extra per-tile entropy.
    pub randomness: RandomnessMode,
    /// Solid or outlined tiles.
    pub fill: TileFill,
    /// Time-driven pattern variants.
    pub animated: bool,
    /// Worker threads per frame.
    pub workers: usize,
    /// Worker output placement.
    pub assembly: AssemblyStrategy,
    /// Base seed.
    pub seed: u64,
    /// Video frame rate.
    pub fps: u32,
    /// Frames per run.
    pub frames: u64,
    /// Clock of the first frame.
    pub start_time: f32,
    /// Clock advance per frame.
    pub time_step: f32,
    /// New seed every frame.
    pub reseed_each_frame: bool,
    /// Codec settings.
    pub encoder: EncoderConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            tile_size: 10,
            pattern: PatternKind::default(),
            color_mode: ColorMode::default(),
            randomness: RandomnessMode::default(),
            fill: TileFill::default(),
            animated: false,
            workers: 4,
            assembly: AssemblyStrategy::default(),
            seed: 42,
            fps: 30,
            frames: 150,
            start_time: 0.0,
            time_step: DEFAULT_TIME_STEP,
            reseed_each_frame: false,
            encoder: EncoderConfig::default(),
        }
    }
}

impl RunConfig {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TileforgeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TileforgeError::serde(format!("parse run config JSON: {e}")))
    }

    /// Parse from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TileforgeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TileforgeError::validation(format!("open run config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON.
    pub fn to_json_pretty(&self) -> TileforgeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TileforgeError::serde(format!("serialize run config: {e}")))
    }

    /// Check everything a run needs before any buffer is allocated.
    pub fn validate(&self) -> TileforgeResult<()> {
        self.pipeline_config().validate()?;
        self.fps()?;
        self.encode_params()?.validate()?;
        if !self.time_step.is_finite() || !self.start_time.is_finite() {
            return Err(TileforgeError::validation(
                "start_time and time_step must be finite",
            ));
        }
        Ok(())
    }

    /// Pipeline part of the config.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            width: self.width,
            height: self.height,
            tile_size: self.tile_size,
            pattern: self.pattern,
            color_mode: self.color_mode,
            randomness: self.randomness,
            fill: self.fill,
            animated: self.animated,
            workers: self.workers,
            assembly: self.assembly,
        }
    }

    /// Seed and clock schedule.
    pub fn schedule(&self) -> RunSchedule {
        RunSchedule {
            seed: self.seed,
            frames: self.frames,
            start_time: self.start_time,
            time_step: self.time_step,
            reseed_each_frame: self.reseed_each_frame,
        }
    }

    /// Frame rate as a validated [`Fps`].
    pub fn fps(&self) -> TileforgeResult<Fps> {
        Fps::integer(self.fps)
    }

    /// Codec parameters for an encode session.
    pub fn encode_params(&self) -> TileforgeResult<EncodeParams> {
        let mut params = EncodeParams::new(self.width, self.height, self.fps()?);
        params.bitrate_kbps = self.encoder.bitrate_kbps;
        params.preset = self.encoder.preset.clone();
        params.tune = self.encoder.tune.clone();
        params.target_frames = Some(self.frames);
        Ok(params)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/run/config.rs"]
mod tests;
