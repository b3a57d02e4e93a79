use std::fmt;
use std::str::FromStr;

use crate::foundation::error::TileforgeError;

/// Coordinate-to-seed transform applied to every tile.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// `i*j` product masking.
    #[default]
    Original,
    /// Distance/angle from the image center.
    Polar,
    /// Sine/cosine product.
    Trigonometric,
    /// Bit masking at two scales.
    Fractal,
    /// Three superposed sine waves.
    WaveInterference,
    /// Quadrant folding about the center.
    Symmetry,
    /// Four point sources.
    Wave2,
    /// Spiral angle/distance coupling.
    Vortex,
    /// Six-fold mirrored angle.
    Kaleidoscope,
    /// Multi-frequency sine combination.
    Psychedelic,
    /// Jittered cell partitioning.
    Cellular,
}

impl PatternKind {
    /// Every pattern, in selector order.
    pub const ALL: [PatternKind; 11] = [
        PatternKind::Original,
        PatternKind::Polar,
        PatternKind::Trigonometric,
        PatternKind::Fractal,
        PatternKind::WaveInterference,
        PatternKind::Symmetry,
        PatternKind::Wave2,
        PatternKind::Vortex,
        PatternKind::Kaleidoscope,
        PatternKind::Psychedelic,
        PatternKind::Cellular,
    ];

    /// Selector by numeric index (the order of [`PatternKind::ALL`]).
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Original => "original",
            PatternKind::Polar => "polar",
            PatternKind::Trigonometric => "trigonometric",
            PatternKind::Fractal => "fractal",
            PatternKind::WaveInterference => "wave_interference",
            PatternKind::Symmetry => "symmetry",
            PatternKind::Wave2 => "wave2",
            PatternKind::Vortex => "vortex",
            PatternKind::Kaleidoscope => "kaleidoscope",
            PatternKind::Psychedelic => "psychedelic",
            PatternKind::Cellular => "cellular",
        }
    }
}

/// How a derived seed turns into RGB.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Seed byte lanes with stream jitter.
    #[default]
    DirectRgb,
    /// One base fraction, other channels at fixed phase offsets.
    EnhancedRelational,
    /// Single intensity replicated across channels.
    Monochrome,
    /// Position-driven hue through HSV.
    RainbowHsv,
}

impl ColorMode {
    /// Every color mode.
    pub const ALL: [ColorMode; 4] = [
        ColorMode::DirectRgb,
        ColorMode::EnhancedRelational,
        ColorMode::Monochrome,
        ColorMode::RainbowHsv,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            ColorMode::DirectRgb => "direct_rgb",
            ColorMode::EnhancedRelational => "enhanced_relational",
            ColorMode::Monochrome => "monochrome",
            ColorMode::RainbowHsv => "rainbow_hsv",
        }
    }
}

/// Extra entropy folded into each tile seed.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RandomnessMode {
    /// Coordinates and time only.
    #[default]
    Classic,
    /// One draw from a per-tile stream.
    Enhanced,
    /// One Lorenz integration step per tile, carried across frames.
    ChaoticAttractor,
}

impl RandomnessMode {
    /// Every randomness mode.
    pub const ALL: [RandomnessMode; 3] = [
        RandomnessMode::Classic,
        RandomnessMode::Enhanced,
        RandomnessMode::ChaoticAttractor,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            RandomnessMode::Classic => "classic",
            RandomnessMode::Enhanced => "enhanced",
            RandomnessMode::ChaoticAttractor => "chaotic_attractor",
        }
    }
}

/// Whether tiles are painted solid or as a one-pixel border.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TileFill {
    /// Solid tile.
    #[default]
    Filled,
    /// Border only; interior stays black.
    Outline,
}

impl TileFill {
    /// Every fill mode.
    pub const ALL: [TileFill; 2] = [TileFill::Filled, TileFill::Outline];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            TileFill::Filled => "filled",
            TileFill::Outline => "outline",
        }
    }
}

macro_rules! named_enum_text {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = TileforgeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name() == wanted)
                    .ok_or_else(|| {
                        let known = <$ty>::ALL
                            .iter()
                            .map(|v| v.name())
                            .collect::<Vec<_>>()
                            .join(", ");
                        TileforgeError::validation(format!(
                            concat!("unknown ", $what, " '{}' (expected one of: {})"),
                            s, known
                        ))
                    })
            }
        }
    };
}

named_enum_text!(PatternKind, "pattern");
named_enum_text!(ColorMode, "color mode");
named_enum_text!(RandomnessMode, "randomness mode");
named_enum_text!(TileFill, "tile fill");

#[cfg(test)]
#[path = "../../tests/unit/pattern/kinds.rs"]
mod tests;
