use std::str::FromStr;

use crate::transform::TransformState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    FlipHorizontal,
    FlipVertical,
    Rotate45,
    Rotate90,
    Mirror,
    SkewDiamond,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::FlipHorizontal,
        Preset::FlipVertical,
        Preset::Rotate45,
        Preset::Rotate90,
        Preset::Mirror,
        Preset::SkewDiamond,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Preset::FlipHorizontal => "FLIP_HORIZONTAL",
            Preset::FlipVertical => "FLIP_VERTICAL",
            Preset::Rotate45 => "ROTATE_45",
            Preset::Rotate90 => "ROTATE_90",
            Preset::Mirror => "MIRROR",
            Preset::SkewDiamond => "SKEW_DIAMOND",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Preset::FlipHorizontal => "Flip H",
            Preset::FlipVertical => "Flip V",
            Preset::Rotate45 => "Rotate 45°",
            Preset::Rotate90 => "Rotate 90°",
            Preset::Mirror => "Mirror",
            Preset::SkewDiamond => "Diamond",
        }
    }

    /// `[a, b, c, d, x, y]`
    pub const fn values(self) -> [f64; 6] {
        match self {
            Preset::FlipHorizontal => [-1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            Preset::FlipVertical => [1.0, 0.0, 0.0, -1.0, 0.0, 0.0],
            Preset::Rotate45 => [0.707, 0.707, -0.707, 0.707, 0.0, 0.0],
            Preset::Rotate90 => [0.0, 1.0, -1.0, 0.0, 0.0, 0.0],
            Preset::Mirror => [-1.0, 0.0, 0.0, -1.0, 0.0, 0.0],
            Preset::SkewDiamond => [1.0, 0.5, 0.5, 1.0, 0.0, 0.0],
        }
    }

    /// The full state for this preset, with `rotation` cleared.
    pub const fn state(self) -> TransformState {
        TransformState::from_values(self.values())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown preset: {0}")]
pub struct UnknownPresetError(pub String);

impl FromStr for Preset {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPresetError(s.to_string()))
    }
}
