//! Color keyframes
//!
//! A keyframe is either a bare `[r, g, b]` triple or an object carrying the
//! color with optional per-keyframe `duration` and `fade` frame counts.

use serde::{Deserialize, Deserializer};

use crate::color::Rgb;

/// One entry of a Colors controller's cyclic sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "RawKeyframe")]
pub struct Keyframe {
    pub color: Rgb,
    /// Frames the flat color is held, `None` uses the controller default
    pub duration: Option<u32>,
    /// Frames spent fading into the next keyframe, `None` uses the controller default
    pub fade: Option<u32>,
}

impl Keyframe {
    pub const fn new(color: Rgb, duration: u32, fade: u32) -> Self {
        Self {
            color,
            duration: Some(duration),
            fade: Some(fade),
        }
    }
}

#[derive(Deserialize)]
#[serde(
    untagged,
    expecting = "a color [r, g, b] or an object with 'color', 'duration' and 'fade'"
)]
enum RawKeyframe {
    Bare([u8; 3]),
    Full {
        color: [u8; 3],
        #[serde(default)]
        duration: Option<u32>,
        #[serde(default)]
        fade: Option<u32>,
    },
}

impl From<RawKeyframe> for Keyframe {
    fn from(raw: RawKeyframe) -> Self {
        match raw {
            RawKeyframe::Bare(color) => Self {
                color: triple(color),
                duration: None,
                fade: None,
            },
            RawKeyframe::Full {
                color,
                duration,
                fade,
            } => Self {
                color: triple(color),
                duration,
                fade,
            },
        }
    }
}

const fn triple([r, g, b]: [u8; 3]) -> Rgb {
    Rgb { r, g, b }
}

/// Deserialize an `[r, g, b]` triple
pub(crate) fn rgb<'de, D>(deserializer: D) -> Result<Rgb, D::Error>
where
    D: Deserializer<'de>,
{
    <[u8; 3]>::deserialize(deserializer).map(triple)
}

/// Number of frames `keyframes` expand to, `None` on overflow
pub(crate) fn frame_count(
    keyframes: &[Keyframe],
    default_duration: u32,
    default_fade: u32,
) -> Option<usize> {
    keyframes.iter().try_fold(0usize, |total, keyframe| {
        let duration = keyframe.duration.unwrap_or(default_duration) as usize;
        let fade = keyframe.fade.unwrap_or(default_fade) as usize;
        total.checked_add(duration)?.checked_add(fade)
    })
}
