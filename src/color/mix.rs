//! Color interpolation
//!
//! Both mixers return the endpoints unchanged for `t <= 0` and `t >= 1`, so
//! keyframe colors never pick up rounding noise.

use libm::{fabsf, rintf};
use serde::Deserialize;

use crate::color::{Hsl, Rgb, hsl_to_rgb, rgb_to_hsl, space::wrap_hue};

/// Interpolation strategy used for fades and trails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blend {
    /// Linear per-channel RGB interpolation
    #[default]
    Rgb,
    /// Hue-aware HSL interpolation along the shorter arc
    Hsl,
}

impl Blend {
    /// Mix `a` towards `b` by `t`
    pub fn mix(self, a: Rgb, b: Rgb, t: f32) -> Rgb {
        match self {
            Self::Rgb => mix_by_rgb(a, b, t),
            Self::Hsl => mix_by_hsl(a, b, t),
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp8(a: u8, b: u8, t: f32) -> u8 {
    rintf(lerp(f32::from(a), f32::from(b), t)).clamp(0.0, 255.0) as u8
}

/// Interpolate hue along the shorter arc of the hue circle
fn lerp_hue(a: f32, b: f32, t: f32) -> f32 {
    let (a, b) = if fabsf(a - b) > 0.5 {
        if a < b { (a + 1.0, b) } else { (a, b + 1.0) }
    } else {
        (a, b)
    };

    wrap_hue(lerp(a, b, t))
}

/// Linear per-channel interpolation in RGB space
///
/// Halfway values round to the even integer.
pub fn mix_by_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }

    Rgb {
        r: lerp8(a.r, b.r, t),
        g: lerp8(a.g, b.g, t),
        b: lerp8(a.b, b.b, t),
    }
}

/// Hue-aware interpolation in HSL space
pub fn mix_by_hsl(a: Rgb, b: Rgb, t: f32) -> Rgb {
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }

    let from = rgb_to_hsl(a);
    let to = rgb_to_hsl(b);

    hsl_to_rgb(Hsl {
        hue: lerp_hue(from.hue, to.hue, t),
        sat: lerp(from.sat, to.sat, t),
        light: lerp(from.light, to.light, t),
    })
}
