//! Floating-point color spaces
//!
//! RGB channels are 0-255 integers, HSL and HSV channels are floats in
//! `[0, 1)`. Hue wraps around the unit circle.

use libm::{fabsf, floorf, rintf};

use crate::color::Rgb;

/// Hue, saturation, lightness
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    pub hue: f32,
    pub sat: f32,
    pub light: f32,
}

/// Hue, saturation, value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub hue: f32,
    pub sat: f32,
    pub val: f32,
}

impl Hsl {
    pub const fn new(hue: f32, sat: f32, light: f32) -> Self {
        Self { hue, sat, light }
    }
}

impl Hsv {
    pub const fn new(hue: f32, sat: f32, val: f32) -> Self {
        Self { hue, sat, val }
    }
}

/// Reduce a hue into `[0, 1)`
#[inline]
pub(crate) fn wrap_hue(hue: f32) -> f32 {
    let wrapped = hue - floorf(hue);
    // floorf can leave 1.0 behind for tiny negative inputs
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Scale a unit float to a channel, ties round to even
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f32) -> u8 {
    rintf(value * 255.0).clamp(0.0, 255.0) as u8
}

/// Convert RGB to HSL
pub fn rgb_to_hsl(color: Rgb) -> Hsl {
    let r = f32::from(color.r) / 255.0;
    let g = f32::from(color.g) / 255.0;
    let b = f32::from(color.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let light = (max + min) / 2.0;

    if fabsf(max - min) <= f32::EPSILON {
        return Hsl::new(0.0, 0.0, light);
    }

    let d = max - min;
    let sat = if light > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    #[allow(clippy::float_cmp)]
    let hue = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(wrap_hue(hue / 6.0), sat, light)
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Convert HSL to RGB, rounding each channel to the nearest integer, ties to even
pub fn hsl_to_rgb(color: Hsl) -> Rgb {
    let Hsl { hue, sat, light } = color;

    if sat <= 0.0 {
        let v = channel(light);
        return Rgb { r: v, g: v, b: v };
    }

    let q = if light < 0.5 {
        light * (1.0 + sat)
    } else {
        light + sat - light * sat
    };
    let p = 2.0 * light - q;

    Rgb {
        r: channel(hue_to_channel(p, q, hue + 1.0 / 3.0)),
        g: channel(hue_to_channel(p, q, hue)),
        b: channel(hue_to_channel(p, q, hue - 1.0 / 3.0)),
    }
}

/// Convert HSV to HSL
pub fn hsv_to_hsl(color: Hsv) -> Hsl {
    let Hsv { hue, sat, val } = color;
    let light = val * (1.0 - sat / 2.0);

    let sat = if light <= 0.0 || light >= 1.0 {
        0.0
    } else {
        (val - light) / light.min(1.0 - light)
    };

    Hsl::new(hue, sat, light)
}

/// Convert HSL to HSV
pub fn hsl_to_hsv(color: Hsl) -> Hsv {
    let Hsl { hue, sat, light } = color;
    let val = light + sat * light.min(1.0 - light);

    let sat = if val <= 0.0 {
        0.0
    } else {
        2.0 * (1.0 - light / val)
    };

    Hsv::new(hue, sat, val)
}
