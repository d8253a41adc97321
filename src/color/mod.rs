mod mix;
mod space;

pub use mix::{Blend, mix_by_hsl, mix_by_rgb};
use smart_leds::RGB8;
pub use space::{Hsl, Hsv, hsl_to_hsv, hsl_to_rgb, hsv_to_hsl, rgb_to_hsl};

pub type Rgb = RGB8;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
