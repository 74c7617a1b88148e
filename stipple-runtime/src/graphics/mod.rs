use std::str::FromStr;

use eyre::WrapErr;
use palette::Srgb;

/// Cell color. Plain 8-bit sRGB, no alpha; the canvas never blends.
pub type Color = Srgb<u8>;

pub const WHITE: Color = Srgb::new(255, 255, 255);
pub const BLACK: Color = Srgb::new(0, 0, 0);

/// Packs a color into the `0x00RRGGBB` layout softbuffer expects
#[inline]
pub fn pack(color: Color) -> u32 {
    (u32::from(color.red) << 16) | (u32::from(color.green) << 8) | u32::from(color.blue)
}

/// Parses `#rrggbb` or `#rgb`
pub fn parse_hex(code: &str) -> eyre::Result<Color> {
    Color::from_str(code).wrap_err_with(|| format!("parsing color {code:?}"))
}
