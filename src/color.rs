use crate::{Scalar, utils::clamp};
use bytemuck::{Pod, Zeroable};
use std::{
    fmt,
    ops::{Add, Mul},
    str::FromStr,
};

/// Common interface to all color representations
pub trait Color: Copy {
    /// Blend other color on top of this color
    fn blend_over(self, other: Self) -> Self;

    /// Scale alpha component of the color by `alpha`
    fn with_alpha(self, alpha: Scalar) -> Self;

    /// Convert color to sRGBA list
    fn to_rgba(self) -> [u8; 4];
}

/// sRGB color with straight (not premultiplied) alpha, stored as `[r, g, b, a]` bytes.
///
/// Memory layout matches 8-bit RGBA scanlines, so a slice of colors can be handed
/// to an encoder as is.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Pod, Zeroable)]
pub struct RGBA([u8; 4]);

impl RGBA {
    pub const TRANSPARENT: RGBA = RGBA::new(0, 0, 0, 0);
    pub const WHITE: RGBA = RGBA::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Opaque color from `0xRRGGBB` value
    pub const fn rgb(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
            255,
        )
    }

    pub const fn red(self) -> u8 {
        self.0[0]
    }

    pub const fn green(self) -> u8 {
        self.0[1]
    }

    pub const fn blue(self) -> u8 {
        self.0[2]
    }

    pub const fn alpha(self) -> u8 {
        self.0[3]
    }

    /// Largest per-channel difference between two colors
    pub fn max_channel_diff(self, other: Self) -> u8 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(c0, c1)| c0.abs_diff(*c1))
            .max()
            .unwrap_or(0)
    }
}

impl Color for RGBA {
    fn to_rgba(self) -> [u8; 4] {
        self.0
    }

    fn blend_over(self, other: Self) -> Self {
        LinColor::from(self)
            .blend_over(LinColor::from(other))
            .into()
    }

    fn with_alpha(self, alpha: Scalar) -> Self {
        LinColor::from(self).with_alpha(alpha).into()
    }
}

impl From<LinColor> for RGBA {
    fn from(lin: LinColor) -> Self {
        let [r, g, b, a]: [f32; 4] = lin.into();
        if a <= f32::EPSILON {
            return RGBA::default();
        }
        let a = clamp(a, 0.0, 1.0);
        let channel = |c: f32| (linear_to_srgb(clamp(c / a, 0.0, 1.0)) * 255.0 + 0.5) as u8;
        RGBA::new(channel(r), channel(g), channel(b), (a * 255.0 + 0.5) as u8)
    }
}

impl fmt::Debug for RGBA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGBA({})", self)
    }
}

impl fmt::Display for RGBA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if a != 255 {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}

impl FromStr for RGBA {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        let hex = color
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 || hex.len() == 8)
            .ok_or(ColorError::HexExpected)?;
        let digit = |byte: u8| match byte {
            b'A'..=b'F' => Ok(byte - b'A' + 10),
            b'a'..=b'f' => Ok(byte - b'a' + 10),
            b'0'..=b'9' => Ok(byte - b'0'),
            _ => Err(ColorError::HexExpected),
        };
        let mut rgba = [255u8; 4];
        for (channel, pair) in rgba.iter_mut().zip(hex.as_bytes().chunks(2)) {
            *channel = (digit(pair[0])? << 4) | digit(pair[1])?;
        }
        Ok(RGBA(rgba))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RGBA {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RGBA {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let color = <String as serde::Deserialize>::deserialize(deserializer)?;
        color.parse().map_err(serde::de::Error::custom)
    }
}

/// Alpha premultiplied RGBA color in the linear color space (no gamma correction)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinColor([f32; 4]);

impl LinColor {
    #[inline(always)]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        LinColor([r, g, b, a])
    }

    #[inline(always)]
    pub fn alpha(self) -> f32 {
        self.0[3]
    }
}

impl Color for LinColor {
    #[inline(always)]
    fn to_rgba(self) -> [u8; 4] {
        RGBA::from(self).to_rgba()
    }

    #[inline(always)]
    fn blend_over(self, other: Self) -> Self {
        other + self * (1.0 - other.alpha())
    }

    #[inline(always)]
    fn with_alpha(self, alpha: Scalar) -> Self {
        self * (alpha as f32)
    }
}

impl Add<Self> for LinColor {
    type Output = Self;

    #[inline(always)]
    fn add(self, other: Self) -> Self::Output {
        let Self([r0, g0, b0, a0]) = self;
        let Self([r1, g1, b1, a1]) = other;
        Self([r0 + r1, g0 + g1, b0 + b1, a0 + a1])
    }
}

impl Mul<f32> for LinColor {
    type Output = Self;

    #[inline(always)]
    fn mul(self, scale: f32) -> Self::Output {
        let Self([r, g, b, a]) = self;
        Self([r * scale, g * scale, b * scale, a * scale])
    }
}

impl From<RGBA> for LinColor {
    fn from(color: RGBA) -> Self {
        let a = color.alpha() as f32 / 255.0;
        let r = srgb_to_linear(color.red() as f32 / 255.0) * a;
        let g = srgb_to_linear(color.green() as f32 / 255.0) * a;
        let b = srgb_to_linear(color.blue() as f32 / 255.0) * a;
        LinColor::new(r, g, b, a)
    }
}

impl From<LinColor> for [f32; 4] {
    fn from(color: LinColor) -> Self {
        color.0
    }
}

/// Convert Linear RGB color component into a SRGB color component.
#[inline]
pub fn linear_to_srgb(value: f32) -> f32 {
    if value <= 0.0031308 {
        value * 12.92
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert SRGB color component into a Linear RGB color component.
#[inline]
pub fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    HexExpected,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::HexExpected => {
                write!(f, "Color expected to be #RRGGBB(AA) in hexadecimal format")
            }
        }
    }
}

impl std::error::Error for ColorError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_rgba() {
        let c = RGBA::new(1, 2, 3, 4);
        assert_eq!([1, 2, 3, 4], c.to_rgba());
        assert_eq!(1, c.red());
        assert_eq!(2, c.green());
        assert_eq!(3, c.blue());
        assert_eq!(4, c.alpha());
        assert_eq!(RGBA::rgb(0x57CA3B), RGBA::new(0x57, 0xca, 0x3b, 255));
        let pair = [c, RGBA::WHITE];
        let bytes: &[u8] = bytemuck::cast_slice(&pair);
        assert_eq!(bytes, [1, 2, 3, 4, 255, 255, 255, 255]);
    }

    #[test]
    fn test_rgba_parse() -> Result<(), ColorError> {
        assert_eq!(RGBA::new(1, 2, 3, 4), "#01020304".parse::<RGBA>()?);
        assert_eq!(RGBA::new(170, 187, 204, 255), "#aabbcc".parse::<RGBA>()?);
        assert_eq!(RGBA::new(0x22, 0x22, 0x22, 255), "#222222".parse::<RGBA>()?);
        assert_eq!("#22222".parse::<RGBA>(), Err(ColorError::HexExpected));
        assert_eq!("222222".parse::<RGBA>(), Err(ColorError::HexExpected));
        assert_eq!("#22x222".parse::<RGBA>(), Err(ColorError::HexExpected));
        Ok(())
    }

    #[test]
    fn test_conversion() -> Result<(), ColorError> {
        for hex in ["#ff804010", "#57ca3b", "#222222", "#ffffff", "#ef2a2a"] {
            let c: RGBA = hex.parse()?;
            let l: LinColor = c.into();
            let r: RGBA = l.into();
            assert_eq!(c, r);
        }
        assert_eq!(RGBA::from(LinColor::default()), RGBA::TRANSPARENT);
        Ok(())
    }

    #[test]
    fn test_lin_and_srgb() {
        for i in 0..255 {
            let v = i as f32 / 255.0;
            assert_approx_eq!(v, linear_to_srgb(srgb_to_linear(v)), 1e-4);
            assert_approx_eq!(v, srgb_to_linear(linear_to_srgb(v)), 1e-4);
        }
    }

    #[test]
    fn test_blend_over() {
        let bg = LinColor::from(RGBA::WHITE);
        let fg = LinColor::from(RGBA::rgb(0x222222));

        // opaque source replaces destination
        assert_eq!(RGBA::from(bg.blend_over(fg)), RGBA::rgb(0x222222));
        // fully transparent source keeps destination
        assert_eq!(RGBA::from(bg.blend_over(fg.with_alpha(0.0))), RGBA::WHITE);
        // anything over transparent is the source itself
        let half = fg.with_alpha(0.5);
        assert_eq!(LinColor::default().blend_over(half), half);

        let [red, _, _, alpha]: [f32; 4] = bg.blend_over(half).into();
        let [bg_red, ..]: [f32; 4] = bg.into();
        let [fg_red, ..]: [f32; 4] = fg.into();
        assert_approx_eq!(alpha, 1.0, 1e-6);
        assert_approx_eq!(red, (bg_red + fg_red) * 0.5, 1e-6);
    }

    #[test]
    fn test_display_parse() -> Result<(), ColorError> {
        let c: RGBA = "#01020304".parse()?;
        assert_eq!(c.to_string(), "#01020304");

        let c: RGBA = "#010203".parse()?;
        assert_eq!(c, RGBA::new(1, 2, 3, 255));
        assert_eq!(c.to_string(), "#010203");
        assert_eq!(format!("{:?}", c), "RGBA(#010203)");

        Ok(())
    }
}
