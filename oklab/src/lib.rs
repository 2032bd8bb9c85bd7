#![warn(missing_docs)]

//! Rust implemention of the Oklab color space, as described by [Björn Ottosson in his blog
//! post](https://bottosson.github.io/posts/oklab/), together with the Okhsv and Okhsl color
//! models derived from it. This is a color space designed to be perceptually uniform, meaning
//! that the same amount of distance between two colors is perceived as the same ammount of
//! difference in color.
//!
//! All values are `f64`. Hues of [`OkLch`], [`OkHsv`] and [`OkHsl`] are in turns, in the range
//! [0.0, 1.0).

pub mod ok_color;

/// Represents a color in the sRGB color space.
///
/// This color space is gamma-corrected from a linear RGB color space, so it is not suitable to be
/// interpolated.
///
/// The represented color may not be in the sRGB gamut, being outside of the range [0.0, 1.0].
/// This can happen when converting from other color spaces. Use [Srgb::is_in_gamut] to check.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srgb {
    /// Red component, with gamut in the range [0.0, 1.0].
    pub r: f64,
    /// Green component, with gamut in the range [0.0, 1.0].
    pub g: f64,
    /// Blue component, with gamut in the range [0.0, 1.0].
    pub b: f64,
}
impl Srgb {
    /// Create a new color with the given red, green, blue components.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Convert to linear sRGB color space.
    ///
    /// Shortcut for LinSrgb::from(self).
    pub fn to_linear(self) -> LinSrgb {
        LinSrgb::from(self)
    }

    /// Returns true if every component is inside [-eps, 1.0 + eps].
    pub fn is_in_gamut(self, eps: f64) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|&x| x >= -eps && x <= 1.0 + eps)
    }
}

/// Represents a color in the linear sRGB color space.
///
/// The same color model as the sRGB color space, but the values are linear in respect to light
/// intensity.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinSrgb {
    /// Red component, with gamut in the range [0.0, 1.0].
    pub r: f64,
    /// Green component, with gamut in the range [0.0, 1.0].
    pub g: f64,
    /// Blue component, with gamut in the range [0.0, 1.0].
    pub b: f64,
}
impl LinSrgb {
    /// Create a new color with the given red, green, blue components.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Convert to sRGB color space.
    ///
    /// Shortcut for Srgb::from(self).
    pub fn to_srgb(self) -> Srgb {
        Srgb::from(self)
    }
}

/// Represents a color in the Oklab color space.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Oklab {
    /// Perceived lightness, 0.0 for black and 1.0 for white.
    pub l: f64,
    /// How green/red the color is.
    pub a: f64,
    /// How blue/yellow the color is.
    pub b: f64,
}
impl Oklab {
    /// Create a new color with the given lightness, a and b components.
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

/// Represents a color in the Oklab color space, using polar coordinates.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OkLch {
    /// Perceived lightness, 0.0 for black and 1.0 for white.
    pub l: f64,
    /// Chroma, the distance to the achromatic axis.
    pub c: f64,
    /// Hue, in turns.
    pub h: f64,
}
impl OkLch {
    /// Create a new color with the given lightness, chroma and hue.
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

/// Represents a color in the Okhsv color model. All components are in the range [0.0, 1.0] for
/// colors inside the sRGB gamut.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OkHsv {
    /// Hue, in turns.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Value.
    pub v: f64,
}
impl OkHsv {
    /// Create a new color with the given hue, saturation and value.
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

/// Represents a color in the Okhsl color model. All components are in the range [0.0, 1.0] for
/// colors inside the sRGB gamut.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OkHsl {
    /// Hue, in turns.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Lightness, with the toe remapping applied.
    pub l: f64,
}
impl OkHsl {
    /// Create a new color with the given hue, saturation and lightness.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

macro_rules! impl_array_conversions {
    ($($ty:ident { $x:ident, $y:ident, $z:ident }),* $(,)?) => {
        $(
            impl From<[f64; 3]> for $ty {
                fn from([$x, $y, $z]: [f64; 3]) -> Self {
                    Self { $x, $y, $z }
                }
            }

            impl From<$ty> for [f64; 3] {
                fn from(c: $ty) -> Self {
                    [c.$x, c.$y, c.$z]
                }
            }
        )*
    };
}

impl_array_conversions! {
    Srgb { r, g, b },
    LinSrgb { r, g, b },
    Oklab { l, a, b },
    OkLch { l, c, h },
    OkHsv { h, s, v },
    OkHsl { h, s, l },
}

impl From<LinSrgb> for Srgb {
    fn from(lin_srgb: LinSrgb) -> Self {
        ok_color::linear_srgb_to_srgb(lin_srgb)
    }
}

impl From<Srgb> for LinSrgb {
    fn from(srgb: Srgb) -> Self {
        ok_color::srgb_to_linear_srgb(srgb)
    }
}

impl From<LinSrgb> for Oklab {
    fn from(lin_srgb: LinSrgb) -> Self {
        ok_color::linear_srgb_to_oklab(lin_srgb)
    }
}

impl From<Oklab> for LinSrgb {
    fn from(oklab: Oklab) -> Self {
        ok_color::oklab_to_linear_srgb(oklab)
    }
}

impl From<OkLch> for Oklab {
    fn from(oklch: OkLch) -> Self {
        ok_color::oklch_to_oklab(oklch)
    }
}

impl From<Oklab> for OkLch {
    fn from(oklab: Oklab) -> Self {
        ok_color::oklab_to_oklch(oklab)
    }
}

impl From<OkHsv> for Oklab {
    fn from(okhsv: OkHsv) -> Self {
        ok_color::okhsv_to_oklab(okhsv)
    }
}

impl From<Oklab> for OkHsv {
    fn from(oklab: Oklab) -> Self {
        ok_color::oklab_to_okhsv(oklab)
    }
}

impl From<OkHsl> for Oklab {
    fn from(okhsl: OkHsl) -> Self {
        ok_color::okhsl_to_oklab(okhsl)
    }
}

impl From<Oklab> for OkHsl {
    fn from(oklab: Oklab) -> Self {
        ok_color::oklab_to_okhsl(oklab)
    }
}

impl From<OkHsv> for Srgb {
    fn from(okhsv: OkHsv) -> Self {
        ok_color::okhsv_to_srgb(okhsv)
    }
}

impl From<Srgb> for OkHsv {
    fn from(srgb: Srgb) -> Self {
        ok_color::srgb_to_okhsv(srgb)
    }
}

impl From<OkHsl> for Srgb {
    fn from(okhsl: OkHsl) -> Self {
        ok_color::okhsl_to_srgb(okhsl)
    }
}

impl From<Srgb> for OkHsl {
    fn from(srgb: Srgb) -> Self {
        ok_color::srgb_to_okhsl(srgb)
    }
}

// Conversions that go through Oklab.
macro_rules! impl_via_oklab {
    ($($from:ident => $to:ident),* $(,)?) => {
        $(
            impl From<$from> for $to {
                fn from(c: $from) -> Self {
                    $to::from(Oklab::from(c))
                }
            }
        )*
    };
}

impl_via_oklab! {
    OkHsv => LinSrgb,
    OkHsl => LinSrgb,
    OkLch => LinSrgb,
    LinSrgb => OkLch,
    OkHsv => OkLch,
    OkLch => OkHsv,
    OkHsl => OkLch,
    OkLch => OkHsl,
    OkHsv => OkHsl,
    OkHsl => OkHsv,
}

impl From<Srgb> for Oklab {
    fn from(srgb: Srgb) -> Self {
        Oklab::from(LinSrgb::from(srgb))
    }
}

impl From<Oklab> for Srgb {
    fn from(oklab: Oklab) -> Self {
        Srgb::from(LinSrgb::from(oklab))
    }
}
