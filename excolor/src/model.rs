//! The closed set of color models and their static, per-model data.
//!
//! Colors are exchanged as normalized triples, each channel in [0.0, 1.0]. The "native" units of
//! a model are the ones its conversion formulas work in (hue in degrees, Oklab a/b in [-1, 1],
//! ...), and [ColorModel::normalize]/[ColorModel::unnormalize] map between the two.

use std::{fmt, str::FromStr};

/// A color model. The declaration order is the stable index of the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorModel {
    Rgb,
    Hsv,
    Hsl,
    Oklab,
    Xyz,
    Lab,
    Oklch,
    Okhsv,
    Okhsl,
}

/// Error returned when parsing an unknown color model name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownColorModel(pub String);

impl fmt::Display for UnknownColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color model '{}'", self.0)
    }
}

impl std::error::Error for UnknownColorModel {}

impl ColorModel {
    /// Every model, in index order.
    pub const ALL: [ColorModel; 9] = [
        ColorModel::Rgb,
        ColorModel::Hsv,
        ColorModel::Hsl,
        ColorModel::Oklab,
        ColorModel::Xyz,
        ColorModel::Lab,
        ColorModel::Oklch,
        ColorModel::Okhsv,
        ColorModel::Okhsl,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ColorModel> {
        Self::ALL.get(index).copied()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ColorModel::Rgb => "RGB",
            ColorModel::Hsv => "HSV",
            ColorModel::Hsl => "HSL",
            ColorModel::Oklab => "OkLab",
            ColorModel::Xyz => "XYZ",
            ColorModel::Lab => "Lab",
            ColorModel::Oklch => "OkLch",
            ColorModel::Okhsv => "OkHsv",
            ColorModel::Okhsl => "OkHsl",
        }
    }

    pub fn channel_names(self) -> [&'static str; 3] {
        match self {
            ColorModel::Rgb => ["R", "G", "B"],
            ColorModel::Hsv | ColorModel::Okhsv => ["H", "S", "V"],
            ColorModel::Hsl | ColorModel::Okhsl => ["H", "S", "L"],
            ColorModel::Oklab | ColorModel::Lab => ["L", "A", "B"],
            ColorModel::Xyz => ["X", "Y", "Z"],
            ColorModel::Oklch => ["L", "C", "H"],
        }
    }

    /// Minimum and maximum of each channel, in native units.
    ///
    /// Lab is stored scaled by 1/100, so its limits match Oklab's.
    pub fn limits(self) -> ([f64; 3], [f64; 3]) {
        match self {
            ColorModel::Rgb | ColorModel::Xyz => ([0.0; 3], [1.0; 3]),
            ColorModel::Hsv | ColorModel::Hsl | ColorModel::Okhsv | ColorModel::Okhsl => {
                ([0.0; 3], [360.0, 1.0, 1.0])
            }
            ColorModel::Oklab | ColorModel::Lab => ([0.0, -1.0, -1.0], [1.0; 3]),
            ColorModel::Oklch => ([0.0; 3], [1.0, 1.0, 360.0]),
        }
    }

    /// Map a native triple to [0, 1]³. Values outside of [ColorModel::limits] map outside of
    /// the unit cube.
    pub fn normalize(self, native: [f64; 3]) -> [f64; 3] {
        let (min, max) = self.limits();
        std::array::from_fn(|i| (native[i] - min[i]) / (max[i] - min[i]))
    }

    /// Inverse of [ColorModel::normalize].
    pub fn unnormalize(self, normalized: [f64; 3]) -> [f64; 3] {
        let (min, max) = self.limits();
        std::array::from_fn(|i| normalized[i] * (max[i] - min[i]) + min[i])
    }

    /// Clamp a native triple into [ColorModel::limits].
    pub fn clamp_native(self, native: [f64; 3]) -> [f64; 3] {
        let (min, max) = self.limits();
        std::array::from_fn(|i| native[i].clamp(min[i], max[i]))
    }

    /// Models whose unit cube is not contained in the sRGB gamut. These are the ones that need
    /// a gamut clip table.
    pub fn is_not_srgb_based(self) -> bool {
        matches!(
            self,
            ColorModel::Oklab | ColorModel::Xyz | ColorModel::Lab | ColorModel::Oklch
        )
    }

    /// Models with a hue channel that can be shown at maximum colorfulness.
    pub fn is_colorfulable(self) -> bool {
        matches!(
            self,
            ColorModel::Hsv | ColorModel::Hsl | ColorModel::Okhsv | ColorModel::Okhsl
        )
    }

    /// The channel that holds a hue angle, if any.
    pub fn hue_channel(self) -> Option<usize> {
        match self {
            ColorModel::Hsv | ColorModel::Hsl | ColorModel::Okhsv | ColorModel::Okhsl => Some(0),
            ColorModel::Oklch => Some(2),
            ColorModel::Rgb | ColorModel::Oklab | ColorModel::Xyz | ColorModel::Lab => None,
        }
    }

    /// Position of this model in a gamut clip table, for models that are not sRGB based.
    pub fn gamut_table_slot(self) -> Option<usize> {
        self.is_not_srgb_based()
            .then(|| self.index() - ColorModel::Oklab.index())
    }

    /// The two channels that are edited on a plane when `primary` is locked, in ascending
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if `primary` is not 0, 1 or 2.
    pub fn secondary_channels(primary: usize) -> [usize; 2] {
        match primary {
            0 => [1, 2],
            1 => [0, 2],
            2 => [0, 1],
            _ => panic!("channel index out of range: {}", primary),
        }
    }

    /// Factor from native units to the values shown to users. Hue stays in degrees, everything
    /// else is shown as a percentage of its native unit.
    pub fn display_scale(self) -> [f64; 3] {
        let mut scale = [100.0; 3];
        if let Some(hue) = self.hue_channel() {
            scale[hue] = 1.0;
        }
        scale
    }

    pub fn display_limits(self) -> ([f64; 3], [f64; 3]) {
        let (min, max) = self.limits();
        let scale = self.display_scale();
        (
            std::array::from_fn(|i| min[i] * scale[i]),
            std::array::from_fn(|i| max[i] * scale[i]),
        )
    }

    /// Convert a normalized triple to display values.
    pub fn to_display(self, normalized: [f64; 3]) -> [f64; 3] {
        let native = self.unnormalize(normalized);
        let scale = self.display_scale();
        std::array::from_fn(|i| native[i] * scale[i])
    }

    /// Inverse of [ColorModel::to_display].
    pub fn from_display(self, display: [f64; 3]) -> [f64; 3] {
        let scale = self.display_scale();
        self.normalize(std::array::from_fn(|i| display[i] / scale[i]))
    }

    /// Replace the non-hue channels of a normalized color so it shows its hue at maximum
    /// colorfulness. Only applies to colorful-able models with the hue channel locked; anything
    /// else is returned unchanged.
    pub fn make_colorful(self, normalized: [f64; 3], channel: usize) -> [f64; 3] {
        if channel != 0 {
            return normalized;
        }
        let h = normalized[0];
        match self {
            ColorModel::Hsv | ColorModel::Okhsv => [h, 1.0, 1.0],
            ColorModel::Hsl => [h, 1.0, 0.5],
            ColorModel::Okhsl => {
                let (b_, a_) = (std::f64::consts::TAU * h).sin_cos();
                let cusp = oklab::ok_color::find_cusp(a_, b_);
                [h, 1.0, oklab::ok_color::toe(cusp.l)]
            }
            _ => normalized,
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ColorModel {
    type Err = UnknownColorModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownColorModel(s.to_owned()))
    }
}
