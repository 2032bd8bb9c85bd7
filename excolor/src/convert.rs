//! Conversion of normalized colors between any two [ColorModel]s.

use oklab::Srgb;

use crate::{xyz, ColorModel};

/// Channels at or below this distance from a degenerate value are treated as indeterminate.
pub const INDETERMINACY_THRESHOLD: f64 = 1e-4;

/// Tolerance used by [is_displayable].
pub const DISPLAYABLE_EPSILON: f64 = 1e-5;

/// Convert a normalized color from one model to another.
///
/// The color goes through CIE XYZ. `reference` is a color already in `to`'s normalized space;
/// when given, channels that are undefined for the result (the hue of a gray, the chroma
/// direction of black, ...) are taken from it instead of being left to numerical noise. With
/// `clamp` every output channel is clamped to [0, 1]; without it out of gamut results are kept
/// so callers can detect them.
///
/// If `from == to` the color is returned unchanged, even if out of range.
pub fn transfer_color_model(
    color: [f64; 3],
    from: ColorModel,
    to: ColorModel,
    reference: Option<[f64; 3]>,
    clamp: bool,
) -> [f64; 3] {
    if from == to {
        return color;
    }

    let xyz = xyz::to_xyz(from, from.unnormalize(color));
    let mut result = to.normalize(xyz::from_xyz(to, xyz));

    if let Some(reference) = reference {
        resolve_indeterminacy(to, &mut result, reference);
    }

    if clamp {
        result = result.map(|x| x.clamp(0.0, 1.0));
    }
    result
}

fn is_extreme(x: f64) -> bool {
    x <= INDETERMINACY_THRESHOLD || x >= 1.0 - INDETERMINACY_THRESHOLD
}

/// Replace the channels of `color` that carry no information with the ones of `reference`.
fn resolve_indeterminacy(model: ColorModel, color: &mut [f64; 3], reference: [f64; 3]) {
    let c = *color;
    match model {
        ColorModel::Rgb | ColorModel::Xyz => {}
        ColorModel::Hsv | ColorModel::Okhsv => {
            if c[1] <= INDETERMINACY_THRESHOLD {
                color[0] = reference[0];
            }
            // a full value is still a well defined saturation, only black loses it
            if c[2] <= INDETERMINACY_THRESHOLD {
                color[0] = reference[0];
                color[1] = reference[1];
            }
        }
        ColorModel::Hsl | ColorModel::Okhsl => {
            if c[1] <= INDETERMINACY_THRESHOLD {
                color[0] = reference[0];
            }
            if is_extreme(c[2]) {
                color[0] = reference[0];
                color[1] = reference[1];
            }
        }
        ColorModel::Oklab | ColorModel::Lab => {
            if is_extreme(c[0]) {
                color[1] = reference[1];
                color[2] = reference[2];
            }
        }
        ColorModel::Oklch => {
            if c[1] <= INDETERMINACY_THRESHOLD {
                color[2] = reference[2];
            }
            if is_extreme(c[0]) {
                color[1] = reference[1];
                color[2] = reference[2];
            }
        }
    }
}

/// Returns true if every channel of a sRGB color is inside [-eps, 1 + eps], with
/// `eps = DISPLAYABLE_EPSILON`.
pub fn is_displayable(rgb: [f64; 3]) -> bool {
    Srgb::from(rgb).is_in_gamut(DISPLAYABLE_EPSILON)
}

/// Returns `fallback` in place of a sRGB color that is not displayable.
pub fn sanitize_out_of_gamut(rgb: [f64; 3], fallback: [f64; 3]) -> [f64; 3] {
    if is_displayable(rgb) {
        rgb
    } else {
        fallback
    }
}

/// A normalized color, tagged with its model.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub model: ColorModel,
    pub channels: [f64; 3],
}

impl Color {
    pub fn new(model: ColorModel, channels: [f64; 3]) -> Self {
        Self { model, channels }
    }

    /// Convert to another model, clamping the result.
    pub fn convert(self, to: ColorModel) -> Color {
        let channels = transfer_color_model(self.channels, self.model, to, None, true);
        Color::new(to, channels)
    }

    /// Convert to the model of `reference`, taking indeterminate channels from it.
    pub fn convert_with_reference(self, reference: &Color) -> Color {
        let to = reference.model;
        let channels =
            transfer_color_model(self.channels, self.model, to, Some(reference.channels), true);
        Color::new(to, channels)
    }

    /// Convert to another model without clamping.
    pub fn convert_unclamped(self, to: ColorModel) -> Color {
        let channels = transfer_color_model(self.channels, self.model, to, None, false);
        Color::new(to, channels)
    }

    /// Returns true if the color can be shown on a sRGB display without clipping.
    pub fn is_displayable(self) -> bool {
        is_displayable(self.convert_unclamped(ColorModel::Rgb).channels)
    }

    /// Display values of the channels, see [ColorModel::to_display].
    pub fn to_display(self) -> [f64; 3] {
        self.model.to_display(self.channels)
    }
}
