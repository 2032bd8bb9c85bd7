//! Per-model conversion between native units and CIE XYZ (D65).
//!
//! XYZ is the hub every model converts through: each model has one function into XYZ and one
//! out of it, selected by [to_xyz] and [from_xyz].

use oklab::{ok_color, LinSrgb, OkHsl, OkHsv, Srgb};

use crate::ColorModel;

/// CIE L*a*b* epsilon, `216 / 24389`.
pub const LAB_CIE_EPSILON: f64 = 216.0 / 24389.0;
/// CIE L*a*b* kappa, `24389 / 27`.
pub const LAB_CIE_KAPPA: f64 = 24389.0 / 27.0;
/// Reference white of the D65 illuminant, CIE 1931 2° observer.
pub const XYZ_D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

const LIN_SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175],
    [0.019_333_9, 0.119_192, 0.950_304_1],
];
const XYZ_TO_LIN_SRGB: [[f64; 3]; 3] = [
    [3.240_454_2, -1.537_138_5, -0.498_531_4],
    [-0.969_266, 1.876_010_8, 0.041_556],
    [0.055_643_4, -0.204_025_9, 1.057_225_2],
];

// https://bottosson.github.io/posts/oklab/#converting-from-xyz-to-oklab
const XYZ_TO_LMS: [[f64; 3]; 3] = [
    [0.818_933_010_1, 0.361_866_742_4, -0.128_859_713_7],
    [0.032_984_543_6, 0.929_311_871_5, 0.036_145_638_7],
    [0.048_200_301_8, 0.264_366_269_1, 0.633_851_707_0],
];
const LMS_TO_OKLAB: [[f64; 3]; 3] = [
    [0.210_454_255_3, 0.793_617_785_0, -0.004_072_046_8],
    [1.977_998_495_1, -2.428_592_205_0, 0.450_593_709_9],
    [0.025_904_037_1, 0.782_771_766_2, -0.808_675_766_0],
];
// inverses of the two matrices above, to full precision so that colors near the black point
// survive the cube root
const OKLAB_TO_LMS: [[f64; 3]; 3] = [
    [0.999_999_998_450_519_8, 0.396_337_792_173_767_86, 0.215_803_758_060_758_8],
    [1.000_000_008_881_760_9, -0.105_561_342_323_656_35, -0.063_854_174_771_705_91],
    [1.000_000_054_672_410_8, -0.089_484_182_094_965_75, -1.291_485_537_864_091_7],
];
const LMS_TO_XYZ: [[f64; 3]; 3] = [
    [1.227_013_851_103_521_1, -0.557_799_980_651_822_2, 0.281_256_148_966_467_83],
    [-0.040_580_178_423_280_59, 1.112_256_869_616_83, -0.071_676_678_665_601_2],
    [-0.076_381_284_505_706_89, -0.421_481_978_418_012_7, 1.586_163_220_440_794_7],
];

trait Matrix {
    fn dot(&self, v: [f64; 3]) -> [f64; 3];
}

impl Matrix for [[f64; 3]; 3] {
    fn dot(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
        self.map(|row| row[0] * x + row[1] * y + row[2] * z)
    }
}

/// Convert a color in `model` native units to XYZ.
pub fn to_xyz(model: ColorModel, native: [f64; 3]) -> [f64; 3] {
    match model {
        ColorModel::Rgb => srgb_to_xyz(native),
        ColorModel::Hsv => srgb_to_xyz(hsv_to_srgb(native)),
        ColorModel::Hsl => srgb_to_xyz(hsl_to_srgb(native)),
        ColorModel::Oklab => oklab_to_xyz(native),
        ColorModel::Xyz => native,
        ColorModel::Lab => lab_to_xyz(native),
        ColorModel::Oklch => oklch_to_xyz(native),
        ColorModel::Okhsv => srgb_to_xyz(okhsv_to_srgb(native)),
        ColorModel::Okhsl => srgb_to_xyz(okhsl_to_srgb(native)),
    }
}

/// Convert a XYZ color to `model` native units.
pub fn from_xyz(model: ColorModel, xyz: [f64; 3]) -> [f64; 3] {
    match model {
        ColorModel::Rgb => xyz_to_srgb(xyz),
        ColorModel::Hsv => srgb_to_hsv(xyz_to_srgb(xyz)),
        ColorModel::Hsl => srgb_to_hsl(xyz_to_srgb(xyz)),
        ColorModel::Oklab => xyz_to_oklab(xyz),
        ColorModel::Xyz => xyz,
        ColorModel::Lab => xyz_to_lab(xyz),
        ColorModel::Oklch => xyz_to_oklch(xyz),
        ColorModel::Okhsv => srgb_to_okhsv(xyz_to_srgb(xyz)),
        ColorModel::Okhsl => srgb_to_okhsl(xyz_to_srgb(xyz)),
    }
}

pub fn srgb_to_xyz(rgb: [f64; 3]) -> [f64; 3] {
    let linear = ok_color::srgb_to_linear_srgb(Srgb::from(rgb));
    LIN_SRGB_TO_XYZ.dot(linear.into())
}

pub fn xyz_to_srgb(xyz: [f64; 3]) -> [f64; 3] {
    let linear = LinSrgb::from(XYZ_TO_LIN_SRGB.dot(xyz));
    ok_color::linear_srgb_to_srgb(linear).into()
}

/// Hue in degrees, whiteness and blackness of a sRGB color.
pub fn srgb_to_hwb([r, g, b]: [f64; 3]) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let hue = if chroma == 0.0 {
        0.0
    } else if r == max {
        60.0 * (g - b) / chroma
    } else if g == max {
        60.0 * (2.0 + (b - r) / chroma)
    } else {
        60.0 * (4.0 + (r - g) / chroma)
    };
    let hue = if hue < 0.0 { hue + 360.0 } else { hue };

    [hue, min, 1.0 - max]
}

pub fn srgb_to_hsv(rgb: [f64; 3]) -> [f64; 3] {
    let [h, w, b] = srgb_to_hwb(rgb);
    let v = 1.0 - b;
    let s = if v == 0.0 { 0.0 } else { 1.0 - w / v };
    [h, s, v]
}

pub fn hsv_to_srgb([h, s, v]: [f64; 3]) -> [f64; 3] {
    let w = (1.0 - s) * v;

    let h = h.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let mut f = h - sector;
    if sector as u32 % 2 == 1 {
        f = 1.0 - f;
    }
    let n = w + f * (v - w);

    match sector as u32 {
        1 => [n, v, w],
        2 => [w, v, n],
        3 => [w, n, v],
        4 => [n, w, v],
        5 => [v, w, n],
        _ => [v, n, w],
    }
}

pub fn srgb_to_hsl(rgb: [f64; 3]) -> [f64; 3] {
    let [h, s, v] = srgb_to_hsv(rgb);
    let l = v * (1.0 - s / 2.0);
    let s = if l == 0.0 || l == 1.0 {
        0.0
    } else {
        (v - l) / l.min(1.0 - l)
    };
    [h, s, l]
}

pub fn hsl_to_srgb([h, s, l]: [f64; 3]) -> [f64; 3] {
    let v = l + s * l.min(1.0 - l);
    let s = if v == 0.0 { 0.0 } else { 2.0 * (1.0 - l / v) };
    hsv_to_srgb([h, s, v])
}

/// Lab is taken with every channel scaled by 1/100.
pub fn lab_to_xyz(lab: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = lab.map(|x| x * 100.0);

    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;

    let finv = |f: f64| {
        let f3 = f * f * f;
        if f3 > LAB_CIE_EPSILON {
            f3
        } else {
            (116.0 * f - 16.0) / LAB_CIE_KAPPA
        }
    };

    let xr = finv(fx);
    let yr = if l > LAB_CIE_EPSILON * LAB_CIE_KAPPA {
        fy * fy * fy
    } else {
        l / LAB_CIE_KAPPA
    };
    let zr = finv(fz);

    [
        xr * XYZ_D65_WHITE[0],
        yr * XYZ_D65_WHITE[1],
        zr * XYZ_D65_WHITE[2],
    ]
}

pub fn xyz_to_lab(xyz: [f64; 3]) -> [f64; 3] {
    let f = |i: usize| {
        let r = xyz[i] / XYZ_D65_WHITE[i];
        if r > LAB_CIE_EPSILON {
            r.cbrt()
        } else {
            (LAB_CIE_KAPPA * r + 16.0) / 116.0
        }
    };
    let (fx, fy, fz) = (f(0), f(1), f(2));

    [1.16 * fy - 0.16, 5.0 * (fx - fy), 2.0 * (fy - fz)]
}

pub fn xyz_to_oklab(xyz: [f64; 3]) -> [f64; 3] {
    let lms = XYZ_TO_LMS.dot(xyz).map(f64::cbrt);
    LMS_TO_OKLAB.dot(lms)
}

pub fn oklab_to_xyz(lab: [f64; 3]) -> [f64; 3] {
    let lms = OKLAB_TO_LMS.dot(lab).map(|x| x * x * x);
    LMS_TO_XYZ.dot(lms)
}

/// Oklch with hue in degrees.
pub fn oklch_to_xyz([l, c, h]: [f64; 3]) -> [f64; 3] {
    let (sin, cos) = h.to_radians().sin_cos();
    oklab_to_xyz([l, c * cos, c * sin])
}

pub fn xyz_to_oklch(xyz: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = xyz_to_oklab(xyz);
    let chroma = a.hypot(b);
    let hue = b.atan2(a).to_degrees();
    let hue = if hue < 0.0 { hue + 360.0 } else { hue };
    [l, chroma, hue]
}

// The oklab crate works with hues in turns.

pub fn okhsv_to_srgb([h, s, v]: [f64; 3]) -> [f64; 3] {
    Srgb::from(OkHsv::new(h / 360.0, s, v)).into()
}

pub fn srgb_to_okhsv(rgb: [f64; 3]) -> [f64; 3] {
    let hsv = OkHsv::from(Srgb::from(rgb));
    [hsv.h * 360.0, hsv.s, hsv.v]
}

pub fn okhsl_to_srgb([h, s, l]: [f64; 3]) -> [f64; 3] {
    Srgb::from(OkHsl::new(h / 360.0, s, l)).into()
}

pub fn srgb_to_okhsl(rgb: [f64; 3]) -> [f64; 3] {
    let hsl = OkHsl::from(Srgb::from(rgb));
    [hsl.h * 360.0, hsl.s, hsl.l]
}
