#![allow(missing_docs)]

//! Double precision port of the C++ header provided by Björn Ottosson at
//! [http://bottosson.github.io/misc/ok_color.h](http://bottosson.github.io/misc/ok_color.h),
//! restricted to what Okhsv and Okhsl need, with guards for achromatic and black/white inputs.

// Copyright(c) 2021 Björn Ottosson
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this softwareand associated documentation files(the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and /or sell copies
// of the Software, and to permit persons to whom the Software is furnished to do
// so, subject to the following conditions :
// The above copyright noticeand this permission notice shall be included in all
// copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
use std::f64::consts::PI;

use super::*;

/// Chroma below which a color is treated as achromatic when its hue direction is needed.
pub const ACHROMATIC_CHROMA: f64 = 1e-6;

// The matrices were updated 2021-01-25
const LIN_SRGB_TO_LMS: [[f64; 3]; 3] = [
    [0.412_221_470_8, 0.536_332_536_3, 0.051_445_992_9],
    [0.211_903_498_2, 0.680_699_545_1, 0.107_396_956_6],
    [0.088_302_461_9, 0.281_718_837_6, 0.629_978_700_5],
];
const LMS_TO_OKLAB: [[f64; 3]; 3] = [
    [0.210_454_255_3, 0.793_617_785_0, -0.004_072_046_8],
    [1.977_998_495_1, -2.428_592_205_0, 0.450_593_709_9],
    [0.025_904_037_1, 0.782_771_766_2, -0.808_675_766_0],
];
const OKLAB_TO_LMS: [[f64; 3]; 3] = [
    [1.0, 0.396_337_777_4, 0.215_803_757_3],
    [1.0, -0.105_561_345_8, -0.063_854_172_8],
    [1.0, -0.089_484_177_5, -1.291_485_548_0],
];
const LMS_TO_LIN_SRGB: [[f64; 3]; 3] = [
    [4.076_741_662_1, -3.307_711_591_3, 0.230_969_929_2],
    [-1.268_438_004_6, 2.609_757_401_1, -0.341_319_396_5],
    [-0.004_196_086_3, -0.703_418_614_7, 1.707_614_701_0],
];

fn mul(m: &[[f64; 3]; 3], [x, y, z]: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * x + m[0][1] * y + m[0][2] * z,
        m[1][0] * x + m[1][1] * y + m[1][2] * z,
        m[2][0] * x + m[2][1] * y + m[2][2] * z,
    ]
}

fn dot(w: &[f64; 3], [x, y, z]: [f64; 3]) -> f64 {
    w[0] * x + w[1] * y + w[2] * z
}

/// A point of the gamut boundary in the lightness/chroma plane of a single hue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cusp {
    pub l: f64,
    pub c: f64,
}

// Alternative representation of (L_cusp, C_cusp)
// Encoded so S = C_cusp/L_cusp and T = C_cusp/(1-L_cusp)
// The maximum value for C in the triangle is then found as min(S*L, T*(1-L)), for a given L
#[derive(Clone, Copy, Debug)]
struct St {
    s: f64,
    t: f64,
}

impl St {
    fn from_cusp(cusp: Cusp) -> Self {
        St {
            s: cusp.c / cusp.l,
            t: cusp.c / (1.0 - cusp.l),
        }
    }

    // Returns a smooth approximation of the location of the cusp
    // This polynomial was created by an optimization process
    // It has been designed so that S_mid < S_max and T_mid < T_max
    fn mid(a_: f64, b_: f64) -> Self {
        let s = 0.115_169_93
            + 1. / (7.447_789_70
                + 4.159_012_40 * b_
                + a_ * (-2.195_573_47
                    + 1.751_984_01 * b_
                    + a_ * (-2.137_049_48 - 10.023_010_43 * b_
                        + a_ * (-4.248_945_61 + 5.387_708_19 * b_ + 4.698_910_13 * a_))));

        let t = 0.112_396_42
            + 1. / (1.613_203_20 - 0.681_243_79 * b_
                + a_ * (0.403_706_12
                    + 0.901_481_23 * b_
                    + a_ * (-0.270_879_43
                        + 0.612_239_90 * b_
                        + a_ * (0.002_992_15 - 0.453_995_68 * b_ - 0.146_618_72 * a_))));

        St { s, t }
    }
}

#[derive(Clone, Copy, Debug)]
struct Cs {
    c_0: f64,
    c_mid: f64,
    c_max: f64,
}

fn srgb_transfer_function(a: f64) -> f64 {
    if 0.003_130_8 >= a {
        12.92 * a
    } else {
        1.055 * a.powf(1.0 / 2.4) - 0.055
    }
}

fn srgb_transfer_function_inv(a: f64) -> f64 {
    if 0.040_45 < a {
        ((a + 0.055) / 1.055).powf(2.4)
    } else {
        a / 12.92
    }
}

pub fn linear_srgb_to_srgb(c: LinSrgb) -> Srgb {
    Srgb {
        r: srgb_transfer_function(c.r),
        g: srgb_transfer_function(c.g),
        b: srgb_transfer_function(c.b),
    }
}

pub fn srgb_to_linear_srgb(c: Srgb) -> LinSrgb {
    LinSrgb {
        r: srgb_transfer_function_inv(c.r),
        g: srgb_transfer_function_inv(c.g),
        b: srgb_transfer_function_inv(c.b),
    }
}

pub fn linear_srgb_to_oklab(c: LinSrgb) -> Oklab {
    let [l, m, s] = mul(&LIN_SRGB_TO_LMS, [c.r, c.g, c.b]);
    // `f64::cbrt` keeps the sign of negative (out of gamut) inputs
    Oklab::from(mul(&LMS_TO_OKLAB, [l.cbrt(), m.cbrt(), s.cbrt()]))
}

pub fn oklab_to_linear_srgb(c: Oklab) -> LinSrgb {
    let [l_, m_, s_] = mul(&OKLAB_TO_LMS, [c.l, c.a, c.b]);
    LinSrgb::from(mul(
        &LMS_TO_LIN_SRGB,
        [l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_],
    ))
}

pub fn oklab_to_oklch(lab: Oklab) -> OkLch {
    let c = lab.a.hypot(lab.b);
    let h = 0.5 + 0.5 * (-lab.b).atan2(-lab.a) / PI;
    OkLch { l: lab.l, c, h }
}

pub fn oklch_to_oklab(lch: OkLch) -> Oklab {
    let (sin, cos) = (2. * PI * lch.h).sin_cos();
    Oklab {
        l: lch.l,
        a: lch.c * cos,
        b: lch.c * sin,
    }
}

/// Unit hue direction of `lab`, falling back to the +a axis for achromatic colors.
fn hue_direction(lab: Oklab, c: f64) -> (f64, f64) {
    if c < ACHROMATIC_CHROMA {
        (1.0, 0.0)
    } else {
        (lab.a / c, lab.b / c)
    }
}

/// Finds the maximum saturation `S = C/L` possible for a given hue that fits in sRGB.
///
/// `a` and `b` must be normalized so `a^2 + b^2 == 1`.
pub fn compute_max_saturation(a: f64, b: f64) -> f64 {
    // Max saturation will be when one of r, g or b goes below zero.
    // Select different coefficients depending on which component goes below zero first
    let (k, w) = if -1.881_703_28 * a - 0.809_364_93 * b > 1.0 {
        // Red component
        (
            [1.190_862_77, 1.765_767_28, 0.596_626_41, 0.755_151_97, 0.567_712_45],
            LMS_TO_LIN_SRGB[0],
        )
    } else if 1.814_441_04 * a - 1.194_452_76 * b > 1.0 {
        // Green component
        (
            [0.739_565_15, -0.459_544_04, 0.082_854_27, 0.125_410_70, 0.145_032_04],
            LMS_TO_LIN_SRGB[1],
        )
    } else {
        // Blue component
        (
            [1.357_336_52, -0.009_157_99, -1.151_302_10, -0.505_596_06, 0.006_921_67],
            LMS_TO_LIN_SRGB[2],
        )
    };

    // Approximate max saturation using a polynomial:
    let mut saturation = k[0] + k[1] * a + k[2] * b + k[3] * a * a + k[4] * a * b;

    // Do one step Halley's method to get closer
    // this gives an error less than 10e6, except for some blue hues where the dS/dh is close to infinite
    let k_l = OKLAB_TO_LMS[0][1] * a + OKLAB_TO_LMS[0][2] * b;
    let k_m = OKLAB_TO_LMS[1][1] * a + OKLAB_TO_LMS[1][2] * b;
    let k_s = OKLAB_TO_LMS[2][1] * a + OKLAB_TO_LMS[2][2] * b;

    let l_ = 1. + saturation * k_l;
    let m_ = 1. + saturation * k_m;
    let s_ = 1. + saturation * k_s;

    let lms = [l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_];
    let lms_ds = [3. * k_l * l_ * l_, 3. * k_m * m_ * m_, 3. * k_s * s_ * s_];
    let lms_ds2 = [6. * k_l * k_l * l_, 6. * k_m * k_m * m_, 6. * k_s * k_s * s_];

    let f = dot(&w, lms);
    let f1 = dot(&w, lms_ds);
    let f2 = dot(&w, lms_ds2);

    saturation -= f * f1 / (f1 * f1 - 0.5 * f * f2);
    saturation
}

/// Finds `L_cusp` and `C_cusp` for a given hue.
///
/// `a` and `b` must be normalized so `a^2 + b^2 == 1`.
pub fn find_cusp(a: f64, b: f64) -> Cusp {
    // First, find the maximum saturation (saturation S = C/L)
    let s_cusp = compute_max_saturation(a, b);

    // Convert to linear sRGB to find the first point where at least one of r, g or b >= 1:
    let rgb_at_max = oklab_to_linear_srgb(Oklab {
        l: 1.0,
        a: s_cusp * a,
        b: s_cusp * b,
    });
    let l_cusp = (1. / rgb_at_max.r.max(rgb_at_max.g).max(rgb_at_max.b)).cbrt();

    Cusp {
        l: l_cusp,
        c: l_cusp * s_cusp,
    }
}

/// Finds the intersection of the line defined by
/// `L = L0 * (1 - t) + t * L1; C = t * C1;`
/// with the sRGB gamut boundary of the hue `(a, b)`, whose cusp is `cusp`.
///
/// `a` and `b` must be normalized so `a^2 + b^2 == 1`.
pub fn find_gamut_intersection(a: f64, b: f64, l1: f64, c1: f64, l0: f64, cusp: Cusp) -> f64 {
    // Find the intersection for upper and lower half separately
    if ((l1 - l0) * cusp.c - (cusp.l - l0) * c1) <= 0. {
        // Lower half
        return cusp.c * l0 / (c1 * cusp.l + cusp.c * (l0 - l1));
    }

    // Upper half: first intersect with the triangle
    let mut t = cusp.c * (l0 - 1.) / (c1 * (cusp.l - 1.) + cusp.c * (l0 - l1));

    // Then one step Halley's method, per channel, keeping the closest positive root
    let d_l = l1 - l0;
    let d_c = c1;

    let k_l = OKLAB_TO_LMS[0][1] * a + OKLAB_TO_LMS[0][2] * b;
    let k_m = OKLAB_TO_LMS[1][1] * a + OKLAB_TO_LMS[1][2] * b;
    let k_s = OKLAB_TO_LMS[2][1] * a + OKLAB_TO_LMS[2][2] * b;

    let l_dt = d_l + d_c * k_l;
    let m_dt = d_l + d_c * k_m;
    let s_dt = d_l + d_c * k_s;

    let light = l0 * (1. - t) + t * l1;
    let chroma = t * c1;

    let l_ = light + chroma * k_l;
    let m_ = light + chroma * k_m;
    let s_ = light + chroma * k_s;

    let lms = [l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_];
    let lms_dt = [3. * l_dt * l_ * l_, 3. * m_dt * m_ * m_, 3. * s_dt * s_ * s_];
    let lms_dt2 = [
        6. * l_dt * l_dt * l_,
        6. * m_dt * m_dt * m_,
        6. * s_dt * s_dt * s_,
    ];

    let step = LMS_TO_LIN_SRGB
        .iter()
        .filter_map(|w| {
            let f = dot(w, lms) - 1.0;
            let f1 = dot(w, lms_dt);
            let f2 = dot(w, lms_dt2);
            let u = f1 / (f1 * f1 - 0.5 * f * f2);
            (u >= 0.).then_some(-f * u)
        })
        .fold(f64::INFINITY, f64::min);

    if step.is_finite() {
        t += step;
    }
    t
}

/// Perceptual lightness remapping used by Okhsv and Okhsl.
pub fn toe(x: f64) -> f64 {
    const K_1: f64 = 0.206;
    const K_2: f64 = 0.03;
    const K_3: f64 = (1. + K_1) / (1. + K_2);
    0.5 * (K_3 * x - K_1 + ((K_3 * x - K_1) * (K_3 * x - K_1) + 4.0 * K_2 * K_3 * x).sqrt())
}

/// Inverse of [`toe`].
pub fn toe_inv(x: f64) -> f64 {
    const K_1: f64 = 0.206;
    const K_2: f64 = 0.03;
    const K_3: f64 = (1. + K_1) / (1. + K_2);
    (x * x + K_1 * x) / (K_3 * (x + K_2))
}

fn get_cs(l: f64, a_: f64, b_: f64) -> Cs {
    let cusp = find_cusp(a_, b_);

    let c_max = find_gamut_intersection(a_, b_, l, 1.0, l, cusp);
    let st_max = St::from_cusp(cusp);

    // Scale factor to compensate for the curved part of gamut shape:
    let k = c_max / (l * st_max.s).min((1.0 - l) * st_max.t).max(f64::MIN_POSITIVE);

    let c_mid = {
        let st_mid = St::mid(a_, b_);

        // Use a soft minimum function, instead of a sharp triangle shape to get a smooth value for chroma.
        let c_a = l * st_mid.s;
        let c_b = (1. - l) * st_mid.t;
        0.9 * k * (1. / (1. / c_a.powi(4) + 1. / c_b.powi(4))).sqrt().sqrt()
    };

    let c_0 = {
        // for C_0, the shape is independent of hue, so ST are constant. Values picked to roughly be the average values of ST.
        let c_a = l * 0.4;
        let c_b = (1. - l) * 0.8;
        (1. / (1. / (c_a * c_a) + 1. / (c_b * c_b))).sqrt()
    };

    Cs { c_0, c_mid, c_max }
}

const MID: f64 = 0.8;
const MID_INV: f64 = 1.25;

pub fn okhsl_to_oklab(hsl: OkHsl) -> Oklab {
    let l = toe_inv(hsl.l);
    // black and white have no chroma to interpolate
    if hsl.l <= 0.0 || hsl.l >= 1.0 {
        return Oklab { l, a: 0.0, b: 0.0 };
    }

    let (b_, a_) = (2. * PI * hsl.h).sin_cos();
    let Cs { c_0, c_mid, c_max } = get_cs(l, a_, b_);
    let s = hsl.s;

    let c = if s < MID {
        let t = MID_INV * s;

        let k_1 = MID * c_0;
        let k_2 = 1. - k_1 / c_mid;

        t * k_1 / (1. - k_2 * t)
    } else {
        let t = (s - MID) / (1.0 - MID);

        let k_0 = c_mid;
        let k_1 = (1. - MID) * c_mid * c_mid * MID_INV * MID_INV / c_0;
        let k_2 = 1. - k_1 / (c_max - c_mid);

        k_0 + t * k_1 / (1. - k_2 * t)
    };

    Oklab {
        l,
        a: c * a_,
        b: c * b_,
    }
}

pub fn oklab_to_okhsl(lab: Oklab) -> OkHsl {
    let OkLch { l, c, h } = oklab_to_oklch(lab);
    if l <= 0.0 || l >= 1.0 {
        return OkHsl { h, s: 0.0, l: toe(l) };
    }

    let (a_, b_) = hue_direction(lab, c);
    let Cs { c_0, c_mid, c_max } = get_cs(l, a_, b_);

    // Inverse of the interpolation in okhsl_to_oklab:
    let s = if c < c_mid {
        let k_1 = MID * c_0;
        let k_2 = 1. - k_1 / c_mid;

        let t = c / (k_1 + k_2 * c);
        t * MID
    } else {
        let k_0 = c_mid;
        let k_1 = (1. - MID) * c_mid * c_mid * MID_INV * MID_INV / c_0;
        let k_2 = 1. - k_1 / (c_max - c_mid);

        let t = (c - k_0) / (k_1 + k_2 * (c - k_0));
        MID + (1. - MID) * t
    };

    OkHsl { h, s, l: toe(l) }
}

pub fn okhsl_to_srgb(hsl: OkHsl) -> Srgb {
    if hsl.l >= 1.0 {
        return Srgb::new(1.0, 1.0, 1.0);
    } else if hsl.l <= 0.0 {
        return Srgb::new(0.0, 0.0, 0.0);
    }
    linear_srgb_to_srgb(oklab_to_linear_srgb(okhsl_to_oklab(hsl)))
}

pub fn srgb_to_okhsl(rgb: Srgb) -> OkHsl {
    oklab_to_okhsl(linear_srgb_to_oklab(srgb_to_linear_srgb(rgb)))
}

/// Cube root of the factor that brings the largest channel of `rgb` to 1.
fn scale_to_unit(rgb: LinSrgb) -> f64 {
    (1. / rgb.r.max(rgb.g).max(rgb.b).max(f64::MIN_POSITIVE)).cbrt()
}

pub fn okhsv_to_oklab(hsv: OkHsv) -> Oklab {
    let OkHsv { h, s, v } = hsv;

    let (b_, a_) = (2. * PI * h).sin_cos();

    let st_max = St::from_cusp(find_cusp(a_, b_));
    let s_max = st_max.s;
    let t_max = st_max.t;
    let s_0 = 0.5;
    let k = 1.0 - s_0 / s_max;

    // first we compute L and V as if the gamut is a perfect triangle:

    // L, C when v==1:
    let l_v = 1.0 - s * s_0 / (s_0 + t_max - t_max * k * s);
    let c_v = s * t_max * s_0 / (s_0 + t_max - t_max * k * s);

    let l = v * l_v;
    let c = v * c_v;

    // then we compensate for both toe and the curved top part of the triangle:
    let l_vt = toe_inv(l_v);
    let c_vt = c_v * l_vt / l_v;

    let l_new = toe_inv(l);
    let c = if l != 0.0 { c * l_new / l } else { c };
    let l = l_new;

    let scale_l = scale_to_unit(oklab_to_linear_srgb(Oklab {
        l: l_vt,
        a: a_ * c_vt,
        b: b_ * c_vt,
    }));

    let l = l * scale_l;
    let c = c * scale_l;

    Oklab {
        l,
        a: c * a_,
        b: c * b_,
    }
}

pub fn oklab_to_okhsv(lab: Oklab) -> OkHsv {
    let OkLch { l, c, h } = oklab_to_oklch(lab);

    if l <= 0.0 {
        return OkHsv { h, s: 0.0, v: 0.0 };
    }

    let (a_, b_) = hue_direction(lab, c);

    let st_max = St::from_cusp(find_cusp(a_, b_));
    let s_max = st_max.s;
    let t_max = st_max.t;
    let s_0 = 0.5;
    let k = 1.0 - s_0 / s_max;

    // first we find L_v, C_v, L_vt and C_vt

    let t = t_max / (c + l * t_max);
    let l_v = t * l;
    let c_v = t * c;

    let l_vt = toe_inv(l_v);
    let c_vt = if l_v > 0.0 { c_v * l_vt / l_v } else { c_v };

    // we can then use these to invert the step that compensates for the toe and the curved top part of the triangle:
    let scale_l = scale_to_unit(oklab_to_linear_srgb(Oklab {
        l: l_vt,
        a: a_ * c_vt,
        b: b_ * c_vt,
    }));

    let l = toe(l / scale_l);

    // we can now compute v and s:
    let v = if l_v > 0.0 { l / l_v } else { 0.0 };
    let s = (s_0 + t_max) * c_v / ((t_max * s_0) + t_max * k * c_v);

    OkHsv { h, s, v }
}

pub fn okhsv_to_srgb(hsv: OkHsv) -> Srgb {
    linear_srgb_to_srgb(oklab_to_linear_srgb(okhsv_to_oklab(hsv)))
}

pub fn srgb_to_okhsv(rgb: Srgb) -> OkHsv {
    oklab_to_okhsv(linear_srgb_to_oklab(srgb_to_linear_srgb(rgb)))
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn equal_lin_srgb(a: LinSrgb, b: LinSrgb) -> bool {
        let eps = 1e-6;
        (a.r - b.r).abs() < eps && (a.g - b.g).abs() < eps && (a.b - b.b).abs() < eps
    }

    fn seeded_rng() -> impl Rng {
        rand::rngs::StdRng::seed_from_u64(8947) // just a random seed
    }

    #[test]
    fn srgb_conversions() {
        let mut rng = seeded_rng();
        for _ in 0..100 {
            let x = LinSrgb::new(rng.gen(), rng.gen(), rng.gen());
            let z = srgb_to_linear_srgb(linear_srgb_to_srgb(x));
            assert!(equal_lin_srgb(x, z), "{:?} {:?}", x, z);
        }
    }

    #[test]
    fn transfer_function_is_odd_below_breakpoint() {
        let x = LinSrgb::new(-0.002, 0.0, 0.002);
        let y = linear_srgb_to_srgb(x);
        assert_eq!(y.r, -y.b);
        assert!(equal_lin_srgb(x, srgb_to_linear_srgb(y)));
    }

    #[test]
    fn okhsl_conversions() {
        let mut rng = seeded_rng();
        for _ in 0..100 {
            let x = Srgb::new(rng.gen(), rng.gen(), rng.gen());
            let z = okhsl_to_srgb(srgb_to_okhsl(x));
            assert!(
                equal_lin_srgb(x.to_linear(), z.to_linear()),
                "{:?} {:?}",
                x,
                z
            );
        }
    }

    #[test]
    fn okhsv_conversions() {
        let mut rng = seeded_rng();
        for _ in 0..100 {
            let x = Srgb::new(rng.gen(), rng.gen(), rng.gen());
            let z = okhsv_to_srgb(srgb_to_okhsv(x));
            assert!(
                equal_lin_srgb(x.to_linear(), z.to_linear()),
                "{:?} {:?}",
                x,
                z
            );
        }
    }

    #[test]
    fn oklab_conversions() {
        let mut rng = seeded_rng();
        for _ in 0..100 {
            let x = LinSrgb::new(rng.gen(), rng.gen(), rng.gen());
            let z = oklab_to_linear_srgb(linear_srgb_to_oklab(x));
            assert!(equal_lin_srgb(x, z), "{:?} {:?}", x, z);
        }
    }

    #[test]
    fn oklch_conversions() {
        let mut rng = seeded_rng();
        for _ in 0..100 {
            let x = Oklab::new(rng.gen(), rng.gen_range(-0.4..0.4), rng.gen_range(-0.4..0.4));
            let z = oklch_to_oklab(oklab_to_oklch(x));
            assert!((x.l - z.l).abs() < 1e-12);
            assert!((x.a - z.a).abs() < 1e-12, "{:?} {:?}", x, z);
            assert!((x.b - z.b).abs() < 1e-12, "{:?} {:?}", x, z);
        }
    }

    #[test]
    fn cusp_is_on_the_gamut_boundary() {
        let mut rng = seeded_rng();
        for _ in 0..100 {
            let h: f64 = rng.gen();
            let (b_, a_) = (2. * PI * h).sin_cos();
            let cusp = find_cusp(a_, b_);
            let rgb = oklab_to_linear_srgb(Oklab::new(cusp.l, cusp.c * a_, cusp.c * b_));
            let max = rgb.r.max(rgb.g).max(rgb.b);
            assert!((max - 1.0).abs() < 1e-3, "{:?} {:?}", cusp, rgb);
        }
    }

    #[test]
    fn hsv_to_lab_and_back() {
        let mut rng = seeded_rng();
        for _ in 0..100 {
            let x = OkHsv::new(rng.gen(), rng.gen(), rng.gen());
            let z = oklab_to_okhsv(okhsv_to_oklab(x));

            assert!(
                equal_lin_srgb(LinSrgb::from(x), LinSrgb::from(z)),
                "{:?} {:?}",
                x,
                z
            );
        }
    }

    #[test]
    fn hsv_value_zero() {
        let oklab = okhsv_to_oklab(OkHsv::new(0.0, 1.0, 0.0));

        assert!(!oklab.l.is_nan());
        assert!(!oklab.a.is_nan());
        assert!(!oklab.b.is_nan());

        assert_eq!(oklab.l, 0.0);
        assert_eq!(oklab.a, 0.0);
        assert_eq!(oklab.b, 0.0);
    }

    #[test]
    fn hsv_saturation_zero() {
        let okhsv = OkHsv::from(OkLch::new(0.77861947, 0.0, 0.0));

        assert!(!okhsv.h.is_nan());
        assert!(okhsv.s.abs() < 1e-9, "{:?}", okhsv);
        assert!(!okhsv.v.is_nan());
    }

    #[test]
    fn black_and_white_are_finite() {
        for lab in [
            Oklab::new(0.0, 0.0, 0.0),
            Oklab::new(1.0, 0.0, 0.0),
            linear_srgb_to_oklab(LinSrgb::new(1.0, 1.0, 1.0)),
        ] {
            let hsv = oklab_to_okhsv(lab);
            let hsl = oklab_to_okhsl(lab);
            for x in [hsv.h, hsv.s, hsv.v, hsl.h, hsl.s, hsl.l] {
                assert!(x.is_finite(), "{:?} {:?} {:?}", lab, hsv, hsl);
            }
        }

        let black = okhsl_to_oklab(OkHsl::new(0.3, 1.0, 0.0));
        let white = okhsl_to_oklab(OkHsl::new(0.3, 1.0, 1.0));
        assert_eq!(black, Oklab::new(0.0, 0.0, 0.0));
        assert!((white.l - 1.0).abs() < 1e-12);
        assert_eq!((white.a, white.b), (0.0, 0.0));
    }
}
