//! Precomputed sRGB gamut limits for the models that are not sRGB based.
//!
//! When a primary channel of such a model is locked, the sRGB colors in the plane of the two
//! secondary channels fit inside an axis aligned rectangle. The table stores that rectangle for
//! `segments + 1` evenly spaced values of the primary channel, so a plane can be stretched to
//! cover only displayable colors.
//!
//! The table is a flat blob of little-endian `f32`, four values `(min_x, max_x, min_y, max_y)`
//! per `(model, primary, bucket)`, where the entry starts at
//! `((slot * 3 + primary) * (segments + 1) + bucket) * 4` and `slot` is
//! [ColorModel::gamut_table_slot].

use std::path::Path;

use crate::{config::GamutClipConfig, error::GamutTableError, ColorModel};

/// Smallest rectangle width used when unmapping, so collapsed rectangles do not blow up.
pub const MIN_AXIS_WIDTH: f64 = 1e-4;

/// Valid range of the two secondary channels, in normalized units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxesLimits {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl AxesLimits {
    /// The whole unit square.
    pub const FULL: AxesLimits = AxesLimits {
        x: (0.0, 1.0),
        y: (0.0, 1.0),
    };

    fn lerp(self, other: AxesLimits, t: f64) -> AxesLimits {
        let mix = |a: f64, b: f64| a * (1.0 - t) + b * t;
        AxesLimits {
            x: (mix(self.x.0, other.x.0), mix(self.x.1, other.x.1)),
            y: (mix(self.y.0, other.y.0), mix(self.y.1, other.y.1)),
        }
    }
}

/// Read-only table of gamut limits. Load it once and share it by reference or `Arc`.
#[derive(Clone, Debug)]
pub struct GamutClipTable {
    limits: Vec<f32>,
    config: GamutClipConfig,
}

/// Number of floats a table baked with `segments` must have, or `None` if that number does not
/// fit in a `usize`.
pub fn expected_len(segments: usize) -> Option<usize> {
    let clippable = ColorModel::ALL
        .iter()
        .filter(|m| m.is_not_srgb_based())
        .count();
    segments.checked_add(1)?.checked_mul(clippable * 4 * 3)
}

/// Index of the first float of the entry for `(slot, primary, bucket)`.
fn entry_start(slot: usize, primary: usize, bucket: usize, segments: usize) -> Option<usize> {
    (slot * 3 + primary)
        .checked_mul(segments.checked_add(1)?)?
        .checked_add(bucket)?
        .checked_mul(4)
}

/// Decode a blob of little-endian `f32`.
pub fn read_floats(bytes: &[u8]) -> Result<Vec<f32>, GamutTableError> {
    if bytes.len() % 4 != 0 {
        return Err(GamutTableError::TruncatedFloat(bytes.len()));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

impl GamutClipTable {
    /// Build a table from already decoded limits, checking their length against `config`.
    pub fn from_limits(
        limits: Vec<f32>,
        config: GamutClipConfig,
    ) -> Result<Self, GamutTableError> {
        let Some(expected) = expected_len(config.segments) else {
            log::error!(
                "gamut clip table configuration has too many segments: {}",
                config.segments
            );
            return Err(GamutTableError::SegmentsOutOfRange(config.segments));
        };
        if limits.len() != expected {
            log::error!(
                "length of gamut clip table does not match its configuration: {} != {}. \
                 The table must be rebaked after changing the segment count.",
                limits.len(),
                expected
            );
            return Err(GamutTableError::LengthMismatch {
                found: limits.len(),
                expected,
            });
        }
        Ok(Self::from_limits_unchecked(limits, config))
    }

    /// Build a table without checking its length. Lookups past the end of a short table return
    /// [AxesLimits::FULL].
    pub fn from_limits_unchecked(limits: Vec<f32>, config: GamutClipConfig) -> Self {
        Self { limits, config }
    }

    pub fn from_bytes(bytes: &[u8], config: GamutClipConfig) -> Result<Self, GamutTableError> {
        Self::from_limits(read_floats(bytes)?, config)
    }

    /// Read a table file.
    pub fn load(path: impl AsRef<Path>, config: GamutClipConfig) -> Result<Self, GamutTableError> {
        let path = path.as_ref();
        log::debug!("reading gamut clip table from {}", path.display());
        let bytes = std::fs::read(path)?;
        let table = Self::from_bytes(&bytes, config)?;
        log::info!(
            "loaded gamut clip table {} ({} segments)",
            path.display(),
            config.segments
        );
        Ok(table)
    }

    pub fn config(&self) -> &GamutClipConfig {
        &self.config
    }

    /// Number of floats in the table.
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    /// Limits of the secondary channels of `model` when `primary` is at `bucket`, padded by the
    /// configured offset.
    pub fn axes_limits(&self, model: ColorModel, primary: usize, bucket: usize) -> AxesLimits {
        let Some(slot) = model.gamut_table_slot() else {
            return AxesLimits::FULL;
        };

        let segments = self.config.segments;
        if primary > 2 || bucket > segments {
            log::warn!(
                "gamut clip lookup out of range: {} channel {} bucket {}",
                model,
                primary,
                bucket
            );
            return AxesLimits::FULL;
        }

        let entry = entry_start(slot, primary, bucket, segments)
            .and_then(|base| self.limits.get(base..))
            .and_then(|rest| rest.get(..4));
        let Some(&[min_x, max_x, min_y, max_y]) = entry else {
            log::warn!(
                "gamut clip table too short for {} channel {} bucket {}: {} values",
                model,
                primary,
                bucket,
                self.limits.len()
            );
            return AxesLimits::FULL;
        };

        let offset = self.config.offset;
        let lower = |x: f32| f64::from((x - offset).max(0.0));
        let upper = |x: f32| f64::from((x + offset).min(1.0));
        AxesLimits {
            x: (lower(min_x), upper(max_x)),
            y: (lower(min_y), upper(max_y)),
        }
    }

    /// Limits for a continuous primary value in [0, 1], blending the two nearest buckets.
    pub fn axes_limits_interpolated(
        &self,
        model: ColorModel,
        primary: usize,
        value: f64,
    ) -> AxesLimits {
        if !model.is_not_srgb_based() {
            return AxesLimits::FULL;
        }

        let segments = self.config.segments as f64;
        let a = if value.is_nan() {
            0.0
        } else {
            (value * segments).clamp(0.0, segments)
        };
        let t = a - a.floor();

        let lo = self.axes_limits(model, primary, a.floor() as usize);
        let hi = self.axes_limits(model, primary, a.ceil() as usize);
        lo.lerp(hi, t)
    }

    /// Map a coordinate of the unit square into the displayable rectangle.
    pub fn map_axes_to_limited(
        &self,
        model: ColorModel,
        primary: usize,
        value: f64,
        [x, y]: [f64; 2],
    ) -> [f64; 2] {
        let limits = self.axes_limits_interpolated(model, primary, value);
        [
            limits.x.0 * (1.0 - x) + limits.x.1 * x,
            limits.y.0 * (1.0 - y) + limits.y.1 * y,
        ]
    }

    /// Inverse of [GamutClipTable::map_axes_to_limited], exact wherever the rectangle is at least
    /// [MIN_AXIS_WIDTH] wide.
    pub fn unmap_axes_from_limited(
        &self,
        model: ColorModel,
        primary: usize,
        value: f64,
        [x, y]: [f64; 2],
    ) -> [f64; 2] {
        let limits = self.axes_limits_interpolated(model, primary, value);
        [
            (x - limits.x.0) / (limits.x.1 - limits.x.0).max(MIN_AXIS_WIDTH),
            (y - limits.y.0) / (limits.y.1 - limits.y.0).max(MIN_AXIS_WIDTH),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};
    use std::io::Write;

    const NOT_SRGB: [ColorModel; 4] = [
        ColorModel::Oklab,
        ColorModel::Xyz,
        ColorModel::Lab,
        ColorModel::Oklch,
    ];

    fn config(segments: usize, offset: f32) -> GamutClipConfig {
        GamutClipConfig { segments, offset }
    }

    /// Build a table whose entries are given by `f(slot, primary, bucket)`.
    fn build(segments: usize, f: impl Fn(usize, usize, usize) -> [f32; 4]) -> Vec<f32> {
        let mut limits = Vec::with_capacity(expected_len(segments).unwrap());
        for slot in 0..4 {
            for primary in 0..3 {
                for bucket in 0..=segments {
                    limits.extend(f(slot, primary, bucket));
                }
            }
        }
        limits
    }

    fn to_bytes(limits: &[f32]) -> Vec<u8> {
        limits.iter().flat_map(|x| x.to_le_bytes()).collect()
    }

    #[test]
    fn expected_length() {
        assert_eq!(expected_len(256), Some(4 * 257 * 4 * 3));
        assert_eq!(expected_len(0), Some(48));
        let colorful = ColorModel::ALL
            .iter()
            .filter(|m| m.is_colorfulable())
            .count();
        assert_eq!(expected_len(10), Some(colorful * 11 * 12));
    }

    #[test]
    fn oversized_segment_count() {
        assert_eq!(expected_len(usize::MAX), None);
        assert_eq!(expected_len(usize::MAX / 2), None);

        let err = GamutClipTable::from_limits(vec![0.0; 48], config(usize::MAX, 0.0)).unwrap_err();
        assert!(
            matches!(err, GamutTableError::SegmentsOutOfRange(usize::MAX)),
            "{}",
            err
        );

        let table = GamutClipTable::from_limits_unchecked(vec![0.0; 48], config(usize::MAX, 0.0));
        assert_eq!(table.axes_limits(ColorModel::Lab, 2, 7), AxesLimits::FULL);
        assert_eq!(
            table.axes_limits_interpolated(ColorModel::Oklch, 1, 0.5),
            AxesLimits::FULL
        );
    }

    #[test]
    fn length_mismatch() {
        let err = GamutClipTable::from_limits(vec![0.0; 100], config(2, 0.0)).unwrap_err();
        match err {
            GamutTableError::LengthMismatch { found, expected } => {
                assert_eq!(found, 100);
                assert_eq!(expected, 4 * 3 * 4 * 3);
            }
            err => panic!("unexpected error: {}", err),
        }
    }

    #[test]
    fn truncated_float() {
        let err = GamutClipTable::from_bytes(&[0u8; 7], config(2, 0.0)).unwrap_err();
        assert!(matches!(err, GamutTableError::TruncatedFloat(7)), "{}", err);
    }

    #[test]
    fn load_from_file() {
        let limits = build(4, |_, _, _| [0.25, 0.75, 0.0, 0.5]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&to_bytes(&limits)).unwrap();

        let table = GamutClipTable::load(file.path(), config(4, 0.0)).unwrap();
        assert_eq!(table.len(), limits.len());
        assert_eq!(
            table.axes_limits(ColorModel::Oklch, 2, 4),
            AxesLimits {
                x: (0.25, 0.75),
                y: (0.0, 0.5)
            }
        );

        let err = GamutClipTable::load(file.path(), config(5, 0.0)).unwrap_err();
        assert!(matches!(err, GamutTableError::LengthMismatch { .. }));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GamutClipTable::load(dir.path().join("nope.bytes"), Default::default());
        assert!(matches!(err, Err(GamutTableError::Io(_))));
    }

    #[test]
    fn srgb_based_models_are_trivial() {
        let table = GamutClipTable::from_limits_unchecked(Vec::new(), config(4, 0.01));
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        for model in ColorModel::ALL.into_iter().filter(|m| !m.is_not_srgb_based()) {
            for primary in 0..3 {
                for _ in 0..20 {
                    let value: f64 = rng.gen();
                    assert_eq!(
                        table.axes_limits_interpolated(model, primary, value),
                        AxesLimits::FULL
                    );
                }
                let coord = [0.3, 0.9];
                assert_eq!(table.map_axes_to_limited(model, primary, 0.5, coord), coord);
            }
        }
    }

    #[test]
    fn entries_are_found_at_their_slot() {
        let segments = 3;
        let limits = build(segments, |slot, primary, bucket| {
            let id = (slot * 3 + primary) * (segments + 1) + bucket;
            let x = id as f32 / 100.0;
            [x, x + 0.001, x + 0.002, x + 0.003]
        });
        let table = GamutClipTable::from_limits(limits, config(segments, 0.0)).unwrap();

        for (slot, model) in NOT_SRGB.into_iter().enumerate() {
            for primary in 0..3 {
                for bucket in 0..=segments {
                    let id = (slot * 3 + primary) * (segments + 1) + bucket;
                    let x = f64::from(id as f32 / 100.0);
                    let l = table.axes_limits(model, primary, bucket);
                    assert_abs_diff_eq!(l.x.0, x, epsilon = 1e-6);
                    assert_abs_diff_eq!(l.x.1, x + 0.001, epsilon = 1e-6);
                    assert_abs_diff_eq!(l.y.0, x + 0.002, epsilon = 1e-6);
                    assert_abs_diff_eq!(l.y.1, x + 0.003, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn offset_pads_and_clamps() {
        let limits = build(1, |_, _, _| [0.2, 0.6, 0.005, 0.999]);
        let table = GamutClipTable::from_limits(limits, config(1, 0.01)).unwrap();
        let l = table.axes_limits(ColorModel::Lab, 0, 1);
        assert_abs_diff_eq!(l.x.0, 0.19, epsilon = 1e-6);
        assert_abs_diff_eq!(l.x.1, 0.61, epsilon = 1e-6);
        assert_eq!(l.y, (0.0, 1.0));
    }

    #[test]
    fn interpolates_between_buckets() {
        let segments = 4;
        let limits = build(segments, |_, _, bucket| {
            let b = bucket as f32 / 10.0;
            [b, 0.5 + b, 0.0, 1.0 - b]
        });
        let table = GamutClipTable::from_limits(limits, config(segments, 0.0)).unwrap();

        // between bucket 1 and 2
        let l = table.axes_limits_interpolated(ColorModel::Oklab, 1, 0.375);
        assert_abs_diff_eq!(l.x.0, 0.15, epsilon = 1e-6);
        assert_abs_diff_eq!(l.x.1, 0.65, epsilon = 1e-6);
        assert_abs_diff_eq!(l.y.1, 0.85, epsilon = 1e-6);

        // exactly on a bucket
        let l = table.axes_limits_interpolated(ColorModel::Oklab, 1, 0.5);
        assert_abs_diff_eq!(l.x.0, 0.2, epsilon = 1e-6);

        // values outside of [0, 1] use the first or last bucket
        let l = table.axes_limits_interpolated(ColorModel::Oklab, 1, 1.5);
        assert_abs_diff_eq!(l.x.0, 0.4, epsilon = 1e-6);
        let l = table.axes_limits_interpolated(ColorModel::Oklab, 1, -0.5);
        assert_abs_diff_eq!(l.x.0, 0.0, epsilon = 1e-6);
        let l = table.axes_limits_interpolated(ColorModel::Oklab, 1, f64::NAN);
        assert_abs_diff_eq!(l.x.0, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn short_table_returns_full_square() {
        let table = GamutClipTable::from_limits_unchecked(vec![0.1, 0.2, 0.3, 0.4], config(8, 0.0));
        assert_eq!(
            table.axes_limits(ColorModel::Oklch, 2, 8),
            AxesLimits::FULL
        );
        assert_eq!(
            table.axes_limits_interpolated(ColorModel::Xyz, 0, 0.7),
            AxesLimits::FULL
        );
        assert_eq!(table.axes_limits(ColorModel::Oklab, 3, 0), AxesLimits::FULL);
        assert_eq!(table.axes_limits(ColorModel::Oklab, 0, 9), AxesLimits::FULL);
    }

    #[test]
    fn map_unmap_round_trip() {
        let segments = 16;
        let limits = build(segments, |slot, primary, bucket| {
            let k = ((slot + primary + bucket) % 5) as f32 / 20.0;
            [k, 1.0 - k, k / 2.0, 0.9]
        });
        let table = GamutClipTable::from_limits(limits, config(segments, 0.01)).unwrap();

        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        for model in NOT_SRGB {
            for primary in 0..3 {
                for _ in 0..100 {
                    let value: f64 = rng.gen();
                    let coord: [f64; 2] = rng.gen();
                    let mapped = table.map_axes_to_limited(model, primary, value, coord);
                    let l = table.axes_limits_interpolated(model, primary, value);
                    assert!(mapped[0] >= l.x.0 - 1e-12 && mapped[0] <= l.x.1 + 1e-12);
                    let back = table.unmap_axes_from_limited(model, primary, value, mapped);
                    assert_abs_diff_eq!(back[0], coord[0], epsilon = 1e-9);
                    assert_abs_diff_eq!(back[1], coord[1], epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn degenerate_rectangles_stay_finite() {
        let limits = build(2, |_, _, _| [0.5, 0.5, 1.0, 1.0]);
        let table = GamutClipTable::from_limits(limits, config(2, 0.0)).unwrap();

        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        for model in ColorModel::ALL {
            for primary in 0..3 {
                for _ in 0..50 {
                    let value: f64 = rng.gen();
                    let coord: [f64; 2] = rng.gen();
                    let mapped = table.map_axes_to_limited(model, primary, value, coord);
                    let back = table.unmap_axes_from_limited(model, primary, value, mapped);
                    assert!(mapped.iter().chain(&back).all(|x| x.is_finite()));
                }
            }
        }
    }

    #[test]
    fn table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GamutClipTable>();
    }
}
