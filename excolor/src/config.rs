//! Configuration of the gamut clip table.

/// Default number of segments along the primary axis of a gamut clip table.
pub const AXES_LIMITS_SEGMENTS: usize = 256;

/// Default padding added around every clip rectangle.
pub const AXES_LIMITS_OFFSET: f32 = 0.01;

/// Parameters a gamut clip table was baked with.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GamutClipConfig {
    /// Number of buckets along the primary axis, minus one.
    pub segments: usize,
    /// Epsilon padding around each rectangle, to hide the discretization error of the baking
    /// process.
    pub offset: f32,
}

impl Default for GamutClipConfig {
    fn default() -> Self {
        Self {
            segments: AXES_LIMITS_SEGMENTS,
            offset: AXES_LIMITS_OFFSET,
        }
    }
}
