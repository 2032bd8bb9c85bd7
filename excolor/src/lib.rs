//! Color model conversion and sRGB gamut clipping for color selectors.
//!
//! Colors are normalized triples tagged with a [ColorModel]. [transfer_color_model] converts
//! them between any two models through CIE XYZ, and a [GamutClipTable] tells, for the models
//! whose unit cube goes beyond sRGB, which part of a channel plane is displayable.
//!
//! ```
//! use excolor::{transfer_color_model, ColorModel};
//!
//! let hsl = transfer_color_model([0.0, 0.0, 1.0], ColorModel::Rgb, ColorModel::Hsl, None, true);
//! assert!((hsl[0] - 240.0 / 360.0).abs() < 1e-4);
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod gamut;
pub mod model;
pub mod shape;
pub mod xyz;

pub use config::GamutClipConfig;
pub use convert::{is_displayable, sanitize_out_of_gamut, transfer_color_model, Color};
pub use error::GamutTableError;
pub use gamut::{AxesLimits, GamutClipTable};
pub use model::ColorModel;
pub use shape::{PrimaryRing, WheelShape};
