//! Color types and color space conversion
//!
//! This module holds the value types for ARGB, HSV and HSL colors and the
//! pure math that converts between them.

pub mod argb;
pub mod conversion;
pub mod hsl;
pub mod hsv;

pub use argb::ArgbColor;
pub use conversion::{alpha_composite, argb_to_hsv, hsv_to_argb};
pub use hsl::HslColor;
pub use hsv::HsvColor;
