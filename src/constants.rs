//! Reference values for color conversion and histogram analysis
//!
//! Compile-time constants shared by the color, histogram and analysis
//! modules, grouped by concern.

/// Hue circle
pub mod hue {
    /// Degrees in a full hue turn; valid hues are in `[0, FULL_TURN]`
    pub const FULL_TURN: f64 = 360.0;

    /// Width of one HSV sector in degrees
    pub const SECTOR_DEGREES: f64 = 60.0;
}

/// Perceptual weights for intensity (Rec. 601 luma)
pub mod luma {
    pub const RED_WEIGHT: f64 = 0.299;
    pub const GREEN_WEIGHT: f64 = 0.587;
    pub const BLUE_WEIGHT: f64 = 0.114;
}

/// Histogram geometry defaults
pub mod histogram {
    /// One bucket per degree of hue
    pub const DEFAULT_HUES: usize = 360;

    /// One bucket per percent of saturation
    pub const DEFAULT_SATURATIONS: usize = 100;

    /// One bucket per percent of value
    pub const DEFAULT_VALUES: usize = 100;
}

/// Dominant color search
pub mod dominant {
    /// Pixels below this saturation are treated as gray noise
    pub const MIN_SATURATION: f64 = 0.25;

    /// Pixels below this value are treated as black noise
    pub const MIN_VALUE: f64 = 0.25;
}

/// Similarity metric between two histograms
pub mod correlation {
    /// Common scale all three HSV axes are mapped onto
    pub const AXIS_SCALE: f64 = 100.0;

    /// Degrees of hue per unit on the common scale
    pub const HUE_DIVISOR: f64 = super::hue::FULL_TURN / AXIS_SCALE;

    /// Largest possible distance, `sqrt(3 * 100²)`
    pub const MAX_DISTANCE: f64 = 173.205_080_756_887_72;
}
