//! Design tokens for Point
//!
//! Fixed timings and geometry shared by the logo and the charts.

// =============================================================================
// Duration Tokens
// =============================================================================

/// Animation durations (in milliseconds)
pub mod duration {
    /// Pause after the logo finishes before signalling completion
    pub const SETTLE: u64 = 500;
}

// =============================================================================
// Logo Tokens
// =============================================================================

/// Logo geometry
pub mod logo {
    /// View box width
    pub const VIEW_BOX_WIDTH: f32 = 190.0;
    /// View box height
    pub const VIEW_BOX_HEIGHT: f32 = 40.0;
    /// Letter opacity
    pub const LETTER_OPACITY: f32 = 0.82;
    /// Heart mark stroke width
    pub const HEART_STROKE_WIDTH: f32 = 11.31;
    /// Splash screen logo width
    pub const SPLASH_WIDTH: f32 = 220.0;
    /// Splash screen logo height
    pub const SPLASH_HEIGHT: f32 = 60.0;
}

// =============================================================================
// Chart Tokens
// =============================================================================

/// Chart geometry
pub mod chart {
    /// Plot padding above the top grid line
    pub const PADDING_TOP: f64 = 20.0;
    /// Plot padding right of the last sample
    pub const PADDING_RIGHT: f64 = 20.0;
    /// Plot padding below the baseline, room for X labels
    pub const PADDING_BOTTOM: f64 = 40.0;
    /// Plot padding left of the first sample, room for Y labels
    pub const PADDING_LEFT: f64 = 50.0;
    /// Horizontal grid lines, top and bottom included
    pub const GRID_LINES: usize = 5;
    /// Bar width as a share of its slot
    pub const BAR_WIDTH_RATIO: f64 = 0.6;
    /// Default chart height on the dashboard
    pub const HEIGHT: f64 = 220.0;
}
