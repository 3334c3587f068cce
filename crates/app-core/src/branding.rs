//! Point Branding
//!
//! Name, version, and the brand colors shared by the logo and the dashboard.

/// Application name
pub const APP_NAME: &str = "Point";

/// Application version (from Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Brand colors
pub mod colors {
    /// Logo letters
    pub const LOGO_STROKE: &str = "#FFFFFF";

    /// Heart mark and positive figures (green)
    pub const POINT_GREEN: &str = "#4FD300";

    /// Transactions accent (cyan)
    pub const CYAN: &str = "#00D4FF";

    /// Revenue accent (orange)
    pub const ORANGE: &str = "#FF6B00";

    /// Refunds and errors (red)
    pub const REFUND_RED: &str = "#FF4444";
}
