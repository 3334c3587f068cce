//! User interface for Point
//!
//! This crate provides the UI layer as plain data: the animated logo, chart
//! geometry, design tokens, and the screen controllers that turn application
//! state into view models for a drawing surface.
//!
//! # Modules
//!
//! - [`animation`] - Easing curves, timelines, and the animation sequencer
//! - [`logo`] - The POINT logo strokes and heart mark
//! - [`chart`] - Line and bar chart geometry
//! - [`tokens`] - Design tokens (spacing, durations, chart and logo geometry)
//! - [`screens`] - Splash, login, and dashboard screens
//!
//! # Example
//!
//! ```rust
//! use app_ui::chart::{render, ChartConfig, ChartMode, ChartSample};
//!
//! let samples = vec![
//!     ChartSample::new("Man", 8400.0),
//!     ChartSample::new("Tir", 7900.0),
//! ];
//! let chart = render(&samples, ChartMode::Bar, &ChartConfig::default());
//! assert_eq!(chart.grid.len(), 5);
//! assert_eq!(chart.grid[0].label, "8.4k");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod animation;
pub mod chart;
pub mod logo;
pub mod screens;
pub mod tokens;

// Re-export commonly used types
pub use animation::{
    AnimationError, AnimationSequencer, CompletionCallback, Easing, Frame, StrokeSegment,
    Timeline, Tween,
};

pub use chart::{render, Chart, ChartConfig, ChartMode, ChartSample, Series};

pub use logo::{point_logo_timeline, LogoScene, LogoView};

pub use screens::{
    DashboardContent, DashboardScreen, DashboardView, LoginScreen, LoginView, ScreenError,
    SplashScreen,
};
