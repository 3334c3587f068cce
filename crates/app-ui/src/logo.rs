//! The POINT logo
//!
//! Seven letter strokes draw in one after another, then the green heart mark
//! fades and scales in. All geometry is in a 190×40 view box; [`LogoView`]
//! maps it onto the caller's width and height without touching timing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::animation::{Accent, Easing, Frame, Result, StrokeSegment, Timeline, Tween};
use crate::tokens::{duration, logo};
use app_core::branding::colors;

/// One authored letter stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoStroke {
    /// Stroke name
    pub name: &'static str,
    /// SVG path data
    pub path: &'static str,
    /// Stroke width in view box units
    pub width: f32,
    /// Path length
    pub length: f64,
    /// Start delay in milliseconds
    pub delay_ms: u64,
    /// Draw time in milliseconds
    pub duration_ms: u64,
    /// Easing curve
    pub easing: Easing,
}

/// Letter strokes in draw order
pub const STROKES: [LogoStroke; 7] = [
    LogoStroke {
        name: "p-line",
        path: "M5 39V1",
        width: 10.0,
        length: 38.0,
        delay_ms: 400,
        duration_ms: 150,
        easing: Easing::EASE_IN,
    },
    LogoStroke {
        name: "p-curve",
        path: "M0 5.5H20C25 5.5 29.5 9 29.5 15S25 24.5 20 24.5H0",
        width: 9.0,
        length: 70.081,
        delay_ms: 450,
        duration_ms: 200,
        easing: Easing::EASE_OUT,
    },
    LogoStroke {
        name: "o-circle",
        path: "M56.5 5.5C65.5 5.5 71 12 71 20S65.5 34.5 56.5 34.5 42 28 42 20 47.5 5.5 56.5 5.5",
        width: 10.0,
        length: 91.998,
        delay_ms: 600,
        duration_ms: 250,
        easing: Easing::Linear,
    },
    LogoStroke {
        name: "i-line",
        path: "M85 39V1",
        width: 10.0,
        length: 38.0,
        delay_ms: 800,
        duration_ms: 150,
        easing: Easing::Linear,
    },
    LogoStroke {
        name: "n-path",
        path: "M100.5 39V18C100.5 12.5 104.25 5.5 114.25 5.5 124.5 5.5 128 12.5 128 18V39",
        width: 10.0,
        length: 83.765,
        delay_ms: 900,
        duration_ms: 250,
        easing: Easing::Linear,
    },
    LogoStroke {
        name: "t-line",
        path: "M153 39V1",
        width: 10.0,
        length: 38.0,
        delay_ms: 1100,
        duration_ms: 150,
        easing: Easing::Linear,
    },
    LogoStroke {
        name: "t-top",
        path: "M136 5.5H170",
        width: 9.0,
        length: 38.0,
        delay_ms: 1200,
        duration_ms: 600,
        easing: Easing::EASE_IN,
    },
];

/// Heart mark
pub mod heart {
    /// Accent name
    pub const NAME: &str = "heart";
    /// Chevron paths forming the heart
    pub const PATHS: [&str; 4] = [
        "M180 31 184.25 26.75",
        "M180 31 176 35",
        "M180 31 175.75 26.75",
        "M180 31 184 35",
    ];
    /// Clip mask path
    pub const MASK: &str = "M180 39 190 29V20H170V29L180 39Z";
    /// Scale origin
    pub const CENTER: (f32, f32) = (180.0, 31.0);
    /// Start delay, when the t-top stroke finishes
    pub const DELAY_MS: u64 = 1800;
    /// Fade and scale time
    pub const DURATION_MS: u64 = 300;
    /// Final opacity
    pub const OPACITY: f64 = 0.7;
    /// Overshoot of the scale-in
    pub const OVERSHOOT: f64 = 1.2;
}

/// Build the POINT logo timeline
pub fn point_logo_timeline() -> Result<Timeline> {
    let strokes = STROKES
        .iter()
        .map(|s| {
            StrokeSegment::new(
                s.name,
                s.length,
                Duration::from_millis(s.delay_ms),
                Duration::from_millis(s.duration_ms),
                s.easing,
            )
        })
        .collect();

    let delay = Duration::from_millis(heart::DELAY_MS);
    let length = Duration::from_millis(heart::DURATION_MS);
    let accent = Accent {
        name: heart::NAME.to_string(),
        opacity: Tween::new(0.0, heart::OPACITY, delay, length, Easing::EASE_IN),
        scale: Tween::new(0.0, 1.0, delay, length, Easing::back(heart::OVERSHOOT)),
    };

    Timeline::new(strokes, accent, Duration::from_millis(duration::SETTLE))
}

/// Uniform scale and centering offset from view box to output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTransform {
    /// Uniform scale factor
    pub scale: f32,
    /// Horizontal offset after scaling
    pub offset_x: f32,
    /// Vertical offset after scaling
    pub offset_y: f32,
}

impl ViewTransform {
    /// Map a view box point to output coordinates
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }
}

/// Output size for the logo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogoView {
    /// Output width
    pub width: f32,
    /// Output height
    pub height: f32,
}

impl Default for LogoView {
    fn default() -> Self {
        Self {
            width: logo::VIEW_BOX_WIDTH,
            height: logo::VIEW_BOX_HEIGHT,
        }
    }
}

impl LogoView {
    /// Create a view of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The size used on the splash screen
    pub fn splash() -> Self {
        Self::new(logo::SPLASH_WIDTH, logo::SPLASH_HEIGHT)
    }

    /// Fit the view box inside the output, centered, keeping its aspect
    pub fn transform(&self) -> ViewTransform {
        let scale = (self.width / logo::VIEW_BOX_WIDTH)
            .min(self.height / logo::VIEW_BOX_HEIGHT)
            .max(0.0);
        ViewTransform {
            scale,
            offset_x: (self.width - logo::VIEW_BOX_WIDTH * scale) / 2.0,
            offset_y: (self.height - logo::VIEW_BOX_HEIGHT * scale) / 2.0,
        }
    }

    /// Compose a sampled frame into drawable layers
    pub fn compose(&self, frame: &Frame) -> LogoScene {
        let strokes = STROKES
            .iter()
            .zip(&frame.strokes)
            .map(|(stroke, sample)| StrokeLayer {
                name: stroke.name.to_string(),
                path: stroke.path.to_string(),
                width: stroke.width,
                color: colors::LOGO_STROKE.to_string(),
                opacity: logo::LETTER_OPACITY,
                dash_array: stroke.length,
                dash_offset: sample.dash_offset,
            })
            .collect();

        LogoScene {
            width: self.width,
            height: self.height,
            transform: self.transform(),
            strokes,
            heart: HeartLayer {
                paths: heart::PATHS.iter().map(|p| p.to_string()).collect(),
                mask: heart::MASK.to_string(),
                color: colors::POINT_GREEN.to_string(),
                width: logo::HEART_STROKE_WIDTH,
                center: heart::CENTER,
                opacity: frame.accent.opacity,
                scale: frame.accent.scale,
            },
        }
    }
}

/// A letter stroke ready to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeLayer {
    /// Stroke name
    pub name: String,
    /// SVG path data in view box units
    pub path: String,
    /// Stroke width
    pub width: f32,
    /// Stroke color
    pub color: String,
    /// Layer opacity
    pub opacity: f32,
    /// Dash array, the full path length
    pub dash_array: f64,
    /// Current dash offset
    pub dash_offset: f64,
}

/// The heart mark ready to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartLayer {
    /// Chevron paths
    pub paths: Vec<String>,
    /// Clip mask path
    pub mask: String,
    /// Stroke color
    pub color: String,
    /// Stroke width
    pub width: f32,
    /// Scale origin in view box units
    pub center: (f32, f32),
    /// Current opacity
    pub opacity: f64,
    /// Current scale
    pub scale: f64,
}

/// The whole logo at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoScene {
    /// Output width
    pub width: f32,
    /// Output height
    pub height: f32,
    /// View box to output mapping
    pub transform: ViewTransform,
    /// Letter strokes in draw order
    pub strokes: Vec<StrokeLayer>,
    /// Heart mark
    pub heart: HeartLayer,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_timeline_is_valid() {
        let timeline = point_logo_timeline().unwrap();
        assert_eq!(timeline.strokes().len(), 7);
        assert_eq!(timeline.stroke_end(), ms(1800));
        assert_eq!(timeline.accent_end(), ms(2100));
        assert_eq!(timeline.completion_at(), ms(2600));
    }

    #[test]
    fn test_heart_starts_after_every_stroke() {
        let last_stroke = STROKES.iter().map(|s| s.delay_ms + s.duration_ms).max().unwrap();
        assert!(heart::DELAY_MS >= last_stroke);
    }

    #[test]
    fn test_stroke_easings_are_monotonic() {
        assert!(STROKES.iter().all(|s| s.easing.is_monotonic()));
    }

    #[test]
    fn test_frames_across_the_timeline() {
        let timeline = point_logo_timeline().unwrap();

        let before = timeline.frame_at(ms(399));
        assert!(before.strokes.iter().all(|s| s.progress == 0.0));
        assert_eq!(before.accent.opacity, 0.0);

        let mid = timeline.frame_at(ms(700));
        assert_eq!(mid.strokes[0].progress, 1.0);
        assert_eq!(mid.strokes[1].progress, 1.0);
        assert!(mid.strokes[2].progress > 0.0 && mid.strokes[2].progress < 1.0);
        assert_eq!(mid.strokes[6].progress, 0.0);

        let strokes_done = timeline.frame_at(ms(1800));
        assert!(strokes_done.strokes.iter().all(|s| s.dash_offset == 0.0));
        assert_eq!(strokes_done.accent.scale, 0.0);

        let done = timeline.frame_at(ms(2100));
        assert!((done.accent.opacity - 0.7).abs() < 1e-9);
        assert_eq!(done.accent.scale, 1.0);
        assert!(done.finished);
    }

    #[test]
    fn test_view_transform_keeps_aspect() {
        let transform = LogoView::new(380.0, 80.0).transform();
        assert_eq!(transform.scale, 2.0);
        assert_eq!(transform.offset_x, 0.0);

        // 220×60 is limited by width; the logo is centered vertically
        let transform = LogoView::splash().transform();
        assert!((transform.scale - 220.0 / 190.0).abs() < 1e-5);
        assert!(transform.offset_x.abs() < 1e-4);
        let (_, top) = transform.apply(0.0, 0.0);
        let (_, bottom) = transform.apply(190.0, 40.0);
        assert!((top - (60.0 - bottom)).abs() < 1e-4);
    }

    #[test]
    fn test_size_does_not_change_timing() {
        let timeline = point_logo_timeline().unwrap();
        let frame = timeline.frame_at(ms(1000));

        let small = LogoView::default().compose(&frame);
        let large = LogoView::new(950.0, 200.0).compose(&frame);

        assert_eq!(small.strokes.len(), 7);
        for (a, b) in small.strokes.iter().zip(&large.strokes) {
            assert_eq!(a.dash_offset, b.dash_offset);
        }
        assert_ne!(small.transform, large.transform);
    }

    #[test]
    fn test_scene_layers() {
        let timeline = point_logo_timeline().unwrap();
        let scene = LogoView::splash().compose(&timeline.frame_at(ms(0)));

        assert_eq!(scene.strokes[0].name, "p-line");
        assert_eq!(scene.strokes[0].dash_array, 38.0);
        assert_eq!(scene.strokes[0].dash_offset, 38.0);
        assert_eq!(scene.heart.color, colors::POINT_GREEN);
        assert_eq!(scene.heart.paths.len(), 4);
    }
}
