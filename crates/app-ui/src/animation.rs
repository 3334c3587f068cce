//! Animation timelines
//!
//! A [`Timeline`] is a set of stroke segments revealed by animating their
//! dash offset from full length to zero, followed by one accent whose opacity
//! and scale animate in once every stroke is drawn. [`AnimationSequencer`]
//! plays a timeline against the tokio clock and fires a completion callback
//! once, a settle delay after the accent finishes.
//!
//! Timelines are data: sampling a frame is a pure function of elapsed time, so
//! any drawing surface can render them.

use app_state::ScheduledTask;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Animation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnimationError {
    /// The accent starts before the last stroke has finished
    #[error("Accent starts at {accent_start_ms}ms but strokes run until {stroke_end_ms}ms")]
    AccentTooEarly {
        /// Accent start
        accent_start_ms: u64,
        /// End of the last stroke
        stroke_end_ms: u64,
    },

    /// A stroke easing would make the dash offset reverse
    #[error("Stroke {0} uses a non-monotonic easing")]
    NonMonotonicStroke(String),

    /// A stroke has no drawable length
    #[error("Stroke {name} has invalid length {length}")]
    InvalidLength {
        /// Stroke name
        name: String,
        /// Offending length
        length: f64,
    },
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;

// =============================================================================
// Easing
// =============================================================================

/// Newton iterations before falling back to bisection
const NEWTON_ITERATIONS: usize = 8;
/// Bisection iterations
const BISECTION_ITERATIONS: usize = 32;
/// Solver tolerance on x
const EPSILON: f64 = 1e-7;

/// Easing curve mapping linear progress to eased progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Easing {
    /// No easing
    Linear,
    /// CSS-style cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1)
    CubicBezier {
        /// First control point x
        x1: f64,
        /// First control point y
        y1: f64,
        /// Second control point x
        x2: f64,
        /// Second control point y
        y2: f64,
    },
    /// Pulls back before moving forward: `t²((s+1)t − s)`
    Back {
        /// Overshoot amount `s`
        overshoot: f64,
    },
}

impl Easing {
    /// Standard ease-in, `bezier(0.42, 0, 1, 1)`
    pub const EASE_IN: Easing = Easing::bezier(0.42, 0.0, 1.0, 1.0);

    /// Standard ease-out, `bezier(0, 0, 0.58, 1)`
    pub const EASE_OUT: Easing = Easing::bezier(0.0, 0.0, 0.58, 1.0);

    /// Cubic bezier easing
    pub const fn bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Easing::CubicBezier { x1, y1, x2, y2 }
    }

    /// Back easing with the given overshoot
    pub const fn back(overshoot: f64) -> Self {
        Easing::Back { overshoot }
    }

    /// Eased progress for linear progress `t`
    ///
    /// `t` is clamped to `[0, 1]`; the endpoints map exactly to 0 and 1.
    pub fn apply(&self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Easing::Linear => t,
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                if x1 == y1 && x2 == y2 {
                    return t;
                }
                let u = solve_bezier_x(x1, x2, t);
                bezier_component(y1, y2, u)
            }
            Easing::Back { overshoot: s } => t * t * ((s + 1.0) * t - s),
        }
    }

    /// Whether eased progress never decreases as `t` grows
    pub fn is_monotonic(&self) -> bool {
        match *self {
            Easing::Linear => true,
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                let x_valid = (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2);
                // y'(u) has Bernstein coefficients y1, y2 - y1, 1 - y2
                let (a, b, c) = (y1, y2 - y1, 1.0 - y2);
                let y_monotonic = a >= 0.0 && c >= 0.0 && (b >= 0.0 || b * b <= a * c);
                x_valid && y_monotonic
            }
            Easing::Back { overshoot } => (-3.0..=0.0).contains(&overshoot),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Linear
    }
}

/// One coordinate of the bezier at parameter `u`
fn bezier_component(p1: f64, p2: f64, u: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    ((a * u + b) * u + c) * u
}

fn bezier_slope(p1: f64, p2: f64, u: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (3.0 * a * u + 2.0 * b) * u + c
}

/// Find `u` with `x(u) = x`
fn solve_bezier_x(x1: f64, x2: f64, x: f64) -> f64 {
    let mut u = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bezier_component(x1, x2, u) - x;
        if err.abs() < EPSILON {
            return u;
        }
        let slope = bezier_slope(x1, x2, u);
        if slope.abs() < 1e-6 {
            break;
        }
        u -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    u = x;
    for _ in 0..BISECTION_ITERATIONS {
        let value = bezier_component(x1, x2, u);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = u;
        } else {
            hi = u;
        }
        u = (lo + hi) / 2.0;
    }
    u
}

// =============================================================================
// Tweens and Segments
// =============================================================================

/// A delayed, timed, eased interpolation between two values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    /// Value before the delay elapses
    pub from: f64,
    /// Value once the duration elapses
    pub to: f64,
    /// Start delay
    pub delay: Duration,
    /// Transition length
    pub duration: Duration,
    /// Easing curve
    pub easing: Easing,
}

impl Tween {
    /// Create a tween
    pub fn new(from: f64, to: f64, delay: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            delay,
            duration,
            easing,
        }
    }

    /// When the transition ends
    pub fn end(&self) -> Duration {
        self.delay + self.duration
    }

    /// Linear progress in `[0, 1]` at `elapsed`
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if elapsed < self.delay {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let run = (elapsed - self.delay).as_secs_f64() / self.duration.as_secs_f64();
        run.min(1.0)
    }

    /// Value at `elapsed`
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let eased = self.easing.apply(self.progress(elapsed));
        self.from + (self.to - self.from) * eased
    }
}

/// A stroke revealed by animating its dash offset from `length` to zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeSegment {
    /// Stroke name
    pub name: String,
    /// Total path length, also the dash array
    pub length: f64,
    /// Dash offset transition
    pub tween: Tween,
}

impl StrokeSegment {
    /// Create a stroke that draws in over `duration` after `delay`
    pub fn new(
        name: impl Into<String>,
        length: f64,
        delay: Duration,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            name: name.into(),
            length,
            tween: Tween::new(length, 0.0, delay, duration, easing),
        }
    }

    /// Dash offset at `elapsed`, within `[0, length]`
    pub fn dash_offset_at(&self, elapsed: Duration) -> f64 {
        self.tween.value_at(elapsed).clamp(0.0, self.length)
    }

    /// Drawn share of the stroke at `elapsed`
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        1.0 - self.dash_offset_at(elapsed) / self.length
    }
}

/// The accent shown after all strokes are drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accent {
    /// Accent name
    pub name: String,
    /// Opacity transition
    pub opacity: Tween,
    /// Scale transition
    pub scale: Tween,
}

impl Accent {
    /// When the first accent transition starts
    pub fn start(&self) -> Duration {
        self.opacity.delay.min(self.scale.delay)
    }

    /// When the last accent transition ends
    pub fn end(&self) -> Duration {
        self.opacity.end().max(self.scale.end())
    }
}

// =============================================================================
// Timeline
// =============================================================================

/// Sampled state of one stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeFrame {
    /// Stroke name
    pub name: String,
    /// Current dash offset
    pub dash_offset: f64,
    /// Drawn share in `[0, 1]`
    pub progress: f64,
}

/// Sampled state of the accent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccentFrame {
    /// Current opacity
    pub opacity: f64,
    /// Current scale
    pub scale: f64,
}

/// Every segment's state at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Time since the timeline started
    pub elapsed: Duration,
    /// Strokes in timeline order
    pub strokes: Vec<StrokeFrame>,
    /// Accent state
    pub accent: AccentFrame,
    /// All transitions have ended
    pub finished: bool,
}

/// A validated set of strokes, an accent, and a settle delay
///
/// Deserializing goes through the same checks as [`Timeline::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TimelineParts")]
pub struct Timeline {
    strokes: Vec<StrokeSegment>,
    accent: Accent,
    settle: Duration,
}

/// Unchecked wire form of a [`Timeline`]
#[derive(Deserialize)]
struct TimelineParts {
    strokes: Vec<StrokeSegment>,
    accent: Accent,
    settle: Duration,
}

impl TryFrom<TimelineParts> for Timeline {
    type Error = AnimationError;

    fn try_from(parts: TimelineParts) -> Result<Self> {
        Timeline::new(parts.strokes, parts.accent, parts.settle)
    }
}

impl Timeline {
    /// Build a timeline
    ///
    /// Fails if a stroke has a non-positive length or a non-monotonic easing,
    /// or if the accent starts before the last stroke ends.
    pub fn new(strokes: Vec<StrokeSegment>, accent: Accent, settle: Duration) -> Result<Self> {
        for stroke in &strokes {
            if !(stroke.length.is_finite() && stroke.length > 0.0) {
                return Err(AnimationError::InvalidLength {
                    name: stroke.name.clone(),
                    length: stroke.length,
                });
            }
            if !stroke.tween.easing.is_monotonic() {
                return Err(AnimationError::NonMonotonicStroke(stroke.name.clone()));
            }
        }

        let stroke_end = strokes.iter().map(|s| s.tween.end()).max().unwrap_or_default();
        if accent.start() < stroke_end {
            return Err(AnimationError::AccentTooEarly {
                accent_start_ms: accent.start().as_millis() as u64,
                stroke_end_ms: stroke_end.as_millis() as u64,
            });
        }

        Ok(Self {
            strokes,
            accent,
            settle,
        })
    }

    /// Strokes in draw order
    pub fn strokes(&self) -> &[StrokeSegment] {
        &self.strokes
    }

    /// The accent
    pub fn accent(&self) -> &Accent {
        &self.accent
    }

    /// Delay between the accent ending and completion
    pub fn settle(&self) -> Duration {
        self.settle
    }

    /// When the last stroke finishes drawing
    pub fn stroke_end(&self) -> Duration {
        self.strokes
            .iter()
            .map(|s| s.tween.end())
            .max()
            .unwrap_or_default()
    }

    /// When the accent finishes
    pub fn accent_end(&self) -> Duration {
        self.accent.end()
    }

    /// When the completion callback fires
    pub fn completion_at(&self) -> Duration {
        self.accent_end().max(self.stroke_end()) + self.settle
    }

    /// Sample every segment at `elapsed`
    pub fn frame_at(&self, elapsed: Duration) -> Frame {
        let strokes = self
            .strokes
            .iter()
            .map(|s| StrokeFrame {
                name: s.name.clone(),
                dash_offset: s.dash_offset_at(elapsed),
                progress: s.progress_at(elapsed),
            })
            .collect();

        Frame {
            elapsed,
            strokes,
            accent: AccentFrame {
                opacity: self.accent.opacity.value_at(elapsed),
                scale: self.accent.scale.value_at(elapsed),
            },
            finished: elapsed >= self.accent_end(),
        }
    }
}

// =============================================================================
// Sequencer
// =============================================================================

/// Callback invoked once when a timeline completes
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

/// A timeline playing against the tokio clock
///
/// When dropped, the pending completion is cancelled.
pub struct AnimationSequencer {
    timeline: Arc<Timeline>,
    started_at: Instant,
    completed: Arc<AtomicBool>,
    completion: Option<ScheduledTask>,
}

impl AnimationSequencer {
    /// Start playing `timeline` now
    ///
    /// `on_complete` runs once at [`Timeline::completion_at`]. Must be called
    /// from within a tokio runtime.
    pub fn start(timeline: Arc<Timeline>, on_complete: Option<CompletionCallback>) -> Self {
        let completed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&completed);
        let completion_at = timeline.completion_at();

        let task = ScheduledTask::after(completion_at, move || {
            flag.store(true, Ordering::SeqCst);
            tracing::debug!("Animation timeline complete");
            if let Some(callback) = on_complete {
                callback();
            }
        });

        tracing::debug!(
            strokes = timeline.strokes().len(),
            completion_ms = completion_at.as_millis() as u64,
            "Animation started"
        );

        Self {
            timeline,
            started_at: Instant::now(),
            completed,
            completion: Some(task),
        }
    }

    /// The timeline being played
    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    /// Time since [`start`](Self::start)
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Sample the timeline now
    pub fn frame(&self) -> Frame {
        self.timeline.frame_at(self.elapsed())
    }

    /// Whether the completion point has been reached
    pub fn is_complete(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    /// Whether the sequencer was torn down before completing
    pub fn is_cancelled(&self) -> bool {
        self.completion.is_none() && !self.is_complete()
    }

    /// Tear down; the completion callback will not run
    pub fn cancel(&mut self) {
        if let Some(mut task) = self.completion.take() {
            task.cancel();
        }
    }
}

impl std::fmt::Debug for AnimationSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSequencer")
            .field("elapsed", &self.elapsed())
            .field("complete", &self.is_complete())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn accent_at(delay: u64) -> Accent {
        Accent {
            name: "dot".to_string(),
            opacity: Tween::new(0.0, 1.0, ms(delay), ms(100), Easing::Linear),
            scale: Tween::new(0.0, 1.0, ms(delay), ms(100), Easing::back(1.2)),
        }
    }

    fn two_strokes() -> Vec<StrokeSegment> {
        vec![
            StrokeSegment::new("a", 10.0, ms(0), ms(100), Easing::Linear),
            StrokeSegment::new("b", 20.0, ms(50), ms(150), Easing::EASE_IN),
        ]
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EASE_IN, Easing::EASE_OUT, Easing::back(1.2)] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-1.0), 0.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let easing = Easing::bezier(0.0, 0.0, 1.0, 1.0);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!((easing.apply(t) - t).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ease_in_starts_slow() {
        let half = Easing::EASE_IN.apply(0.5);
        assert!(half < 0.5, "ease-in at 0.5 was {}", half);
        let half = Easing::EASE_OUT.apply(0.5);
        assert!(half > 0.5, "ease-out at 0.5 was {}", half);
    }

    #[test]
    fn test_bezier_is_monotonic_when_sampled() {
        let mut last = 0.0;
        for i in 0..=100 {
            let value = Easing::EASE_IN.apply(i as f64 / 100.0);
            assert!(value >= last - 1e-6);
            last = value;
        }
    }

    #[test]
    fn test_back_dips_below_zero() {
        let easing = Easing::back(1.2);
        assert!(easing.apply(0.2) < 0.0);
        assert!(!easing.is_monotonic());
    }

    #[test]
    fn test_monotonic_checks() {
        assert!(Easing::Linear.is_monotonic());
        assert!(Easing::EASE_IN.is_monotonic());
        assert!(Easing::EASE_OUT.is_monotonic());
        assert!(!Easing::bezier(0.34, 1.56, 0.64, 1.0).is_monotonic());
        assert!(!Easing::bezier(0.5, -0.5, 0.5, 1.0).is_monotonic());
        assert!(Easing::back(0.0).is_monotonic());
    }

    #[test]
    fn test_tween_progress() {
        let tween = Tween::new(38.0, 0.0, ms(400), ms(200), Easing::Linear);
        assert_eq!(tween.value_at(ms(0)), 38.0);
        assert_eq!(tween.value_at(ms(400)), 38.0);
        assert!((tween.value_at(ms(500)) - 19.0).abs() < 1e-9);
        assert_eq!(tween.value_at(ms(600)), 0.0);
        assert_eq!(tween.value_at(ms(10_000)), 0.0);
        assert_eq!(tween.end(), ms(600));
    }

    #[test]
    fn test_zero_duration_tween_jumps() {
        let tween = Tween::new(0.0, 1.0, ms(100), Duration::ZERO, Easing::Linear);
        assert_eq!(tween.value_at(ms(99)), 0.0);
        assert_eq!(tween.value_at(ms(100)), 1.0);
    }

    #[test]
    fn test_stroke_offset_never_reverses() {
        let stroke = StrokeSegment::new("curve", 70.081, ms(450), ms(200), Easing::EASE_OUT);
        let mut last = stroke.length;
        for t in (0..800).step_by(5) {
            let offset = stroke.dash_offset_at(ms(t));
            assert!(offset <= last + 1e-6, "offset grew at {}ms", t);
            assert!((0.0..=stroke.length).contains(&offset));
            last = offset;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn test_timeline_rejects_early_accent() {
        let err = Timeline::new(two_strokes(), accent_at(150), ms(500)).unwrap_err();
        assert_eq!(
            err,
            AnimationError::AccentTooEarly { accent_start_ms: 150, stroke_end_ms: 200 }
        );
    }

    #[test]
    fn test_timeline_rejects_bouncy_stroke() {
        let strokes = vec![StrokeSegment::new("a", 10.0, ms(0), ms(100), Easing::back(1.2))];
        let err = Timeline::new(strokes, accent_at(100), ms(0)).unwrap_err();
        assert_eq!(err, AnimationError::NonMonotonicStroke("a".to_string()));
    }

    #[test]
    fn test_timeline_rejects_empty_stroke() {
        let strokes = vec![StrokeSegment::new("a", 0.0, ms(0), ms(100), Easing::Linear)];
        assert!(matches!(
            Timeline::new(strokes, accent_at(100), ms(0)),
            Err(AnimationError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_timeline_json_is_validated() {
        let timeline = Timeline::new(two_strokes(), accent_at(200), ms(500)).unwrap();
        let json = serde_json::to_value(&timeline).unwrap();
        let restored: Timeline = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(restored, timeline);

        let mut early = json.clone();
        let zero = serde_json::to_value(Duration::ZERO).unwrap();
        early["accent"]["opacity"]["delay"] = zero.clone();
        early["accent"]["scale"]["delay"] = zero;
        let err = serde_json::from_value::<Timeline>(early).unwrap_err();
        assert!(err.to_string().contains("strokes run until 200ms"), "unexpected error: {}", err);

        let mut bouncy = json;
        bouncy["strokes"][0]["tween"]["easing"] = serde_json::to_value(Easing::back(1.2)).unwrap();
        assert!(serde_json::from_value::<Timeline>(bouncy).is_err());
    }

    #[test]
    fn test_timeline_end_points() {
        let timeline = Timeline::new(two_strokes(), accent_at(200), ms(500)).unwrap();
        assert_eq!(timeline.stroke_end(), ms(200));
        assert_eq!(timeline.accent_end(), ms(300));
        assert_eq!(timeline.completion_at(), ms(800));
    }

    #[test]
    fn test_frame_sampling() {
        let timeline = Timeline::new(two_strokes(), accent_at(200), ms(500)).unwrap();

        let start = timeline.frame_at(Duration::ZERO);
        assert_eq!(start.strokes[0].dash_offset, 10.0);
        assert_eq!(start.strokes[1].progress, 0.0);
        assert_eq!(start.accent.opacity, 0.0);
        assert!(!start.finished);

        let end = timeline.frame_at(ms(300));
        assert!(end.strokes.iter().all(|s| s.dash_offset == 0.0 && s.progress == 1.0));
        assert_eq!(end.accent.opacity, 1.0);
        assert_eq!(end.accent.scale, 1.0);
        assert!(end.finished);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequencer_fires_once_after_completion() {
        let timeline = Arc::new(Timeline::new(two_strokes(), accent_at(200), ms(500)).unwrap());
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);

        let sequencer = AnimationSequencer::start(
            timeline,
            Some(Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            })),
        );

        tokio::time::sleep(ms(799)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!sequencer.is_complete());
        assert!(sequencer.frame().finished);

        tokio::time::sleep(ms(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(sequencer.is_complete());

        tokio::time::sleep(ms(5000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequencer_without_callback_completes() {
        let timeline = Arc::new(Timeline::new(two_strokes(), accent_at(200), ms(0)).unwrap());
        let sequencer = AnimationSequencer::start(timeline, None);

        tokio::time::sleep(ms(301)).await;
        assert!(sequencer.is_complete());
        assert!(!sequencer.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_sequencer_never_fires() {
        let timeline = Arc::new(Timeline::new(two_strokes(), accent_at(200), ms(500)).unwrap());
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);

        let mut sequencer = AnimationSequencer::start(
            timeline,
            Some(Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            })),
        );

        tokio::time::sleep(ms(400)).await;
        sequencer.cancel();
        assert!(sequencer.is_cancelled());

        tokio::time::sleep(ms(2000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!sequencer.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_sequencer_never_fires() {
        let timeline = Arc::new(Timeline::new(two_strokes(), accent_at(200), ms(500)).unwrap());
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);

        let sequencer = AnimationSequencer::start(
            timeline,
            Some(Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            })),
        );
        drop(sequencer);

        tokio::time::sleep(ms(2000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
