//! Screen flow
//!
//! The app moves through three screens: splash, login, and dashboard. The
//! splash screen advances either on a fixed timer or when the logo animation
//! finishes, depending on [`FlowConfig`]. Login advances on a validated phone
//! number. The dashboard is terminal.
//!
//! [`ScreenFlow`] is the pure state machine; [`FlowController`] wraps it with
//! the splash timer and publishes the current screen to subscribers.

use app_core::login::PhoneNumber;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

use crate::task::ScheduledTask;

/// Default time on the splash screen with [`SplashAdvance::Timer`]
pub const DEFAULT_SPLASH_DELAY: Duration = Duration::from_millis(3000);

/// Flow errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Event not valid on the current screen
    #[error("Cannot handle {event} on the {screen} screen")]
    InvalidTransition {
        /// Screen the flow was on
        screen: Screen,
        /// Name of the rejected event
        event: &'static str,
    },
}

/// Result type for flow operations
pub type Result<T> = std::result::Result<T, FlowError>;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    /// Logo animation
    Splash,
    /// Phone number entry
    Login,
    /// Merchant analytics
    Dashboard,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Splash => "splash",
            Screen::Login => "login",
            Screen::Dashboard => "dashboard",
        };
        f.write_str(name)
    }
}

/// What moves the flow off the splash screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SplashAdvance {
    /// A fixed timer started when the splash screen mounts
    Timer,
    /// The logo animation's completion callback
    AnimationComplete,
}

/// Flow configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Splash advance strategy
    pub splash_advance: SplashAdvance,
    /// Timer length for [`SplashAdvance::Timer`]
    pub splash_delay: Duration,
    /// Show the login screen between splash and dashboard
    pub require_login: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            splash_advance: SplashAdvance::Timer,
            splash_delay: DEFAULT_SPLASH_DELAY,
            require_login: true,
        }
    }
}

impl FlowConfig {
    /// Set the splash advance strategy
    pub fn with_splash_advance(mut self, advance: SplashAdvance) -> Self {
        self.splash_advance = advance;
        self
    }

    /// Set the splash timer length
    pub fn with_splash_delay(mut self, delay: Duration) -> Self {
        self.splash_delay = delay;
        self
    }

    /// Show or skip the login screen
    pub fn with_require_login(mut self, require_login: bool) -> Self {
        self.require_login = require_login;
        self
    }
}

/// Inputs to the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// The splash timer fired
    SplashTimerElapsed,
    /// The logo animation finished
    SplashAnimationComplete,
    /// A validated phone number was submitted
    LoginSubmitted(PhoneNumber),
}

impl FlowEvent {
    /// Short event name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::SplashTimerElapsed => "splash timer",
            FlowEvent::SplashAnimationComplete => "splash animation complete",
            FlowEvent::LoginSubmitted(_) => "login submission",
        }
    }

    fn splash_advance(&self) -> Option<SplashAdvance> {
        match self {
            FlowEvent::SplashTimerElapsed => Some(SplashAdvance::Timer),
            FlowEvent::SplashAnimationComplete => Some(SplashAdvance::AnimationComplete),
            FlowEvent::LoginSubmitted(_) => None,
        }
    }
}

/// Outcome of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The flow changed screens
    Moved {
        /// Previous screen
        from: Screen,
        /// New screen
        to: Screen,
    },
    /// The event does not drive the configured strategy
    Ignored,
}

/// The screen state machine
#[derive(Debug, Clone)]
pub struct ScreenFlow {
    config: FlowConfig,
    current: Screen,
    phone: Option<PhoneNumber>,
}

impl ScreenFlow {
    /// Start on the splash screen
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            current: Screen::Splash,
            phone: None,
        }
    }

    /// Current screen
    pub fn current(&self) -> Screen {
        self.current
    }

    /// Configuration
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Phone number the user logged in with, if any
    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    /// Apply an event
    pub fn handle(&mut self, event: FlowEvent) -> Result<Transition> {
        let invalid = |screen: Screen, event: &FlowEvent| FlowError::InvalidTransition {
            screen,
            event: event.name(),
        };

        if let Some(advance) = event.splash_advance() {
            if advance != self.config.splash_advance {
                return Ok(Transition::Ignored);
            }
            if self.current != Screen::Splash {
                return Err(invalid(self.current, &event));
            }
            let next = if self.config.require_login {
                Screen::Login
            } else {
                Screen::Dashboard
            };
            return Ok(self.move_to(next));
        }

        match (self.current, event) {
            (Screen::Login, FlowEvent::LoginSubmitted(phone)) => {
                self.phone = Some(phone);
                Ok(self.move_to(Screen::Dashboard))
            }
            (screen, event) => Err(invalid(screen, &event)),
        }
    }

    fn move_to(&mut self, next: Screen) -> Transition {
        let from = self.current;
        self.current = next;
        Transition::Moved { from, to: next }
    }
}

/// Shared flow with the splash timer and a screen subscription
///
/// Created behind an `Arc` so the splash timer can reach back into it without
/// keeping it alive.
pub struct FlowController {
    flow: Mutex<ScreenFlow>,
    screen_tx: watch::Sender<Screen>,
    splash_timer: Mutex<Option<ScheduledTask>>,
}

impl FlowController {
    /// Create a controller on the splash screen
    pub fn new(config: FlowConfig) -> Arc<Self> {
        let (screen_tx, _) = watch::channel(Screen::Splash);
        Arc::new(Self {
            flow: Mutex::new(ScreenFlow::new(config)),
            screen_tx,
            splash_timer: Mutex::new(None),
        })
    }

    /// Current screen
    pub fn current(&self) -> Screen {
        *self.screen_tx.borrow()
    }

    /// Watch screen changes
    pub fn subscribe(&self) -> watch::Receiver<Screen> {
        self.screen_tx.subscribe()
    }

    /// Configuration
    pub fn config(&self) -> FlowConfig {
        self.flow.lock().config().clone()
    }

    /// Phone number the user logged in with, if any
    pub fn phone(&self) -> Option<PhoneNumber> {
        self.flow.lock().phone().cloned()
    }

    /// Called when the splash screen mounts
    ///
    /// With [`SplashAdvance::Timer`] this starts the splash timer. Mounting
    /// again restarts it. Must be called from within a tokio runtime.
    pub fn mount_splash(self: &Arc<Self>) {
        let config = self.config();
        if config.splash_advance != SplashAdvance::Timer || self.current() != Screen::Splash {
            return;
        }

        let weak: Weak<Self> = Arc::downgrade(self);
        let task = ScheduledTask::after(config.splash_delay, move || {
            if let Some(controller) = weak.upgrade() {
                if let Err(e) = controller.dispatch(FlowEvent::SplashTimerElapsed) {
                    tracing::warn!("Splash timer fired late: {}", e);
                }
            }
        });

        tracing::debug!(delay_ms = config.splash_delay.as_millis() as u64, "Splash timer started");
        let previous = self.splash_timer.lock().replace(task);
        drop(previous);
    }

    /// Called when the splash screen unmounts; cancels a pending timer
    pub fn unmount_splash(&self) {
        let timer = self.splash_timer.lock().take();
        if let Some(mut timer) = timer {
            if !timer.is_finished() {
                tracing::debug!("Splash timer cancelled");
            }
            timer.cancel();
        }
    }

    /// Report the logo animation's completion
    pub fn animation_completed(&self) -> Result<Transition> {
        self.dispatch(FlowEvent::SplashAnimationComplete)
    }

    /// Submit the validated phone number from the login screen
    pub fn submit_login(&self, phone: PhoneNumber) -> Result<Transition> {
        self.dispatch(FlowEvent::LoginSubmitted(phone))
    }

    /// Apply an event and publish the new screen
    pub fn dispatch(&self, event: FlowEvent) -> Result<Transition> {
        let transition = self.flow.lock().handle(event)?;

        if let Transition::Moved { from, to } = transition {
            tracing::info!(from = %from, to = %to, "Screen transition");
            self.screen_tx.send_replace(to);
            if from == Screen::Splash {
                drop(self.splash_timer.lock().take());
            }
        }

        Ok(transition)
    }
}

impl fmt::Debug for FlowController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowController")
            .field("current", &self.current())
            .finish()
    }
}
