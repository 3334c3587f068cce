//! Application screens
//!
//! Each screen is a controller with a mount/unmount lifecycle that produces
//! plain view data for a drawing surface:
//!
//! - [`SplashScreen`] plays the logo animation and drives the splash exit
//! - [`LoginScreen`] owns the phone number field
//! - [`DashboardScreen`] loads analytics and builds the dashboard view

use app_core::dashboard::{
    failure_message, metric_cards, metric_series, metric_title, period_label, text,
    transaction_rows, MetricCard, TransactionRow,
};
use app_core::login::{self, LoginError, PhoneInput};
use app_state::{DashboardStore, FlowController, FlowError, LoadState, Transition};
use merchant_client::{Metric, Period};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::animation::{AnimationError, AnimationSequencer, Timeline};
use crate::chart::{render, Chart, ChartConfig, ChartMode, ChartSample};
use crate::logo::{point_logo_timeline, LogoScene, LogoView};

/// Screen errors
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Login input rejected
    #[error("Login error: {0}")]
    Login(#[from] LoginError),

    /// Flow rejected the event
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    /// Logo timeline invalid
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),
}

/// Result type for screen operations
pub type Result<T> = std::result::Result<T, ScreenError>;

// =============================================================================
// Splash
// =============================================================================

/// Splash screen with the animated logo
pub struct SplashScreen {
    flow: Arc<FlowController>,
    timeline: Arc<Timeline>,
    view: LogoView,
    sequencer: Option<AnimationSequencer>,
}

impl SplashScreen {
    /// Create the splash screen for the POINT logo
    pub fn new(flow: Arc<FlowController>, view: LogoView) -> Result<Self> {
        let timeline = Arc::new(point_logo_timeline()?);
        Ok(Self {
            flow,
            timeline,
            view,
            sequencer: None,
        })
    }

    /// Start the animation and the splash timer
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self) {
        if self.sequencer.is_some() {
            return;
        }

        let flow = Arc::downgrade(&self.flow);
        let on_complete = Box::new(move || {
            let Some(flow) = flow.upgrade() else {
                return;
            };
            match flow.animation_completed() {
                Ok(Transition::Moved { to, .. }) => {
                    tracing::debug!(to = %to, "Splash left on animation complete");
                }
                Ok(Transition::Ignored) => {}
                Err(e) => tracing::warn!("Animation completed off the splash screen: {}", e),
            }
        });

        self.sequencer = Some(AnimationSequencer::start(
            Arc::clone(&self.timeline),
            Some(on_complete),
        ));
        self.flow.mount_splash();
        tracing::info!("Splash screen mounted");
    }

    /// Current logo scene, while mounted
    pub fn scene(&self) -> Option<LogoScene> {
        self.sequencer
            .as_ref()
            .map(|sequencer| self.view.compose(&sequencer.frame()))
    }

    /// Whether the logo animation has completed
    pub fn is_animation_complete(&self) -> bool {
        self.sequencer.as_ref().is_some_and(|s| s.is_complete())
    }

    /// The logo timeline
    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    /// Stop the animation and the splash timer
    pub fn unmount(&mut self) {
        if let Some(mut sequencer) = self.sequencer.take() {
            sequencer.cancel();
            self.flow.unmount_splash();
            tracing::info!("Splash screen unmounted");
        }
    }
}

impl Drop for SplashScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}

// =============================================================================
// Login
// =============================================================================

/// Phone number login screen
pub struct LoginScreen {
    flow: Arc<FlowController>,
    input: PhoneInput,
}

impl LoginScreen {
    /// Create an empty login screen
    pub fn new(flow: Arc<FlowController>) -> Self {
        Self {
            flow,
            input: PhoneInput::new(),
        }
    }

    /// Apply a text change and return the new field text
    pub fn on_change_text(&mut self, raw: &str) -> String {
        self.input.on_change_text(raw)
    }

    /// Text shown in the field
    pub fn display(&self) -> String {
        self.input.display()
    }

    /// Country picker label
    pub fn country_label(&self) -> String {
        self.input.country().label()
    }

    /// Whether the continue button is enabled
    pub fn can_continue(&self) -> bool {
        self.input.is_valid()
    }

    /// Continue with the entered number
    pub fn submit(&mut self) -> Result<Transition> {
        let phone = self.input.submit()?;
        Ok(self.flow.submit_login(phone)?)
    }

    /// Build the current view
    pub fn view(&self) -> LoginView {
        LoginView {
            greeting: login::text::GREETING.to_string(),
            prompt: login::text::PROMPT.to_string(),
            country_label: self.country_label(),
            field: self.display(),
            placeholder: login::text::PLACEHOLDER.to_string(),
            continue_label: login::text::CONTINUE.to_string(),
            continue_enabled: self.can_continue(),
            terms: login::text::TERMS.to_string(),
            terms_link: login::text::TERMS_LINK.to_string(),
        }
    }
}

/// What the login screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginView {
    /// Greeting heading
    pub greeting: String,
    /// Prompt under the greeting
    pub prompt: String,
    /// Country picker label
    pub country_label: String,
    /// Grouped field text
    pub field: String,
    /// Placeholder while the field is empty
    pub placeholder: String,
    /// Continue button label
    pub continue_label: String,
    /// Whether continue is enabled
    pub continue_enabled: bool,
    /// Terms notice
    pub terms: String,
    /// Terms link text
    pub terms_link: String,
}

// =============================================================================
// Dashboard
// =============================================================================

/// A selectable period tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTab {
    /// Period
    pub period: Period,
    /// Tab label
    pub label: String,
    /// Whether the tab is active
    pub selected: bool,
}

/// Everything the loaded dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardContent {
    /// Store name in the header
    pub merchant_name: String,
    /// Header subtitle
    pub title: String,
    /// Period tabs
    pub periods: Vec<PeriodTab>,
    /// Selected period
    pub period: Period,
    /// Caption for the selected period
    pub subtitle: String,
    /// Metric cards
    pub cards: Vec<MetricCard>,
    /// Metric shown in the chart
    pub metric: Metric,
    /// Chart heading
    pub chart_title: String,
    /// Chart geometry
    pub chart: Chart,
    /// Line or bar chart
    pub mode: ChartMode,
    /// Transactions heading
    pub transactions_title: String,
    /// Recent transactions
    pub transactions: Vec<TransactionRow>,
}

/// What the dashboard screen shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "status")]
pub enum DashboardView {
    /// Spinner with a caption
    Loading {
        /// Caption
        caption: String,
    },
    /// Full-screen error with a retry button
    Failed {
        /// Error title
        title: String,
        /// Human-readable message
        message: String,
        /// Retry button label
        retry_label: String,
    },
    /// The dashboard itself
    Ready(Box<DashboardContent>),
}

/// Dashboard screen
pub struct DashboardScreen {
    store: Arc<DashboardStore>,
    chart_config: ChartConfig,
    period: Period,
    metric: Metric,
    mode: ChartMode,
}

impl DashboardScreen {
    /// Create the screen over a store
    pub fn new(store: Arc<DashboardStore>, chart_config: ChartConfig) -> Self {
        Self {
            store,
            chart_config,
            period: Period::default(),
            metric: Metric::default(),
            mode: ChartMode::default(),
        }
    }

    /// Start loading. Must be called from within a tokio runtime.
    pub fn mount(&self) {
        tracing::info!(merchant = %self.store.merchant_id(), "Dashboard mounted");
        self.store.spawn_load();
    }

    /// Retry after a failure. Returns `false` when a load is already pending.
    pub fn retry(&self) -> bool {
        tracing::info!(merchant = %self.store.merchant_id(), "Dashboard retry requested");
        self.store.spawn_load()
    }

    /// Tear down; a pending load will not update the screen
    pub fn unmount(&self) {
        self.store.unmount();
    }

    /// The backing store
    pub fn store(&self) -> &Arc<DashboardStore> {
        &self.store
    }

    /// Select a period tab
    pub fn select_period(&mut self, period: Period) {
        self.period = period;
    }

    /// Select the charted metric
    pub fn select_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    /// Switch between line and bar charts
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Selected period
    pub fn period(&self) -> Period {
        self.period
    }

    /// Selected metric
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Selected chart mode
    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    /// Build the current view
    pub fn view(&self) -> DashboardView {
        match self.store.state() {
            LoadState::Idle | LoadState::Loading => DashboardView::Loading {
                caption: text::LOADING.to_string(),
            },
            LoadState::Failed { not_found, .. } => DashboardView::Failed {
                title: text::ERROR_TITLE.to_string(),
                message: failure_message(self.store.merchant_id(), not_found),
                retry_label: text::RETRY.to_string(),
            },
            LoadState::Loaded(bundle) => {
                let analytics = &bundle.analytics;
                let stats = analytics.stats.get(self.period);
                let samples: Vec<ChartSample> =
                    metric_series(analytics.chart_data.get(self.period), self.metric)
                        .into_iter()
                        .map(|(label, value)| ChartSample::new(label, value))
                        .collect();

                DashboardView::Ready(Box::new(DashboardContent {
                    merchant_name: bundle.merchant.name.clone(),
                    title: text::TITLE.to_string(),
                    periods: Period::ALL
                        .iter()
                        .map(|&period| PeriodTab {
                            period,
                            label: period_label(period).to_string(),
                            selected: period == self.period,
                        })
                        .collect(),
                    period: self.period,
                    subtitle: stats.subtitle.clone(),
                    cards: metric_cards(stats),
                    metric: self.metric,
                    chart_title: metric_title(self.metric).to_string(),
                    chart: render(&samples, self.mode, &self.chart_config),
                    mode: self.mode,
                    transactions_title: text::RECENT_TRANSACTIONS.to_string(),
                    transactions: transaction_rows(&analytics.recent_transactions),
                }))
            }
        }
    }
}

impl Drop for DashboardScreen {
    fn drop(&mut self) {
        self.store.unmount();
    }
}
