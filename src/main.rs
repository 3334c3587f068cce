//! Point dashboard demo
//!
//! Runs one full session against the sample merchant service: the splash
//! animation, a login with a demo phone number, and the dashboard load. The
//! final dashboard view is printed as JSON. Set `RUST_LOG` to adjust logging.

use anyhow::{bail, Result};
use app_core::branding::{APP_NAME, APP_VERSION};
use app_state::{DashboardStore, FlowConfig, FlowController, LoadState, Screen, SplashAdvance};
use app_ui::{ChartConfig, DashboardScreen, DashboardView, LoginScreen, LogoView, SplashScreen};
use merchant_client::{MerchantApi, SampleMerchantService, SampleServiceConfig, SAMPLE_MERCHANT_ID};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// How often splash progress is logged
const FRAME_LOG_INTERVAL: Duration = Duration::from_millis(500);

/// Settings for one demo session
#[derive(Debug, Clone)]
struct AppConfig {
    flow: FlowConfig,
    sample: SampleServiceConfig,
    chart: ChartConfig,
    logo: LogoView,
    merchant_id: String,
    demo_phone: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flow: FlowConfig::default().with_splash_advance(SplashAdvance::AnimationComplete),
            sample: SampleServiceConfig::default(),
            chart: ChartConfig::default(),
            logo: LogoView::splash(),
            merchant_id: SAMPLE_MERCHANT_ID.to_string(),
            demo_phone: "12 34 56 78".to_string(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let config = AppConfig::default();
    tracing::info!(merchant = %config.merchant_id, version = APP_VERSION, "Starting {} session", APP_NAME);

    let flow = FlowController::new(config.flow.clone());
    run_splash(&flow, &config).await?;

    if flow.current() == Screen::Login {
        run_login(&flow, &config)?;
    }
    if flow.current() != Screen::Dashboard {
        bail!("Expected the dashboard, flow is on the {} screen", flow.current());
    }

    let api: Arc<dyn MerchantApi> = Arc::new(SampleMerchantService::with_config(config.sample.clone()));
    let view = run_dashboard(api, &config).await?;
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}

async fn run_splash(flow: &Arc<FlowController>, config: &AppConfig) -> Result<()> {
    let mut splash = SplashScreen::new(Arc::clone(flow), config.logo)?;
    let mut screens = flow.subscribe();
    let mut ticker = tokio::time::interval(FRAME_LOG_INTERVAL);
    splash.mount();

    loop {
        tokio::select! {
            changed = screens.changed() => {
                changed?;
                if *screens.borrow_and_update() != Screen::Splash {
                    break;
                }
            }
            _ = ticker.tick() => {
                if let Some(scene) = splash.scene() {
                    let drawn = scene.strokes.iter().filter(|s| s.dash_offset == 0.0).count();
                    tracing::debug!(drawn, heart = scene.heart.opacity, "Splash frame");
                }
            }
        }
    }

    splash.unmount();
    Ok(())
}

fn run_login(flow: &Arc<FlowController>, config: &AppConfig) -> Result<()> {
    let mut login = LoginScreen::new(Arc::clone(flow));
    let mut field = String::new();

    for key in config.demo_phone.chars() {
        field.push(key);
        field = login.on_change_text(&field);
    }
    let view = login.view();
    tracing::info!(field = %view.field, country = %view.country_label, "Phone entered");

    if !view.continue_enabled {
        bail!("Demo phone number {:?} is not a valid login", config.demo_phone);
    }
    login.submit()?;
    Ok(())
}

async fn run_dashboard(api: Arc<dyn MerchantApi>, config: &AppConfig) -> Result<DashboardView> {
    let store = DashboardStore::new(api, config.merchant_id.clone());
    let screen = DashboardScreen::new(Arc::clone(&store), config.chart.clone());
    let mut states = store.subscribe();
    screen.mount();

    states
        .wait_for(|state| !matches!(state, LoadState::Idle | LoadState::Loading))
        .await?;

    let view = screen.view();
    match &view {
        DashboardView::Ready(content) => {
            for card in &content.cards {
                tracing::info!(title = %card.title, value = %card.value, "Metric");
            }
            tracing::info!(
                merchant = %content.merchant_name,
                transactions = content.transactions.len(),
                "Dashboard ready"
            );
        }
        DashboardView::Failed { message, .. } => tracing::warn!("Dashboard failed: {}", message),
        DashboardView::Loading { .. } => {}
    }

    screen.unmount();
    Ok(view)
}
