//! Session flow integration tests
//!
//! Drives the splash, login, and dashboard screens together on paused time.

use app_state::{FlowConfig, FlowController, Screen, SplashAdvance, Transition};
use app_ui::{LoginScreen, LogoView, ScreenError, SplashScreen};
use std::sync::Arc;
use std::time::Duration;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn type_phone(login: &mut LoginScreen, keys: &str) -> String {
    let mut field = String::new();
    for key in keys.chars() {
        field.push(key);
        field = login.on_change_text(&field);
    }
    field
}

/// Timer strategy: splash holds for the full delay, then login, then dashboard
#[tokio::test(start_paused = true)]
async fn test_timer_session_reaches_dashboard() {
    let flow = FlowController::new(FlowConfig::default());
    let mut splash = SplashScreen::new(Arc::clone(&flow), LogoView::splash()).unwrap();
    splash.mount();

    // The animation finishes before the timer, the screen stays put
    tokio::time::sleep(ms(2700)).await;
    assert!(splash.is_animation_complete());
    assert_eq!(flow.current(), Screen::Splash);

    tokio::time::sleep(ms(400)).await;
    assert_eq!(flow.current(), Screen::Login);
    splash.unmount();

    let mut login = LoginScreen::new(Arc::clone(&flow));
    let field = type_phone(&mut login, "12345678");
    assert_eq!(field, "12 34 56 78");
    assert_eq!(login.country_label(), "+45 Denmark");
    assert!(login.can_continue());

    let transition = login.submit().unwrap();
    assert_eq!(
        transition,
        Transition::Moved { from: Screen::Login, to: Screen::Dashboard }
    );
    assert_eq!(flow.current(), Screen::Dashboard);
    assert_eq!(flow.phone().unwrap().digits(), "12345678");
}

/// Animation strategy: the splash leaves as soon as the logo settles
#[tokio::test(start_paused = true)]
async fn test_animation_session_leaves_splash_early() {
    let config = FlowConfig::default().with_splash_advance(SplashAdvance::AnimationComplete);
    let flow = FlowController::new(config);
    let mut screens = flow.subscribe();
    let mut splash = SplashScreen::new(Arc::clone(&flow), LogoView::splash()).unwrap();

    let start = tokio::time::Instant::now();
    splash.mount();
    screens.changed().await.unwrap();

    assert_eq!(*screens.borrow(), Screen::Login);
    let elapsed = start.elapsed();
    assert!(elapsed >= ms(2600) && elapsed < ms(2650), "left after {:?}", elapsed);
}

/// Without a login step the splash goes straight to the dashboard
#[tokio::test(start_paused = true)]
async fn test_session_without_login() {
    let flow = FlowController::new(FlowConfig::default().with_require_login(false));
    let mut splash = SplashScreen::new(Arc::clone(&flow), LogoView::splash()).unwrap();
    splash.mount();

    tokio::time::sleep(ms(3100)).await;
    assert_eq!(flow.current(), Screen::Dashboard);
    assert!(flow.phone().is_none());
}

/// Unmounting the splash early stops both the timer and the animation
#[tokio::test(start_paused = true)]
async fn test_splash_unmounted_before_timer() {
    let flow = FlowController::new(FlowConfig::default());
    let mut splash = SplashScreen::new(Arc::clone(&flow), LogoView::splash()).unwrap();
    splash.mount();

    tokio::time::sleep(ms(1000)).await;
    splash.unmount();
    assert!(splash.scene().is_none());

    tokio::time::sleep(ms(5000)).await;
    assert_eq!(flow.current(), Screen::Splash);
}

/// An incomplete number is rejected and the flow stays on login
#[tokio::test(start_paused = true)]
async fn test_login_rejects_short_number() {
    let flow = FlowController::new(FlowConfig::default());
    let mut splash = SplashScreen::new(Arc::clone(&flow), LogoView::splash()).unwrap();
    splash.mount();
    tokio::time::sleep(ms(3100)).await;
    assert_eq!(flow.current(), Screen::Login);

    let mut login = LoginScreen::new(Arc::clone(&flow));
    assert_eq!(type_phone(&mut login, "12a34"), "12 34");
    assert!(!login.can_continue());

    let err = login.submit().unwrap_err();
    assert!(matches!(err, ScreenError::Login(_)));
    assert_eq!(flow.current(), Screen::Login);
}
