//! Application state management for Point
//!
//! This crate provides the stateful pieces behind the screens: cancellable
//! scheduled tasks, the splash → login → dashboard flow, and the dashboard
//! data store with its load lifecycle.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dashboard;
pub mod flow;
pub mod task;

pub use dashboard::{DashboardStore, LoadOutcome, LoadState};
pub use flow::{
    FlowConfig, FlowController, FlowError, FlowEvent, Screen, ScreenFlow, SplashAdvance,
    Transition,
};
pub use task::ScheduledTask;
