//! Core application logic for Point
//!
//! This crate contains the screen-independent business logic: phone number
//! entry and validation, number formatting, branding constants, and the
//! dashboard view data built from merchant analytics.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod branding;
pub mod dashboard;
pub mod format;
pub mod login;
