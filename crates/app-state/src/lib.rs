//! Screen-level state for Shelfmark
//!
//! This crate provides the state machines behind the login and dashboard
//! screens, the screen-lifetime guard that discards results arriving after
//! a screen is dismissed, and the seams through which the host shell
//! supplies navigation and transient notifications.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dashboard_screen;
pub mod login_screen;
pub mod screen;
pub mod surface;

pub use dashboard_screen::DashboardScreen;
pub use login_screen::LoginScreen;
pub use screen::ScreenLifetime;
pub use surface::{Navigator, Notifier, Route, Severity};
