//! Seams to the host UI shell
//!
//! The flows never draw anything. Navigation and transient notifications
//! are supplied by the surrounding shell through the two traits below; the
//! shell decides what a route change or a toast actually looks like.

use std::time::Duration;

/// Logical routes the flows can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page
    Landing,
    /// Login screen
    Login,
    /// Librarian dashboard
    Dashboard,
}

impl Route {
    /// Route path as the navigation layer addresses it
    pub fn as_path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
        }
    }
}

/// Severity of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral progress information
    Info,
    /// Confirmation of a completed action
    Success,
    /// Something went wrong
    Error,
}

/// Navigation service provided by the app shell
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Replace the current screen with the given route
    fn replace(&self, route: Route);

    /// Return to the previous screen
    fn back(&self);
}

/// Transient notification surface provided by the app shell
///
/// Notifications self-dismiss after `duration`; showing a new one replaces
/// whatever is currently visible.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show a transient message
    fn notify(&self, message: &str, severity: Severity, duration: Duration);
}
