//! Login screen flow
//!
//! Drives the authenticator and translates every outcome into the toasts
//! and navigation the login screen shows. The outcome is also returned so
//! a caller can react beyond the built-in side effects.

use crate::surface::{Navigator, Notifier, Route, Severity};
use lms_client::{Authenticator, LoginOutcome, RejectReason, ValidationError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default toast duration
const TOAST_DEFAULT: Duration = Duration::from_millis(3000);
/// Success confirmation shown briefly before navigating away
const TOAST_SUCCESS: Duration = Duration::from_millis(800);
/// Pre-flight progress notice
const TOAST_PROGRESS: Duration = Duration::from_millis(1500);
/// Network failures linger long enough to be read
const TOAST_NETWORK: Duration = Duration::from_millis(5000);

/// State machine behind the login screen
pub struct LoginScreen {
    auth: Authenticator,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

impl LoginScreen {
    /// Create a new login screen flow
    pub fn new(
        auth: Authenticator,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { auth, navigator, notifier, in_flight: AtomicBool::new(false) }
    }

    /// Whether a login request is currently outstanding
    ///
    /// The renderer uses this for the spinner on the submit button.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submit the login form
    pub async fn submit(&self, email: &str, password: &str) -> LoginOutcome {
        // The progress toast belongs to the network phase; field validation
        // failures never show it.
        let fields_present = !email.trim().is_empty() && !password.trim().is_empty();
        if fields_present {
            self.in_flight.store(true, Ordering::Release);
            self.notifier
                .notify("Logging in...", Severity::Info, TOAST_PROGRESS);
        }

        let outcome = self.auth.login(email, password).await;
        self.in_flight.store(false, Ordering::Release);

        debug!("login outcome: {:?}", outcome);

        match &outcome {
            LoginOutcome::Invalid(ValidationError::EmptyEmail) => {
                self.notifier
                    .notify("Email is required", Severity::Error, TOAST_DEFAULT);
            }
            LoginOutcome::Invalid(ValidationError::EmptyPassword) => {
                self.notifier
                    .notify("Password is required", Severity::Error, TOAST_DEFAULT);
            }
            LoginOutcome::Authorized(_) => {
                self.notifier
                    .notify("Login successful!", Severity::Success, TOAST_SUCCESS);
                // Let the confirmation toast play out before leaving.
                tokio::time::sleep(TOAST_SUCCESS).await;
                self.navigator.replace(Route::Dashboard);
            }
            LoginOutcome::Forbidden => {
                self.notifier.notify(
                    "Access denied: no dashboard is available for this account",
                    Severity::Error,
                    TOAST_DEFAULT,
                );
            }
            LoginOutcome::Rejected(RejectReason::InvalidEmail) => {
                self.notifier
                    .notify("Invalid email", Severity::Error, TOAST_DEFAULT);
            }
            LoginOutcome::Rejected(RejectReason::InvalidPassword) => {
                self.notifier
                    .notify("Invalid password", Severity::Error, TOAST_DEFAULT);
            }
            LoginOutcome::Rejected(RejectReason::InvalidCredentials) => {
                self.notifier
                    .notify("Invalid credentials", Severity::Error, TOAST_DEFAULT);
            }
            LoginOutcome::NetworkError(_) => {
                self.notifier.notify(
                    "Network/server error. Please try again.",
                    Severity::Error,
                    TOAST_NETWORK,
                );
            }
        }

        outcome
    }

    /// Leave the login screen without submitting
    pub fn cancel(&self) {
        self.navigator.back();
    }
}
