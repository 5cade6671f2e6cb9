//! Client library for the Shelfmark library management API
//!
//! This crate implements the credential-gated data flows behind the app's
//! screens: submitting a login, persisting the session token, and fetching
//! the librarian dashboard with the stored token attached as a bearer
//! credential. Every failure is surfaced as a state value for the
//! presentation layer rather than propagated as an error.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod session;

pub use auth::{Authenticator, LoginOutcome, RejectReason, ValidationError};
pub use client::{ApiClient, ApiClientConfig, ApiError};
pub use dashboard::{DashboardLoader, DashboardState, DashboardStats, RecentIssue};
pub use session::Session;
