//! Session-gated dashboard fetch
//!
//! Reads the persisted token, attaches it as a bearer credential, and maps
//! the reply onto a render state. The screen never sees stats without a
//! token having been read first: a missing token is its own state, not an
//! empty dashboard.

use crate::client::{ApiClient, ApiRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::TokenStore;
use tracing::debug;

/// Dashboard endpoint path
const DASHBOARD_PATH: &str = "/api/dashboard";

/// Aggregate counters shown on the dashboard
///
/// Counters the server omits default to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    /// Total books in the catalog
    pub books: i64,
    /// Books currently on the shelf
    pub available_books: i64,
    /// Registered members
    pub members: i64,
    /// Members with at least one active loan
    pub active_members: i64,
    /// Books issued today
    pub issued_today: i64,
    /// Books past their due date
    pub overdue_books: i64,
}

/// One recent book issue, as reported by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecentIssue {
    /// Title of the issued book
    pub book_title: String,
    /// Member the book was issued to
    pub member_name: String,
    /// Issue date, as formatted by the server
    pub date: String,
}

/// Render state for the dashboard screen
///
/// `Loading` is the initial, transient state; every other variant is
/// terminal for one invocation. Reloading starts over from `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    /// Fetch in flight
    Loading,
    /// No persisted token; nothing was fetched
    NoToken,
    /// Server answered 401; the stored token is left in place so the user
    /// can explicitly log out
    Unauthorized,
    /// Reply was JSON but had no `stats` field
    InvalidFormat,
    /// Transport failure or a reply that was not JSON
    NetworkError(String),
    /// Dashboard data, in server order
    Loaded {
        /// Aggregate counters
        stats: DashboardStats,
        /// Recent issues, empty if the server sent none
        recent_issues: Vec<RecentIssue>,
    },
}

/// Fetches the dashboard for the stored session
///
/// One call is one best-effort round trip: no retry, no cache, only the
/// client's configured timeout.
pub struct DashboardLoader {
    client: ApiClient,
    tokens: Arc<dyn TokenStore>,
}

impl DashboardLoader {
    /// Create a new dashboard loader
    pub fn new(client: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self { client, tokens }
    }

    /// Load the dashboard, returning a terminal render state
    pub async fn load(&self) -> DashboardState {
        let Some(token) = self.tokens.get().await.filter(|t| !t.is_empty()) else {
            debug!("dashboard load without a stored token");
            return DashboardState::NoToken;
        };

        let request = ApiRequest::get(DASHBOARD_PATH).bearer(&token);

        let response = match self.client.execute::<serde_json::Value>(request).await {
            Ok(response) => response,
            // The 401 gate applies before the body is even considered, so
            // an unauthorized reply with a non-JSON body still lands here.
            Err(e) if e.status() == 401 => return DashboardState::Unauthorized,
            Err(e) => return DashboardState::NetworkError(e.to_string()),
        };

        if response.status == 401 {
            return DashboardState::Unauthorized;
        }

        let Some(stats_value) = response.data.get("stats") else {
            return DashboardState::InvalidFormat;
        };

        let Ok(stats) = serde_json::from_value::<DashboardStats>(stats_value.clone()) else {
            return DashboardState::InvalidFormat;
        };

        let recent_issues = response
            .data
            .get("recentIssues")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default();

        DashboardState::Loaded { stats, recent_issues }
    }
}
