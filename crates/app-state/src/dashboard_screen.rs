//! Dashboard screen flow
//!
//! Owns the dashboard's render state and the logout action. One `refresh`
//! is one state-machine pass: `Loading`, then exactly one terminal state
//! from the loader. Results that arrive after the screen was dismissed are
//! dropped on the floor.

use crate::screen::ScreenLifetime;
use crate::surface::{Navigator, Route};
use lms_client::{DashboardLoader, DashboardState};
use parking_lot::RwLock;
use std::sync::Arc;
use storage::TokenStore;
use tracing::debug;

/// State machine behind the dashboard screen
pub struct DashboardScreen {
    loader: DashboardLoader,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    lifetime: ScreenLifetime,
    state: RwLock<DashboardState>,
}

impl DashboardScreen {
    /// Create a new dashboard screen flow
    pub fn new(
        loader: DashboardLoader,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            loader,
            tokens,
            navigator,
            lifetime: ScreenLifetime::new(),
            state: RwLock::new(DashboardState::Loading),
        }
    }

    /// Current render state
    pub fn state(&self) -> DashboardState {
        self.state.read().clone()
    }

    /// Handle for dismissing this screen
    pub fn lifetime(&self) -> ScreenLifetime {
        self.lifetime.clone()
    }

    /// Fetch the dashboard and apply the resulting state
    ///
    /// Re-enters `Loading` first; the terminal state is applied only while
    /// the screen is still mounted.
    pub async fn refresh(&self) {
        *self.state.write() = DashboardState::Loading;

        let next = self.loader.load().await;

        if !self.lifetime.is_mounted() {
            debug!("dashboard result discarded after unmount");
            return;
        }

        *self.state.write() = next;
    }

    /// Log out: clear the stored token, then leave the authenticated area
    ///
    /// Unconditional, and purely local; the server is not told.
    pub async fn logout(&self) {
        self.tokens.clear().await;
        self.navigator.replace(Route::Login);
    }
}
