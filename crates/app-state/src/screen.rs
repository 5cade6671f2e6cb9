//! Screen lifetime tracking
//!
//! A fetch can outlive the screen that started it. The lifetime handle
//! lets a flow check, after an await, whether anyone still wants the
//! result; a dismissed screen's result is discarded instead of being
//! applied to state nobody renders anymore.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared handle tracking whether a screen is still mounted
#[derive(Debug, Clone)]
pub struct ScreenLifetime {
    mounted: Arc<AtomicBool>,
}

impl ScreenLifetime {
    /// Create a lifetime for a freshly mounted screen
    pub fn new() -> Self {
        Self { mounted: Arc::new(AtomicBool::new(true)) }
    }

    /// Whether the screen is still mounted
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Mark the screen as dismissed
    ///
    /// Irreversible; a remount is a new screen with a new lifetime.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

impl Default for ScreenLifetime {
    fn default() -> Self {
        Self::new()
    }
}
