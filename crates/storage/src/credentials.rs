//! Credential store for the session token
//!
//! The login flow persists an opaque session token under a single well-known
//! key; every authenticated request reads it back, and logout deletes it.
//! Storage failures are deliberately non-fatal at this seam: a failed read is
//! reported as "no token" and a failed write is dropped after logging, since
//! the worst outcome either way is that the user has to log in again.

use crate::kv::KvStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Storage key for the session token.
///
/// Fixed for compatibility with existing installs; changing it silently
/// logs everyone out.
const TOKEN_KEY: &str = "token";

/// Persistent store for the session token
///
/// Implementations must treat every operation as best-effort: `get` returns
/// `None` when the backing store is unavailable, and `set`/`clear` swallow
/// failures. There is no retry and no rollback.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, if any
    async fn get(&self) -> Option<String>;

    /// Persist a token, replacing any previous value
    async fn set(&self, token: &str);

    /// Delete the persisted token
    async fn clear(&self);
}

/// [`TokenStore`] backed by the sled key-value store
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use storage::{KvConfig, KvStore, SledTokenStore, TokenStore};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let kv = Arc::new(KvStore::new(KvConfig::new("shelfmark_kv.db"))?);
/// let tokens = SledTokenStore::new(kv);
///
/// tokens.set("opaque-session-token").await;
/// assert!(tokens.get().await.is_some());
/// # Ok(())
/// # }
/// ```
pub struct SledTokenStore {
    kv: Arc<KvStore>,
}

impl SledTokenStore {
    /// Create a token store over an existing key-value store
    pub fn new(kv: Arc<KvStore>) -> Self {
        Self { kv }
    }

    /// Create a token store over a fresh in-memory database (for testing)
    pub fn in_memory() -> crate::kv::Result<Self> {
        Ok(Self { kv: Arc::new(KvStore::in_memory()?) })
    }
}

#[async_trait]
impl TokenStore for SledTokenStore {
    async fn get(&self) -> Option<String> {
        match self.kv.get::<String>(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!("token read failed, treating as absent: {}", e);
                None
            }
        }
    }

    async fn set(&self, token: &str) {
        if let Err(e) = self.kv.set(TOKEN_KEY, &token) {
            warn!("token write failed: {}", e);
        }
    }

    async fn clear(&self) {
        if let Err(e) = self.kv.remove(TOKEN_KEY) {
            warn!("token delete failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_without_token() {
        let store = SledTokenStore::in_memory().unwrap();
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn test_round_trip_preserves_token() {
        let store = SledTokenStore::in_memory().unwrap();

        store.set("eyJhbGciOiJIUzI1NiJ9.session").await;

        assert_eq!(store.get().await, Some("eyJhbGciOiJIUzI1NiJ9.session".to_string()));
    }

    #[tokio::test]
    async fn test_set_replaces_previous_token() {
        let store = SledTokenStore::in_memory().unwrap();

        store.set("first").await;
        store.set("second").await;

        assert_eq!(store.get().await, Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_clear_removes_token() {
        let store = SledTokenStore::in_memory().unwrap();

        store.set("token").await;
        store.clear().await;

        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn test_clear_without_token_is_noop() {
        let store = SledTokenStore::in_memory().unwrap();
        store.clear().await;
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn test_independent_stores_are_isolated() {
        let store_a = SledTokenStore::in_memory().unwrap();
        let store_b = SledTokenStore::in_memory().unwrap();

        store_a.set("alice").await;

        assert_eq!(store_a.get().await, Some("alice".to_string()));
        assert_eq!(store_b.get().await, None);
    }
}
