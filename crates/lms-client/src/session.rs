//! In-memory session context
//!
//! The session is an explicit value handed to whoever needs it rather than
//! ambient global state; two sessions backed by two credential stores can
//! coexist in one process.

use serde::{Deserialize, Serialize};

/// Role string the server uses for staff accounts
pub const LIBRARIAN_ROLE: &str = "librarian";

/// An authenticated session
///
/// Created by a successful login. The token is the only part that outlives
/// the process (via the credential store); the role is evaluated once at
/// login time to gate dashboard access and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session token issued by the server
    pub token: String,
    /// Role reported in the login response, empty if the server sent none
    pub role: String,
}

impl Session {
    /// Create a new session
    pub fn new(token: impl Into<String>, role: impl Into<String>) -> Self {
        Self { token: token.into(), role: role.into() }
    }

    /// Whether this session belongs to a librarian (case-insensitive)
    pub fn is_librarian(&self) -> bool {
        self.role.to_lowercase() == LIBRARIAN_ROLE
    }
}
