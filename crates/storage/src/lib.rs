//! Storage layer for Shelfmark
//!
//! This crate provides the persistent key-value store and the credential
//! store that holds the session token between app launches.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod credentials;
pub mod kv;

pub use credentials::{SledTokenStore, TokenStore};
pub use kv::{KvConfig, KvStore};
