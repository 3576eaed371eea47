//! Rotating authorization credential
//!
//! The API hands out a fresh credential in the `Authorization` header of each
//! response and expects it on the next request. The store keeps the latest one.
//!
//! Concurrent calls on one client share the store. Reads and writes are
//! atomic, but two in-flight calls may still attach the same credential; the
//! last response to arrive wins. Network calls are never serialized here.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// Shared, in-memory holder of the current credential
#[derive(Clone, Default)]
pub struct CredentialStore {
    current: Arc<RwLock<String>>,
}

impl CredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a credential
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            current: Arc::new(RwLock::new(value.into())),
        }
    }

    /// Last captured credential, empty if none yet
    pub fn read(&self) -> String {
        self.current.read().clone()
    }

    /// Replace the credential unconditionally
    pub fn write(&self, value: impl Into<String>) {
        *self.current.write() = value.into();
    }

    /// True until a credential is seeded or captured
    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_empty() { "empty" } else { "set" };
        f.debug_struct("CredentialStore")
            .field("current", &state)
            .finish()
    }
}
