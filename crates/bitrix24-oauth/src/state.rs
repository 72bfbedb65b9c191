//! Authorization state (CSRF) validation.

use crate::error::{Error, Result};
use std::collections::HashMap;
use subtle::ConstantTimeEq;
use std::sync::{Mutex, MutexGuard};

/// Checks the `state` value returned with an authorization code.
pub trait StateValidator: Send + Sync {
    /// Validates `state` against the value issued for `service`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateMismatch`] if the state does not match.
    fn validate_authorization_state(&self, service: &str, state: &str) -> Result<()>;
}

/// Keeps the last issued state per service in memory.
///
/// A service with no recorded state rejects every value.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    states: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the state sent along with the authorization redirect.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn store_authorization_state(&self, service: &str, state: impl Into<String>) -> Result<()> {
        self.states()?.insert(service.to_string(), state.into());
        Ok(())
    }

    /// Returns the recorded state for a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn retrieve_authorization_state(&self, service: &str) -> Result<Option<String>> {
        Ok(self.states()?.get(service).cloned())
    }

    /// Forgets the recorded state for a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn clear_authorization_state(&self, service: &str) -> Result<()> {
        self.states()?.remove(service);
        Ok(())
    }

    fn states(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.states
            .lock()
            .map_err(|_| Error::Storage("state map lock poisoned".into()))
    }
}

impl StateValidator for MemoryStateStore {
    fn validate_authorization_state(&self, service: &str, state: &str) -> Result<()> {
        match self.states()?.get(service) {
            Some(expected) if bool::from(expected.as_bytes().ct_eq(state.as_bytes())) => Ok(()),
            _ => {
                tracing::debug!(service, "Authorization state mismatch");
                Err(Error::StateMismatch)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_state() {
        let store = MemoryStateStore::new();
        store.store_authorization_state("Bitrix24", "s-1").unwrap();
        store.validate_authorization_state("Bitrix24", "s-1").unwrap();
    }

    #[test]
    fn test_mismatched_state() {
        let store = MemoryStateStore::new();
        store.store_authorization_state("Bitrix24", "s-1").unwrap();
        let err = store
            .validate_authorization_state("Bitrix24", "s-2")
            .unwrap_err();
        assert!(matches!(err, Error::StateMismatch));
    }

    #[test]
    fn test_prefix_of_state_is_rejected() {
        let store = MemoryStateStore::new();
        store.store_authorization_state("Bitrix24", "s-123").unwrap();
        for forged in ["", "s-1", "s-1234", "S-123"] {
            let err = store
                .validate_authorization_state("Bitrix24", forged)
                .unwrap_err();
            assert!(matches!(err, Error::StateMismatch), "{forged:?} accepted");
        }
    }

    #[test]
    fn test_missing_state_is_rejected() {
        let store = MemoryStateStore::new();
        let err = store
            .validate_authorization_state("Bitrix24", "anything")
            .unwrap_err();
        assert!(matches!(err, Error::StateMismatch));
    }

    #[test]
    fn test_clear_state() {
        let store = MemoryStateStore::new();
        store.store_authorization_state("Bitrix24", "s-1").unwrap();
        assert_eq!(
            store.retrieve_authorization_state("Bitrix24").unwrap().as_deref(),
            Some("s-1")
        );
        store.clear_authorization_state("Bitrix24").unwrap();
        assert!(store.retrieve_authorization_state("Bitrix24").unwrap().is_none());
    }
}
