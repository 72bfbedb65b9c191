//! Token persistence.

use crate::error::{Error, Result};
use crate::token::Token;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Storage for tokens, keyed by service name.
///
/// Methods take `&self`; implementations provide their own synchronization.
pub trait TokenStorage: Send + Sync {
    /// Stores (or replaces) the token for a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to persist the token.
    fn store_access_token(&self, service: &str, token: Token) -> Result<()>;

    /// Retrieves the token for a service, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn retrieve_access_token(&self, service: &str) -> Result<Option<Token>>;

    /// Returns true if a token is stored for the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn has_access_token(&self, service: &str) -> Result<bool> {
        Ok(self.retrieve_access_token(service)?.is_some())
    }

    /// Removes the token for a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to delete the token.
    fn clear_token(&self, service: &str) -> Result<()>;

    /// Removes every stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to delete the tokens.
    fn clear_all_tokens(&self) -> Result<()>;
}

/// In-memory token storage. Contents are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    tokens: Mutex<HashMap<String, Token>>,
}

impl MemoryTokenStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tokens(&self) -> Result<MutexGuard<'_, HashMap<String, Token>>> {
        self.tokens
            .lock()
            .map_err(|_| Error::Storage("token map lock poisoned".into()))
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn store_access_token(&self, service: &str, token: Token) -> Result<()> {
        self.tokens()?.insert(service.to_string(), token);
        tracing::trace!(service, "Stored access token");
        Ok(())
    }

    fn retrieve_access_token(&self, service: &str) -> Result<Option<Token>> {
        Ok(self.tokens()?.get(service).cloned())
    }

    fn clear_token(&self, service: &str) -> Result<()> {
        self.tokens()?.remove(service);
        Ok(())
    }

    fn clear_all_tokens(&self) -> Result<()> {
        self.tokens()?.clear();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_retrieve() {
        let storage = MemoryTokenStorage::new();
        assert!(!storage.has_access_token("Bitrix24").unwrap());

        storage
            .store_access_token("Bitrix24", Token::new("abc"))
            .unwrap();

        assert!(storage.has_access_token("Bitrix24").unwrap());
        let token = storage.retrieve_access_token("Bitrix24").unwrap().unwrap();
        assert_eq!(token.access_token(), "abc");
        assert!(storage.retrieve_access_token("Other").unwrap().is_none());
    }

    #[test]
    fn test_store_replaces() {
        let storage = MemoryTokenStorage::new();
        storage.store_access_token("Bitrix24", Token::new("one")).unwrap();
        storage.store_access_token("Bitrix24", Token::new("two")).unwrap();

        let token = storage.retrieve_access_token("Bitrix24").unwrap().unwrap();
        assert_eq!(token.access_token(), "two");
    }

    #[test]
    fn test_clear() {
        let storage = MemoryTokenStorage::new();
        storage.store_access_token("a", Token::new("1")).unwrap();
        storage.store_access_token("b", Token::new("2")).unwrap();

        storage.clear_token("a").unwrap();
        assert!(!storage.has_access_token("a").unwrap());
        assert!(storage.has_access_token("b").unwrap());

        storage.clear_all_tokens().unwrap();
        assert!(!storage.has_access_token("b").unwrap());
    }
}
