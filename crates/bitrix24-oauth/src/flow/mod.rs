//! Authorization code and refresh token exchange.

pub mod request;

use crate::credentials::CredentialsProvider;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpRequest};
use crate::provider::OAuthProvider;
use crate::scope::ScopeSet;
use crate::state::StateValidator;
use crate::storage::TokenStorage;
use crate::token::Token;
use crate::uri::Uri;
use tracing::instrument;

/// Drives the token exchange for one provider.
///
/// Credentials and scopes are fixed at construction. Every successful call
/// performs exactly one HTTP request and one storage write; a failed call
/// writes nothing.
#[derive(Debug)]
pub struct OAuthService<P, C, H, S, V> {
    provider: P,
    credentials: C,
    scopes: ScopeSet,
    http_client: H,
    storage: S,
    state_validator: V,
}

impl<P, C, H, S, V> OAuthService<P, C, H, S, V>
where
    P: OAuthProvider,
    C: CredentialsProvider,
    H: HttpClient,
    S: TokenStorage,
    V: StateValidator,
{
    /// Creates a new service.
    #[must_use]
    pub const fn new(
        provider: P,
        credentials: C,
        scopes: ScopeSet,
        http_client: H,
        storage: S,
        state_validator: V,
    ) -> Self {
        Self {
            provider,
            credentials,
            scopes,
            http_client,
            storage,
            state_validator,
        }
    }

    /// Returns the name tokens are stored under.
    #[must_use]
    pub fn service_name(&self) -> &str {
        self.provider.service_name()
    }

    /// Returns the provider's consent endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be formed.
    pub fn authorization_endpoint(&self) -> Result<Uri> {
        self.provider.authorization_endpoint()
    }

    /// Returns the provider's token endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be formed.
    pub fn access_token_endpoint(&self) -> Result<Uri> {
        self.provider.access_token_endpoint()
    }

    /// Returns the requested scopes.
    #[must_use]
    pub const fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    /// Returns the token storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the state validator.
    #[must_use]
    pub const fn state_validator(&self) -> &V {
        &self.state_validator
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// If `state` is given it is validated before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAuthorizationCode`] if `code` is empty and
    /// [`Error::StateMismatch`] if the state is rejected, both without any
    /// request. Otherwise returns the
    /// transport's error if the request fails, and a parse error if the
    /// response is malformed or reports a provider error.
    #[instrument(level = "debug", skip_all, fields(service = self.provider.service_name()), err(level = "debug"))]
    pub async fn request_access_token(&self, code: &str, state: Option<&str>) -> Result<Token> {
        if code.is_empty() {
            return Err(Error::MissingAuthorizationCode);
        }
        if let Some(state) = state {
            self.state_validator
                .validate_authorization_state(self.provider.service_name(), state)?;
        }

        tracing::trace!("Exchanging authorization code for token");
        let uri = self
            .provider
            .access_token_request(code, &self.credentials, &self.scopes)?;
        self.exchange(uri).await
    }

    /// Exchanges the refresh token carried by `token` for a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRefreshToken`] without any request if `token`
    /// has no (or an empty) refresh token; otherwise as
    /// [`Self::request_access_token`].
    #[instrument(level = "debug", skip_all, fields(service = self.provider.service_name()), err(level = "debug"))]
    pub async fn refresh_access_token(&self, token: &Token) -> Result<Token> {
        let Some(refresh_token) = token.usable_refresh_token() else {
            return Err(Error::MissingRefreshToken);
        };

        tracing::trace!("Refreshing access token");
        let uri = self
            .provider
            .refresh_token_request(refresh_token, &self.credentials)?;
        self.exchange(uri).await
    }

    async fn exchange(&self, uri: Uri) -> Result<Token> {
        let request = HttpRequest::new(self.provider.token_request_method(), uri)
            .with_headers(self.provider.extra_oauth_headers());

        let body = self.http_client.retrieve_response(&request).await?;
        let token = self.provider.parse_access_token_response(&body)?;

        self.storage
            .store_access_token(self.provider.service_name(), token.clone())?;
        tracing::debug!(
            has_refresh_token = token.refresh_token().is_some(),
            lifetime = token.lifetime_seconds(),
            "Obtained access token"
        );

        Ok(token)
    }
}
