//! `OAuth2` provider capabilities.

use crate::credentials::CredentialsProvider;
use crate::error::{Error, Result};
use crate::flow::request::{build_authorization_code_request, build_refresh_token_request};
use crate::scope::ScopeSet;
use crate::token::{Token, parse_access_token_response};
use crate::uri::Uri;
use reqwest::Method;
use reqwest::header::HeaderMap;
use url::Url;

/// Provider-specific parts of the token exchange.
///
/// The generic exchange in [`crate::OAuthService`] drives these hooks; a
/// provider only describes its endpoints, request shapes and response format.
pub trait OAuthProvider: Send + Sync {
    /// Name the provider's tokens are stored under.
    fn service_name(&self) -> &str;

    /// Endpoint the user is sent to for consent.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be formed.
    fn authorization_endpoint(&self) -> Result<Uri>;

    /// Endpoint that issues tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be formed.
    fn access_token_endpoint(&self) -> Result<Uri>;

    /// Builds the request that exchanges an authorization code.
    ///
    /// # Errors
    ///
    /// Returns an error if the token endpoint cannot be formed.
    fn access_token_request<C: CredentialsProvider>(
        &self,
        code: &str,
        credentials: &C,
        scopes: &ScopeSet,
    ) -> Result<Uri> {
        Ok(build_authorization_code_request(
            &self.access_token_endpoint()?,
            code,
            credentials,
            scopes,
        ))
    }

    /// Builds the request that exchanges a refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token endpoint cannot be formed.
    fn refresh_token_request<C: CredentialsProvider>(
        &self,
        refresh_token: &str,
        credentials: &C,
    ) -> Result<Uri> {
        Ok(build_refresh_token_request(
            &self.access_token_endpoint()?,
            refresh_token,
            credentials,
        ))
    }

    /// Parses a token endpoint response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is malformed or reports a provider error.
    fn parse_access_token_response(&self, body: &str) -> Result<Token> {
        parse_access_token_response(body)
    }

    /// HTTP method used for token requests.
    fn token_request_method(&self) -> Method {
        Method::POST
    }

    /// Extra headers sent with token requests.
    fn extra_oauth_headers(&self) -> HeaderMap {
        HeaderMap::new()
    }
}

/// Bitrix24 portal, addressed by its base API URI (e.g. `https://example.bitrix24.ru`).
#[derive(Debug, Clone)]
pub struct Bitrix24 {
    base_api_uri: Url,
}

impl Bitrix24 {
    /// Name tokens are stored under.
    pub const SERVICE_NAME: &'static str = "Bitrix24";

    /// Creates a provider for the given portal.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is invalid or cannot carry a path.
    pub fn new(base_api_uri: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(base_api_uri.as_ref())?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "base API URI cannot be a base: {url}"
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(Error::InvalidConfig(format!(
                "base API URI must not carry a query or fragment: {url}"
            )));
        }
        Ok(Self { base_api_uri: url })
    }

    /// Returns the portal's base API URI.
    #[must_use]
    pub const fn base_api_uri(&self) -> &Url {
        &self.base_api_uri
    }

    fn endpoint(&self, path: &str) -> Result<Uri> {
        let base = self.base_api_uri.as_str().trim_end_matches('/');
        Uri::parse(format!("{base}{path}"))
    }
}

impl OAuthProvider for Bitrix24 {
    fn service_name(&self) -> &str {
        Self::SERVICE_NAME
    }

    fn authorization_endpoint(&self) -> Result<Uri> {
        self.endpoint("/oauth/authorize/")
    }

    fn access_token_endpoint(&self) -> Result<Uri> {
        self.endpoint("/oauth/token/")
    }

    fn token_request_method(&self) -> Method {
        Method::GET
    }
}
