//! HTTP transport used for token endpoint calls.

use crate::error::{Error, Result};
use crate::uri::Uri;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use std::future::Future;
use std::time::Duration;

/// User-Agent string used for token requests.
static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A single request to the token endpoint.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully built request URI, query string included.
    pub uri: Uri,
    /// Extra headers required by the provider.
    pub headers: HeaderMap,
    /// Request body; empty for query-string requests.
    pub body: String,
}

impl HttpRequest {
    /// Creates a bodiless request without extra headers.
    #[must_use]
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: String::new(),
        }
    }

    /// Creates a bodiless GET request.
    #[must_use]
    pub fn get(uri: Uri) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Sets the request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

/// Transport that performs a request and hands back the raw response body.
pub trait HttpClient: Send + Sync {
    /// Performs the request and returns the response body.
    ///
    /// Implementations decide how transport failures map onto [`Error`];
    /// the caller propagates them unchanged.
    fn retrieve_response(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Transport settings for [`ReqwestHttpClient`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Total request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: APP_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the User-Agent header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// [`HttpClient`] backed by `reqwest`.
///
/// Non-success statuses are reported as [`Error::UnexpectedStatus`] with the
/// body attached.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates a client with the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn retrieve_response(&self, request: &HttpRequest) -> Result<String> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.uri.as_url().clone())
            .headers(request.headers.clone());
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Token endpoint returned error status");
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
