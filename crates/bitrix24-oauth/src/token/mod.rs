//! `OAuth2` token types.

mod response;

pub use response::parse_access_token_response;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// When a token stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "at")]
pub enum EndOfLife {
    /// The provider did not report a lifetime.
    Unknown,
    /// The provider reported a lifetime of zero, which means the token does not expire.
    NeverExpires,
    /// The token expires at the given instant.
    At(DateTime<Utc>),
}

/// `OAuth2` access token with metadata.
///
/// A token is assembled once, either by the response parser or through the
/// `with_*` builders, and is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lifetime_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    extra_params: Map<String, Value>,
    end_of_life: EndOfLife,
}

impl Token {
    /// Creates a token with unknown lifetime, no refresh token and no extra parameters.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            lifetime_seconds: None,
            refresh_token: None,
            extra_params: Map::new(),
            end_of_life: EndOfLife::Unknown,
        }
    }

    /// Sets the lifetime in seconds, counted from now.
    ///
    /// `Some(0)` marks the token as never expiring, `None` as unknown.
    #[must_use]
    pub fn with_lifetime(mut self, lifetime_seconds: Option<u64>) -> Self {
        self.end_of_life = match lifetime_seconds {
            None => EndOfLife::Unknown,
            Some(0) => EndOfLife::NeverExpires,
            Some(secs) => {
                let secs = i64::try_from(secs).unwrap_or(i64::MAX);
                let at = Duration::try_seconds(secs)
                    .and_then(|d| Utc::now().checked_add_signed(d))
                    .unwrap_or(DateTime::<Utc>::MAX_UTC);
                EndOfLife::At(at)
            }
        };
        self.lifetime_seconds = lifetime_seconds;
        self
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Sets the provider-specific extra parameters.
    #[must_use]
    pub fn with_extra_params(mut self, extra_params: Map<String, Value>) -> Self {
        self.extra_params = extra_params;
        self
    }

    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the lifetime reported by the provider, in seconds.
    #[must_use]
    pub const fn lifetime_seconds(&self) -> Option<u64> {
        self.lifetime_seconds
    }

    /// Returns the refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns the refresh token if it is present and non-empty.
    #[must_use]
    pub fn usable_refresh_token(&self) -> Option<&str> {
        self.refresh_token().filter(|t| !t.is_empty())
    }

    /// Returns every response field that is not part of the core token contract.
    #[must_use]
    pub const fn extra_params(&self) -> &Map<String, Value> {
        &self.extra_params
    }

    /// Returns when the token stops being valid.
    #[must_use]
    pub const fn end_of_life(&self) -> EndOfLife {
        self.end_of_life
    }

    /// Checks if the token is expired.
    ///
    /// Tokens with unknown or infinite lifetime never report as expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        match self.end_of_life {
            EndOfLife::At(at) => Utc::now() >= at,
            EndOfLife::Unknown | EndOfLife::NeverExpires => false,
        }
    }
}
