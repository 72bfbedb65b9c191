//! Error types for `OAuth2` token exchange.

/// Result type alias for `OAuth2` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `OAuth2` error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The `state` returned with the authorization code does not match the stored one.
    #[error("Authorization state mismatch")]
    StateMismatch,

    /// The authorization code to exchange is empty.
    #[error("Authorization code is empty")]
    MissingAuthorizationCode,

    /// Refresh was requested for a token that carries no refresh token.
    #[error("No refresh token available")]
    MissingRefreshToken,

    /// The token endpoint answered with a body that is not the expected JSON object.
    #[error("Unable to parse token response: {0}")]
    MalformedResponse(String),

    /// The provider reported an error inside the response body.
    #[error("Error in retrieving token: \"{error}\"")]
    Provider {
        /// Literal value of the `error` field.
        error: String,
        /// Value of `error_description`, if the provider sent one.
        description: Option<String>,
    },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint answered with a non-success HTTP status.
    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Token storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),
}

impl Error {
    /// Creates a provider error from the `error` and optional `error_description` fields.
    #[must_use]
    pub fn provider_error(error: impl Into<String>, description: Option<String>) -> Self {
        Self::Provider {
            error: error.into(),
            description,
        }
    }

    /// Creates a malformed-response error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_message() {
        let err = Error::provider_error("invalid_grant", None);
        assert_eq!(err.to_string(), "Error in retrieving token: \"invalid_grant\"");
    }

    #[test]
    fn test_missing_code_message() {
        assert_eq!(
            Error::MissingAuthorizationCode.to_string(),
            "Authorization code is empty"
        );
    }

    #[test]
    fn test_malformed_message() {
        let err = Error::malformed("not an object");
        assert_eq!(
            err.to_string(),
            "Unable to parse token response: not an object"
        );
    }
}
