//! Application credentials issued by the portal.

/// Read access to the consumer credentials of a registered application.
pub trait CredentialsProvider: Send + Sync {
    /// Application (client) identifier.
    fn consumer_id(&self) -> &str;

    /// Application (client) secret.
    fn consumer_secret(&self) -> &str;

    /// Redirect URI registered for the application.
    fn callback_url(&self) -> &str;
}

/// Consumer id, secret and callback URL.
#[derive(Clone)]
pub struct Credentials {
    consumer_id: String,
    consumer_secret: String,
    callback_url: String,
}

impl Credentials {
    /// Creates a new set of credentials.
    #[must_use]
    pub fn new(
        consumer_id: impl Into<String>,
        consumer_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            consumer_id: consumer_id.into(),
            consumer_secret: consumer_secret.into(),
            callback_url: callback_url.into(),
        }
    }
}

impl CredentialsProvider for Credentials {
    fn consumer_id(&self) -> &str {
        &self.consumer_id
    }

    fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    fn callback_url(&self) -> &str {
        &self.callback_url
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_id", &self.consumer_id)
            .field("consumer_secret", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_accessors() {
        let creds = Credentials::new("app.123", "s3cret", "https://app.example.com/cb");
        assert_eq!(creds.consumer_id(), "app.123");
        assert_eq!(creds.consumer_secret(), "s3cret");
        assert_eq!(creds.callback_url(), "https://app.example.com/cb");
    }

    #[test]
    fn test_debug_hides_secret() {
        let creds = Credentials::new("app.123", "s3cret", "https://app.example.com/cb");
        let debug = format!("{creds:?}");
        assert!(debug.contains("app.123"));
        assert!(!debug.contains("s3cret"));
    }
}
