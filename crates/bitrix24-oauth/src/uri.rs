//! Immutable endpoint URIs.

use crate::error::Result;
use std::fmt;
use url::Url;

/// An absolute URI that is never modified in place.
///
/// Adding a query parameter returns a new value, so a shared endpoint can be
/// used as the base for any number of derived requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(Url);

impl Uri {
    /// Parses an absolute URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid absolute URL.
    pub fn parse(input: impl AsRef<str>) -> Result<Self> {
        Ok(Self(Url::parse(input.as_ref())?))
    }

    /// Returns a copy of this URI with `key=value` appended to the query string.
    #[must_use]
    pub fn with_query_param(&self, key: &str, value: &str) -> Self {
        let mut url = self.0.clone();
        url.query_pairs_mut().append_pair(key, value);
        Self(url)
    }

    /// Returns a copy of this URI with every pair appended, in order.
    #[must_use]
    pub fn with_query_params<'a>(
        &self,
        params: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut url = self.0.clone();
        url.query_pairs_mut().extend_pairs(params);
        Self(url)
    }

    /// Returns the decoded query parameters, in order.
    #[must_use]
    pub fn query_params(&self) -> Vec<(String, String)> {
        self.0
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Returns the URI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

impl From<Url> for Uri {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
