//! Token endpoint request construction.

use crate::credentials::CredentialsProvider;
use crate::scope::ScopeSet;
use crate::uri::Uri;

/// `grant_type` value for the authorization code exchange.
pub const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";
/// `grant_type` value for the refresh token exchange.
pub const GRANT_REFRESH_TOKEN: &str = "refresh_token";
/// Application type the portal expects on refresh requests.
const REFRESH_APPLICATION_TYPE: &str = "web_server";

/// Builds the request URI that exchanges an authorization code for a token.
///
/// The base `endpoint` is left untouched. `code` is not validated here.
#[must_use]
pub fn build_authorization_code_request(
    endpoint: &Uri,
    code: &str,
    credentials: &impl CredentialsProvider,
    scopes: &ScopeSet,
) -> Uri {
    let scope = scopes.to_query_value();
    endpoint.with_query_params([
        ("code", code),
        ("client_id", credentials.consumer_id()),
        ("client_secret", credentials.consumer_secret()),
        ("redirect_uri", credentials.callback_url()),
        ("grant_type", GRANT_AUTHORIZATION_CODE),
        ("scope", scope.as_str()),
    ])
}

/// Builds the request URI that exchanges a refresh token for a new token.
///
/// Scope is fixed at grant time, so no `scope` parameter is sent.
#[must_use]
pub fn build_refresh_token_request(
    endpoint: &Uri,
    refresh_token: &str,
    credentials: &impl CredentialsProvider,
) -> Uri {
    endpoint.with_query_params([
        ("grant_type", GRANT_REFRESH_TOKEN),
        ("type", REFRESH_APPLICATION_TYPE),
        ("client_id", credentials.consumer_id()),
        ("client_secret", credentials.consumer_secret()),
        ("refresh_token", refresh_token),
    ])
}
