//! # bitrix24-oauth
//!
//! `OAuth2` token exchange for Bitrix24 portals.
//!
//! ## Features
//!
//! - **Authorization code exchange**: turns the code from the consent redirect into a token
//! - **Token refresh**: exchanges a refresh token for a new access token
//! - **In-band errors**: detects `error` responses even when the HTTP status is 200
//! - **Pluggable collaborators**: HTTP transport, token storage and state validation are traits
//!
//! ## Quick Start
//!
//! ```ignore
//! use bitrix24_oauth::{
//!     Bitrix24, Credentials, MemoryStateStore, MemoryTokenStorage, OAuthService,
//!     ReqwestHttpClient, Scope, ScopeSet,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = OAuthService::new(
//!         Bitrix24::new("https://example.bitrix24.ru")?,
//!         Credentials::new("app.123", "secret", "https://app.example.com/callback"),
//!         ScopeSet::new([Scope::Crm, Scope::Task]),
//!         ReqwestHttpClient::new()?,
//!         MemoryTokenStorage::new(),
//!         MemoryStateStore::new(),
//!     );
//!
//!     // After the user authorizes, exchange the code from the redirect
//!     let token = service.request_access_token("code_from_redirect", None).await?;
//!     println!("Access token: {}", token.access_token());
//!
//!     // Later, when it expires
//!     if token.is_expired() {
//!         let token = service.refresh_access_token(&token).await?;
//!         println!("Refreshed: {}", token.access_token());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod credentials;
mod error;
pub mod flow;
pub mod http;
pub mod provider;
pub mod scope;
pub mod state;
pub mod storage;
pub mod token;
pub mod uri;

pub use credentials::{Credentials, CredentialsProvider};
pub use error::{Error, Result};
pub use flow::OAuthService;
pub use http::{HttpClient, HttpConfig, HttpRequest, ReqwestHttpClient};
pub use provider::{Bitrix24, OAuthProvider};
pub use scope::{Scope, ScopeSet};
pub use state::{MemoryStateStore, StateValidator};
pub use storage::{MemoryTokenStorage, TokenStorage};
pub use token::{EndOfLife, Token};
pub use uri::Uri;

/// [`OAuthService`] specialised for a Bitrix24 portal.
pub type Bitrix24Service<H, S, V> = OAuthService<Bitrix24, Credentials, H, S, V>;
