//! Example: exchanging a Bitrix24 authorization code for a token
//!
//! This example demonstrates how to:
//! 1. Configure the Bitrix24 provider for a portal
//! 2. Exchange the authorization code from the consent redirect
//! 3. Refresh the token
//!
//! ## Prerequisites
//!
//! Register a local application on your portal and note its client id and
//! secret. Open `https://<portal>/oauth/authorize/?client_id=<id>` in a browser
//! and copy the `code` parameter from the redirect.
//!
//! ## Running
//!
//! ```bash
//! cargo run --example bitrix24_exchange -- https://example.bitrix24.ru <client_id> <client_secret>
//! ```

use bitrix24_oauth::{
    Bitrix24, Credentials, MemoryStateStore, MemoryTokenStorage, OAuthService, ReqwestHttpClient,
    Scope, ScopeSet,
};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("bitrix24_oauth=debug")
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(portal), Some(client_id), Some(client_secret)) = (args.next(), args.next(), args.next())
    else {
        eprintln!("usage: bitrix24_exchange <portal_uri> <client_id> <client_secret>");
        return Ok(());
    };

    println!("Bitrix24 OAuth2 Example");
    println!("=======================\n");

    let service = OAuthService::new(
        Bitrix24::new(&portal)?,
        Credentials::new(client_id, client_secret, "http://localhost:8080"),
        ScopeSet::new([Scope::Crm, Scope::User]),
        ReqwestHttpClient::new()?,
        MemoryTokenStorage::new(),
        MemoryStateStore::new(),
    );

    println!("Authorization endpoint: {}", service.authorization_endpoint()?);
    println!("Token endpoint:         {}\n", service.access_token_endpoint()?);

    print!("Enter the authorization code from the redirect URL: ");
    io::stdout().flush()?;

    let mut code = String::new();
    io::stdin().read_line(&mut code)?;
    let code = code.trim();

    if code.is_empty() {
        println!("\nNo code entered. Exiting.");
        return Ok(());
    }

    let token = service.request_access_token(code, None).await?;
    println!("\nToken obtained");
    println!("  Lifetime: {:?} seconds", token.lifetime_seconds());
    println!("  End of life: {:?}", token.end_of_life());
    println!("  Has refresh token: {}", token.refresh_token().is_some());
    println!("  Extra params: {}", serde_json::Value::Object(token.extra_params().clone()));

    if token.refresh_token().is_some() {
        let refreshed = service.refresh_access_token(&token).await?;
        println!("\nToken refreshed");
        println!("  Lifetime: {:?} seconds", refreshed.lifetime_seconds());
    }

    Ok(())
}
