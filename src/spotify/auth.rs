use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    Res,
    types::{Credentials, Token, TokenResponse},
};

/// Requests an application access token using the client-credentials grant.
///
/// Sends the client ID and secret as an HTTP Basic `Authorization` header
/// together with `grant_type=client_credentials`. The resulting token grants
/// access to public catalog data only (search, tracks, audio features), which
/// is all a report needs; no user authorization or browser round-trip is
/// involved.
///
/// # Arguments
///
/// * `http` - Shared HTTP client
/// * `token_url` - Token endpoint, usually `https://accounts.spotify.com/api/token`
/// * `credentials` - Application client ID and secret
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Token)` - Access token with its lifetime and the time it was obtained
/// - `Err(_)` - Network error, rejected credentials or a malformed response
///
/// # Example
///
/// ```
/// let token = request_token(&Client::new(), &config::spotify_apitoken_url(), &credentials).await?;
/// println!("Token expires in {} seconds", token.expires_in);
/// ```
pub async fn request_token(
    http: &Client,
    token_url: &str,
    credentials: &Credentials,
) -> Res<Token> {
    let res = http
        .post(token_url)
        .header(AUTHORIZATION, basic_auth_header(credentials))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?
        .error_for_status()?;

    let body: TokenResponse = res.json().await?;

    Ok(Token {
        access_token: body.access_token,
        expires_in: body.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Builds the `Basic base64(client_id:client_secret)` header value.
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}
