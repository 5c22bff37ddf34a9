//! # Spotify Integration Module
//!
//! This module is the integration layer between the report generator and the
//! Spotify Web API. It authenticates with the client-credentials grant and wraps
//! the three read-only endpoints a report needs.
//!
//! ## Architecture
//!
//! ```text
//! Request Handler / CLI
//!          ↓
//! management::lookup (Feature Cache)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (client credentials)
//!     ├── Artist Operations (search, top tracks)
//!     └── Audio Features
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Client-credentials token exchange
//! - `GET /search` - Artist search
//! - `GET /artists/{id}/top-tracks` - An artist's top tracks in a market
//! - `GET /audio-features` - Audio features for several tracks
//!
//! ## Error Handling
//!
//! Every request goes through [`SpotifyClient::get_json`], which retries a
//! bounded number of times:
//! - **429 Too Many Requests**: waits for the `Retry-After` header
//! - **502 Bad Gateway**: waits ten seconds
//! - **401 Unauthorized**: drops the cached token and requests a new one
//!
//! Everything else is propagated to the caller as [`crate::Res`].
//!
//! ## Usage
//!
//! ```rust
//! let client = SpotifyClient::from_env()?;
//! if let Some(artist) = client.search_artist("Daft Punk").await? {
//!     let tracks = client.top_tracks(&artist.id).await?;
//! }
//! ```

pub mod artists;
pub mod auth;
pub mod features;

use std::time::Duration;

use reqwest::{
    Client, StatusCode,
    header::{HeaderMap, RETRY_AFTER},
};
use serde::de::DeserializeOwned;
use tokio::{sync::Mutex, time::sleep};

use crate::{Res, config, management::TokenManager, types::Credentials, warning};

const MAX_RETRIES: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const DEFAULT_RETRY_AFTER: u64 = 5;
const MAX_RETRY_AFTER: u64 = 60;

/// Base URLs and market used by a [`SpotifyClient`].
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Web API base URL, e.g. `https://api.spotify.com/v1`
    pub api_url: String,
    /// Token endpoint, e.g. `https://accounts.spotify.com/api/token`
    pub token_url: String,
    /// Market used for top-track lookups
    pub market: String,
}

impl Endpoints {
    pub fn from_env() -> Self {
        Self {
            api_url: config::spotify_apiurl(),
            token_url: config::spotify_apitoken_url(),
            market: config::spotify_market(),
        }
    }
}

/// Spotify Web API client authenticated with application credentials.
///
/// The client owns a connection pool and an in-memory [`TokenManager`], so a
/// single instance should be shared (behind an `Arc`) by all requests.
pub struct SpotifyClient {
    http: Client,
    credentials: Credentials,
    endpoints: Endpoints,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(credentials: Credentials, endpoints: Endpoints) -> Self {
        Self {
            http: Client::new(),
            credentials,
            endpoints,
            tokens: Mutex::new(TokenManager::new()),
        }
    }

    /// Builds a client from the `SPOTIFY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Fails when the client ID or secret is missing.
    pub fn from_env() -> Res<Self> {
        let credentials = Credentials {
            client_id: config::spotify_client_id()?,
            client_secret: config::spotify_client_secret()?,
        };
        Ok(Self::new(credentials, Endpoints::from_env()))
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns a valid access token, requesting a new one when the cached
    /// token is missing or about to expire.
    pub(crate) async fn access_token(&self) -> Res<String> {
        let mut tokens = self.tokens.lock().await;
        if let Some(token) = tokens.valid_token() {
            return Ok(token.to_string());
        }

        let token =
            auth::request_token(&self.http, &self.endpoints.token_url, &self.credentials).await?;
        let access_token = token.access_token.clone();
        tokens.store(token);
        Ok(access_token)
    }

    async fn invalidate_token(&self) {
        self.tokens.lock().await.clear();
    }

    /// Performs an authenticated GET against the Web API and decodes the
    /// JSON body.
    ///
    /// # Arguments
    ///
    /// * `path` - Endpoint path relative to the API base URL, e.g. `/search`
    /// * `query` - Query parameters, URL-encoded by reqwest
    ///
    /// # Retry Logic
    ///
    /// Up to three retries for 429 (honoring `Retry-After`, capped at a
    /// minute), 502 (ten second
    /// delay) and 401 (fresh token). Other error statuses are returned
    /// immediately.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Res<T> {
        let url = format!("{}{}", self.endpoints.api_url.trim_end_matches('/'), path);
        let mut attempts = 0;

        loop {
            let token = self.access_token().await?;
            let response = self
                .http
                .get(&url)
                .query(query)
                .bearer_auth(token)
                .send()
                .await?;

            let status = response.status();
            if attempts < MAX_RETRIES {
                match status {
                    StatusCode::TOO_MANY_REQUESTS => {
                        attempts += 1;
                        let wait = retry_after(response.headers());
                        warning!("Rate limited by Spotify, retrying in {}s", wait.as_secs());
                        sleep(wait).await;
                        continue;
                    }
                    StatusCode::BAD_GATEWAY => {
                        attempts += 1;
                        sleep(BAD_GATEWAY_DELAY).await;
                        continue;
                    }
                    StatusCode::UNAUTHORIZED => {
                        attempts += 1;
                        self.invalidate_token().await;
                        continue;
                    }
                    _ => {}
                }
            }

            let response = response.error_for_status()?;
            return Ok(response.json::<T>().await?);
        }
    }
}

fn retry_after(headers: &HeaderMap) -> Duration {
    let secs = headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER);
    Duration::from_secs(secs.min(MAX_RETRY_AFTER))
}
