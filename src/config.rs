//! Configuration management for the report server.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, endpoints, the server address
//! and the list of audio features shown in a report.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::utils;

/// Audio features charted when `REPORT_FEATURES` is not set.
pub const DEFAULT_FEATURES: [&str; 9] = [
    "acousticness",
    "danceability",
    "energy",
    "liveness",
    "key",
    "valence",
    "tempo",
    "mode",
    "time_signature",
];

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_MARKET: &str = "US";

/// Returns the application's directory inside the platform data directory.
///
/// - Linux: `~/.local/share/tophits`
/// - macOS: `~/Library/Application Support/tophits`
/// - Windows: `%LOCALAPPDATA%/tophits`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tophits");
    path
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the data directory if it doesn't exist. A missing `.env` file is
/// not an error since every variable may also come from the process
/// environment; a present but unreadable file is.
///
/// # Errors
///
/// This function will return an error if:
/// - The data directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
///
/// # Example
///
/// ```
/// use tophits::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the address the report server binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:8000`.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
///
/// # Errors
///
/// Returns an error message if the variable is not set or empty.
pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable. Together
/// with the client ID it is exchanged for an access token using the
/// client-credentials grant.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
///
/// # Errors
///
/// Returns an error message if the variable is not set or empty.
pub fn spotify_client_secret() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, defaulting to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the Spotify token endpoint URL.
///
/// Reads `SPOTIFY_API_TOKEN_URL`, defaulting to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the market (ISO 3166-1 alpha-2 country code) used for top tracks.
///
/// Reads `SPOTIFY_MARKET`, defaulting to `US`.
pub fn spotify_market() -> String {
    env::var("SPOTIFY_MARKET").unwrap_or_else(|_| DEFAULT_MARKET.to_string())
}

/// Returns the audio features charted in a report, in display order.
///
/// Reads the comma-separated `REPORT_FEATURES` variable through
/// [`parse_features`]. Falls back to [`DEFAULT_FEATURES`] when the variable is
/// unset or yields no usable names.
///
/// # Example
///
/// ```
/// // REPORT_FEATURES=tempo,key
/// assert_eq!(report_features(), vec!["tempo", "key"]);
/// ```
pub fn report_features() -> Vec<String> {
    env::var("REPORT_FEATURES")
        .map(|raw| parse_features(&raw))
        .unwrap_or_else(|_| default_features())
}

/// Parses a comma-separated feature list.
///
/// Names are lower-cased. Blank entries and names that are not plain
/// identifiers are dropped since feature names end up in element ids and
/// JavaScript function names. Duplicates keep their first position.
pub fn parse_features(raw: &str) -> Vec<String> {
    let mut features: Vec<String> = Vec::new();
    for name in raw.split(',').map(|n| n.trim().to_ascii_lowercase()) {
        if utils::is_feature_name(&name) && !features.contains(&name) {
            features.push(name);
        }
    }

    if features.is_empty() {
        return default_features();
    }
    features
}

pub fn default_features() -> Vec<String> {
    DEFAULT_FEATURES.iter().map(|f| f.to_string()).collect()
}

fn required(name: &str) -> Result<String, String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!(
            "{} must be set (see {})",
            name,
            data_dir().join(".env.example").display()
        )),
    }
}
