//! Top Ten Hits Analytics
//!
//! This library looks up an artist on Spotify, collects the audio features of
//! their top tracks and renders an HTML report with preview players and
//! Google Charts bar graphs. The report is served by a small local HTTP server
//! or written to a file from the command line.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the report page and health checks
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token caching and the per-request feature cache
//! - `report` - HTML and chart JavaScript rendering
//! - `server` - Router construction and the HTTP server loop
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Text helpers shared by the renderer and the handlers
//!
//! # Example
//!
//! ```
//! use tophits::{config, management, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> tophits::Res<()> {
//!     config::load_env().await?;
//!     let client = SpotifyClient::from_env()?;
//!     let report = management::lookup(&client, "Radiohead").await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod report;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. The Send + Sync bounds let the
/// error cross await points inside axum handlers.
///
/// # Example
///
/// ```
/// use tophits::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Artist name: {}", name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Server live at {}", addr);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal errors in the command-line entry points. Request
/// handlers report failures with [`warning!`] instead so the server keeps
/// running.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Lookup for {} failed: {}", name, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
