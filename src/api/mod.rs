//! # API Module
//!
//! HTTP handlers of the report server.
//!
//! ## Endpoints
//!
//! - [`page`] - Every path not listed below. The very first request after
//!   startup gets the blank search form; every later request is read as an
//!   artist submission (`?artist=...` or the path itself) and answered with
//!   the report, or with the not-found message when Spotify has no match.
//! - [`health`] - `GET /health`, status and version for monitoring.
//! - [`favicon`] - `GET /favicon.ico`, an empty response so browsers asking
//!   for an icon do not trigger an artist lookup.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use tophits::server::{AppState, make_app};
//!
//! let app = make_app(Arc::new(AppState::new(client, features)));
//! ```

mod health;
mod page;

pub use health::favicon;
pub use health::health;
pub use page::PageError;
pub use page::page;
