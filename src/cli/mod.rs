//! # CLI Module
//!
//! User-facing commands of the `tophits` binary. Each command wires the
//! configuration, the Spotify client and the renderer together and reports
//! progress with the crate's console macros.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the local report server (the default when no command is given)
//! - [`report`] - Writes a report page for one artist to an HTML file
//! - [`features`] - Prints an artist's audio features as a terminal table
//!
//! ## Usage Patterns
//!
//! ```bash
//! tophits                                  # serve on 127.0.0.1:8000
//! tophits serve --addr 0.0.0.0:8080 --open # serve elsewhere and open a browser
//! tophits report "nina simone" --open      # write and open a report file
//! tophits features radiohead               # quick look in the terminal
//! ```
//!
//! ## Error Handling
//!
//! Missing credentials and failed lookups are fatal and end the process via
//! [`crate::error!`]. An artist that cannot be found is not an error: the
//! report command writes the not-found page and the features command prints
//! a warning.

mod features;
mod report;
mod serve;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, spotify::SpotifyClient};

pub use features::feature_table;
pub use features::features;
pub use report::default_report_path;
pub use report::report;
pub use serve::serve;

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

fn client_or_exit() -> SpotifyClient {
    match SpotifyClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    }
}
