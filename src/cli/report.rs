use std::path::PathBuf;

use crate::{
    cli::{client_or_exit, spinner},
    config, error, management, report as render, success, utils, warning,
};

/// Writes the report page for `artist` to `output` or the default location.
///
/// The file holds exactly what the server would answer for the same name,
/// including the not-found page when Spotify has no match.
pub async fn report(artist: String, output: Option<PathBuf>, open: bool) {
    let name = utils::artist_name(Some(artist.as_str()), "");
    let client = client_or_exit();
    let features = config::report_features();

    let pb = spinner(format!("Fetching top tracks of {}...", name));
    let result = management::lookup(&client, &name).await;
    pb.finish_and_clear();

    let html = match result {
        Ok(Some(report)) => {
            success!(
                "Found {} with {} top tracks.",
                report.artist.name,
                report.tracks.len()
            );
            render::render_report_page(&report, &features)
        }
        Ok(None) => {
            warning!("No artist found for {}.", name);
            render::render_error_page()
        }
        Err(e) => error!("Failed to look up {}. Err: {}", name, e),
    };

    let path = output.unwrap_or_else(|| default_report_path(&name));
    if let Some(parent) = path.parent() {
        if let Err(e) = async_fs::create_dir_all(parent).await {
            error!("Cannot create {}. Err: {}", parent.display(), e);
        }
    }
    if let Err(e) = async_fs::write(&path, html).await {
        error!("Cannot write {}. Err: {}", path.display(), e);
    }
    success!("Report written to {}", path.display());

    if open && webbrowser::open(&path.to_string_lossy()).is_err() {
        warning!("Failed to open browser. Open {} manually.", path.display());
    }
}

pub fn default_report_path(name: &str) -> PathBuf {
    let mut path = config::data_dir();
    path.push("reports");
    path.push(format!("{}.html", utils::slug(name)));
    path
}
