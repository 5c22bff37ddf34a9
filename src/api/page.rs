use std::{collections::HashMap, error::Error, fmt, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

use crate::{info, management, report, server::AppState, utils, warning};

/// Serves the search form on the first request and reports afterwards.
pub async fn page(
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Html<String>, PageError> {
    if state.take_blank() {
        return Ok(Html(report::render_form_page()));
    }

    let name = utils::artist_name(params.get("artist").map(String::as_str), uri.path());
    info!("Artist name: {}", name);

    match management::lookup(&state.client, &name).await {
        Ok(Some(found)) => Ok(Html(report::render_report_page(&found, &state.features))),
        Ok(None) => Ok(Html(report::render_error_page())),
        Err(e) => {
            warning!("Lookup for {} failed: {}", name, e);
            Err(PageError(e))
        }
    }
}

/// A lookup that failed for reasons other than "artist not found".
#[derive(Debug)]
pub struct PageError(pub Box<dyn Error + Send + Sync>);

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(report::render_failure_page()),
        )
            .into_response()
    }
}
