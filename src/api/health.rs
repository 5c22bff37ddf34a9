use std::sync::Arc;

use axum::{Extension, http::StatusCode, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

/// Liveness check. Reports the charted features so a misconfigured
/// `REPORT_FEATURES` shows up without rendering a report.
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "features": state.features
    }))
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
