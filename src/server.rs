use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use axum::{Extension, Router, routing::get};
use tokio::net::TcpListener;

use crate::{Res, api, spotify::SpotifyClient};

pub struct AppState {
    pub client: SpotifyClient,
    pub features: Vec<String>,
    blank: AtomicBool,
}

impl AppState {
    pub fn new(client: SpotifyClient, features: Vec<String>) -> Self {
        Self {
            client,
            features,
            blank: AtomicBool::new(true),
        }
    }

    /// Returns `true` exactly once: for the first page request after startup.
    pub fn take_blank(&self) -> bool {
        self.blank.swap(false, Ordering::SeqCst)
    }
}

pub fn make_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/favicon.ico", get(api::favicon))
        .route("/", get(api::page))
        .route("/{*path}", get(api::page))
        .layer(Extension(state))
}

pub async fn bind(addr: &str) -> Res<TcpListener> {
    Ok(TcpListener::bind(addr).await?)
}

/// Serves requests until Ctrl-C is pressed.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Res<()> {
    axum::serve(listener, make_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
