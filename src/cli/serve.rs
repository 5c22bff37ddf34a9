use std::sync::Arc;

use crate::{
    cli::client_or_exit,
    config, error,
    server::{self, AppState},
    success, warning,
};

pub async fn serve(addr: Option<String>, open: bool) {
    let state = Arc::new(AppState::new(client_or_exit(), config::report_features()));

    let addr = addr.unwrap_or_else(config::server_addr);
    let listener = match server::bind(&addr).await {
        Ok(l) => l,
        Err(e) => error!("Failed to bind {}. Err: {}", addr, e),
    };

    let url = match listener.local_addr() {
        Ok(local) => format!("http://{}", local),
        Err(_) => format!("http://{}", addr),
    };
    success!("Server live - {}", url);

    if open && webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }

    if let Err(e) = server::serve(listener, state).await {
        error!("Server stopped unexpectedly. Err: {}", e);
    }
    success!("Server stopped.");
}
