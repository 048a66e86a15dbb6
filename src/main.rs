//! Posting server - renders the post-creation form against a social server.
//!
//! The application is organized into the following modules:
//!
//! - `config`: defaults and environment overrides
//! - `client`: author endpoint client
//! - `visibility`, `populate`, `resolver`: the user selector
//! - `image_links`: markdown image link rewriting
//! - `handlers` / `templates`: HTTP routes and HTML

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use posting::config::{Config, LabelMode};
use posting::{app, AppState};

// ============================================================================
// Main
// ============================================================================

fn init_logging(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let bind_addr = config.bind_addr;
    let state = match AppState::new(&config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!(error = %e, "failed to build author client");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%bind_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!("Posting server running at http://{}", bind_addr);
    tracing::info!("Author endpoints: {}", config.upstream);
    match config.label_mode {
        LabelMode::Descriptive => tracing::info!("Labels: name fields from /author"),
        LabelMode::ResolveProfiles => {
            tracing::info!("Labels: profile lookups for /author/available/")
        }
    }

    if let Err(e) = axum::serve(listener, app(state)).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
