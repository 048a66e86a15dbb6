//! Posting library - private-post audience selection and image link rewriting.
//!
//! This module exposes every component for the server binary and for tests:
//!
//! - `visibility`: reacting to the visibility control
//! - `populate`: filling the user selector from the author endpoints
//! - `resolver`: replacing bare ids with profile display names
//! - `image_links`: finding local markdown image links to rewrite
//! - `client`: the author endpoint client
//! - `templates` / `handlers`: the HTML and JSON surface

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

pub mod client;
pub mod config;
pub mod handlers;
pub mod image_links;
pub mod labels;
pub mod models;
pub mod populate;
pub mod resolver;
pub mod templates;
pub mod visibility;

#[cfg(test)]
mod test_support;

use client::{AuthorSource, ClientError, HttpAuthorSource};
use config::{Config, STATIC_DIR};
use populate::UserSelectorPopulator;

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub populator: Arc<UserSelectorPopulator>,
}

impl AppState {
    /// State backed by the HTTP author endpoints named in `config`.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let source = Arc::new(HttpAuthorSource::new(config)?);
        Ok(Self::with_source(config, source))
    }

    pub fn with_source(config: &Config, source: Arc<dyn AuthorSource>) -> Self {
        Self {
            populator: Arc::new(UserSelectorPopulator::new(source, config.label_mode)),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn app(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/create_post", get(handlers::create_post_page))
        .route("/api/visible-for", get(handlers::visible_for_api))
        .route("/api/image-links", post(handlers::image_links_api))
        .with_state(state);

    if Path::new(STATIC_DIR).is_dir() {
        router.nest_service("/static", ServeDir::new(STATIC_DIR))
    } else {
        router
    }
}

// Re-export commonly used types
pub use models::{
    AuthorEntry, AuthorProfile, ContainerVisibility, ImageLinkRecord, PostForm, SelectorOption,
    SharedForm, UserSelector, Visibility,
};

pub use labels::{abbreviate_uid, author_label, author_name, resolved_label, NO_NAME};

pub use image_links::{extract_image_links, image_link_records};

pub use populate::{descriptive_options, identifier_options, PopulateOutcome, PopulateTask};

pub use resolver::{
    BatchCanceller, DisplayNameResolver, LookupOutcome, OptionKey, ResolutionBatch,
    ResolutionSummary,
};

pub use visibility::visibility_changed;

pub use config::{ConfigError, LabelMode};
