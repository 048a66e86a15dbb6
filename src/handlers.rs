//! HTTP route handlers.
//!
//! The post form is rendered server-side: changing the visibility control
//! resubmits the form, and the handler applies the change, waits for the
//! selector to fill, and renders the result.

use crate::image_links::extract_image_links;
use crate::models::{lock_form, PostForm, SelectorOption, Visibility};
use crate::populate::PopulateTask;
use crate::templates::{base_html, render_post_form};
use crate::visibility::visibility_changed;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: error.into() })).into_response()
}

/// Await a populate task and any lookups it started. Returns a message
/// suitable for the user when the author list could not be loaded.
async fn settle(task: PopulateTask) -> Result<(), String> {
    match task.await {
        Ok(Ok(outcome)) => {
            if let Some(batch) = outcome.resolution {
                let summary = batch.wait_all().await;
                if summary.failed > 0 {
                    tracing::info!(failed = summary.failed, "some display names stay unresolved");
                }
            }
            Ok(())
        }
        Ok(Err(e)) => Err(format!("Could not load authors: {}", e)),
        Err(e) => {
            tracing::error!(error = %e, "populate task did not complete");
            Err("Could not load authors".to_string())
        }
    }
}

// ============================================================================
// Post Form
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CreatePostQuery {
    pub visibility: Option<String>,
    #[serde(default)]
    pub selected: Vec<String>,
}

pub async fn create_post_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CreatePostQuery>,
) -> Html<String> {
    let form = PostForm::shared();
    let value = query
        .visibility
        .unwrap_or_else(|| Visibility::default().to_string());
    let selected = (!query.selected.is_empty()).then_some(query.selected);

    let notice = match visibility_changed(&form, &value, selected, &state.populator) {
        Some(task) => settle(task).await.err(),
        None => None,
    };

    let body = render_post_form(&lock_form(&form), notice.as_deref());
    Html(base_html("New Post", &body))
}

// ============================================================================
// Selector API
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct VisibleForQuery {
    #[serde(default)]
    pub selected: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct VisibleForResponse {
    pub generation: u64,
    pub multiple: bool,
    pub options: Vec<SelectorOption>,
}

pub async fn visible_for_api(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VisibleForQuery>,
) -> Response {
    let form = PostForm::shared();
    let task = state.populator.spawn(&form, Some(query.selected));

    if let Err(message) = settle(task).await {
        return error_response(StatusCode::BAD_GATEWAY, message);
    }

    let f = lock_form(&form);
    Json(VisibleForResponse {
        generation: f.selector.generation,
        multiple: f.selector.multiple,
        options: f.selector.options.clone(),
    })
    .into_response()
}

// ============================================================================
// Image Links API
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ImageLinksRequest {
    pub body: String,
    pub hostname: String,
    pub path: String,
    pub replaced_path: String,
}

#[derive(Debug, Serialize)]
pub struct ImageLinksResponse {
    pub links: BTreeMap<String, String>,
}

pub async fn image_links_api(Json(req): Json<ImageLinksRequest>) -> Response {
    if req.hostname.is_empty() || req.path.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "hostname and path are required");
    }

    let links = extract_image_links(&req.body, &req.hostname, &req.path, &req.replaced_path);
    Json(ImageLinksResponse { links }).into_response()
}
