//! Clients for the author endpoints of the local server.
//!
//! [`AuthorSource`] is the seam the populator and resolver talk to;
//! [`HttpAuthorSource`] is the reqwest-backed implementation.

use crate::config::Config;
use crate::models::{AuthorEntry, AuthorListResponse, AuthorProfile, AvailableAuthorsResponse};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const AUTHORS_PATH: &str = "/author";
pub const AVAILABLE_AUTHORS_PATH: &str = "/author/available/";
pub const PROFILE_PATH: &str = "/author/profile/";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

// ============================================================================
// Author Source
// ============================================================================

#[async_trait]
pub trait AuthorSource: Send + Sync {
    /// `GET /author`: authors with descriptive fields.
    async fn list_authors(&self) -> Result<Vec<AuthorEntry>, ClientError>;

    /// `GET /author/available/`: bare identifiers.
    async fn list_available(&self) -> Result<Vec<String>, ClientError>;

    /// `GET /author/profile/{uid}`.
    async fn fetch_profile(&self, uid: &str) -> Result<AuthorProfile, ClientError>;
}

pub struct HttpAuthorSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpAuthorSource {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ClientError::Transport {
                endpoint: config.upstream.to_string(),
                source,
            })?;

        Ok(Self {
            base: config.upstream.clone(),
            client,
        })
    }

    /// Build the profile URL. The uid is a path fragment: it is percent-encoded
    /// segment by segment so federated uids like `host/author/id` stay routable.
    pub fn profile_url(&self, uid: &str) -> Result<Url, ClientError> {
        let encoded: Vec<String> = uid
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        Ok(self
            .base
            .join(&format!("{}{}", PROFILE_PATH, encoded.join("/")))?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let endpoint = url.to_string();
        tracing::debug!(%endpoint, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| ClientError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl AuthorSource for HttpAuthorSource {
    async fn list_authors(&self) -> Result<Vec<AuthorEntry>, ClientError> {
        let url = self.base.join(AUTHORS_PATH)?;
        let body: AuthorListResponse = self.get_json(url).await?;
        Ok(body.data)
    }

    async fn list_available(&self) -> Result<Vec<String>, ClientError> {
        let url = self.base.join(AVAILABLE_AUTHORS_PATH)?;
        let body: AvailableAuthorsResponse = self.get_json(url).await?;
        Ok(body.data)
    }

    async fn fetch_profile(&self, uid: &str) -> Result<AuthorProfile, ClientError> {
        let url = self.profile_url(uid)?;
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{lock_form, PostForm, SelectorOption};
    use crate::resolver::DisplayNameResolver;
    use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
    use std::sync::Arc;

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{}", addr)).unwrap()
    }

    fn misbehaving_server() -> Router {
        Router::new()
            .route(
                "/author",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/author/available/", get(|| async { "not json" }))
            .route(
                "/author/profile/{uid}",
                get(|Path(uid): Path<String>| async move {
                    if uid == "good" {
                        Json(serde_json::json!({ "id": uid, "displayName": "Xavier" }))
                    } else {
                        Json(serde_json::json!({ "id": uid }))
                    }
                }),
            )
    }

    fn source_for(base: Url) -> HttpAuthorSource {
        let config = Config {
            upstream: base,
            ..Config::default()
        };
        HttpAuthorSource::new(&config).unwrap()
    }

    fn source() -> HttpAuthorSource {
        let config = Config {
            upstream: Url::parse("http://127.0.0.1:8000").unwrap(),
            ..Config::default()
        };
        HttpAuthorSource::new(&config).unwrap()
    }

    #[test]
    fn test_profile_url_simple() {
        let url = source().profile_url("abc").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/author/profile/abc");
    }

    #[test]
    fn test_profile_url_keeps_path_separators() {
        let url = source().profile_url("remote.host/author/42").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/author/profile/remote.host/author/42"
        );
    }

    #[test]
    fn test_profile_url_escapes_spaces() {
        let url = source().profile_url("a b").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/author/profile/a%20b");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        let config = Config {
            upstream: Url::parse("http://127.0.0.1:1").unwrap(),
            timeout_secs: 2,
            ..Config::default()
        };
        let source = HttpAuthorSource::new(&config).unwrap();
        let err = source.list_authors().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_error_status_and_bad_bodies() {
        let source = source_for(serve(misbehaving_server()).await);

        let err = source.list_authors().await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500, .. }));

        let err = source.list_available().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));

        let err = source.fetch_profile("x").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));

        let profile = source.fetch_profile("good").await.unwrap();
        assert_eq!(profile.display_name, "Xavier");
    }

    #[tokio::test]
    async fn test_profile_without_display_name_keeps_bare_label() {
        let source: Arc<dyn AuthorSource> =
            Arc::new(source_for(serve(misbehaving_server()).await));
        let form = PostForm::shared();
        lock_form(&form).selector.replace_options(vec![
            SelectorOption::new("x", "x"),
            SelectorOption::new("good", "good"),
        ]);

        let summary = DisplayNameResolver::start(&form, source).wait_all().await;
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.resolved, 1);

        let f = lock_form(&form);
        assert_eq!(f.selector.options[0].label, "x");
        assert_eq!(f.selector.options[1].label, "Xavier (good)");
    }
}
