//! TVMaze-compatible catalog client
//!
//! `GET {api_url}/shows` for the default listing and
//! `GET {api_url}/search/shows?q=term` for search. Both return JSON arrays.

use super::{CatalogEntry, CatalogService, FetchError, FetchResult, SearchHit};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Catalog service backed by reqwest
///
/// `reqwest::Client` is an `Arc` internally, so each request clones it into
/// its own `'static` future.
#[derive(Clone)]
pub struct TvMazeService {
    client: reqwest::Client,
    base_url: String,
}

impl TvMazeService {
    /// Build a client for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("reelview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!("Catalog client ready: {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T>(&self, request: reqwest::RequestBuilder) -> BoxFuture<'static, FetchResult<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
        }
        .boxed()
    }
}

impl CatalogService for TvMazeService {
    fn fetch_list(&self) -> BoxFuture<'static, FetchResult<Vec<CatalogEntry>>> {
        let url = format!("{}/shows", self.base_url);
        tracing::debug!("GET {}", url);
        self.get_json(self.client.get(url))
    }

    fn fetch_results(&self, term: &str) -> BoxFuture<'static, FetchResult<Vec<SearchHit>>> {
        let url = format!("{}/search/shows", self.base_url);
        tracing::debug!("GET {}?q={}", url, term);
        self.get_json(self.client.get(url).query(&[("q", term)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    /// Serve `router` on an ephemeral port and return its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn service(base: &str) -> TvMazeService {
        TvMazeService::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_list_parses_shows() {
        let router = Router::new().route(
            "/shows",
            get(|| async {
                Json(serde_json::json!([
                    {
                        "id": 1,
                        "name": "Under the Dome",
                        "genres": ["Drama", "Science-Fiction", "Thriller"],
                        "rating": {"average": 6.5},
                        "image": {
                            "medium": "https://static.tvmaze.com/uploads/images/medium_portrait/81/202627.jpg",
                            "original": "https://static.tvmaze.com/uploads/images/original_untouched/81/202627.jpg"
                        }
                    },
                    {"id": 2, "name": "Person of Interest", "genres": [], "rating": {"average": null}, "image": null}
                ]))
            }),
        );
        let base = serve(router).await;

        let shows = service(&base).fetch_list().await.unwrap();

        assert_eq!(shows.len(), 2);
        assert_eq!(shows[0].name, "Under the Dome");
        assert_eq!(shows[0].genres, vec!["Drama", "Science-Fiction", "Thriller"]);
        assert_eq!(shows[0].average_rating(), Some(6.5));
        assert!(shows[0].poster_ref().unwrap().ends_with("202627.jpg"));
        assert_eq!(shows[1].average_rating(), None);
        assert_eq!(shows[1].poster_ref(), None);
    }

    #[tokio::test]
    async fn test_fetch_results_sends_query_term() {
        let router = Router::new().route(
            "/search/shows",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let term = params.get("q").cloned().unwrap_or_default();
                Json(serde_json::json!([
                    {"score": 0.9, "show": {"name": format!("{} one", term)}},
                    {"score": 0.5},
                    {"score": 0.2, "show": {"name": format!("{} two", term)}}
                ]))
            }),
        );
        let base = serve(router).await;

        let hits = service(&base).fetch_results("star trek").await.unwrap();

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].show.as_ref().unwrap().name, "star trek one");
        assert!(hits[1].show.is_none());
        assert_eq!(hits[2].show.as_ref().unwrap().name, "star trek two");
    }

    #[tokio::test]
    async fn test_non_success_status_is_status_error() {
        let router = Router::new().route(
            "/shows",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        );
        let base = serve(router).await;

        match service(&base).fetch_list().await {
            Err(FetchError::Status { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "down for maintenance");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let router = Router::new().route("/shows", get(|| async { "{not json" }));
        let base = serve(router).await;

        assert!(matches!(
            service(&base).fetch_list().await,
            Err(FetchError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = service(&format!("http://{}", addr)).fetch_list().await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let svc = service("https://api.tvmaze.com/");
        assert_eq!(svc.base_url(), "https://api.tvmaze.com");
    }
}
