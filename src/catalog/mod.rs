//! Catalog data model and the remote lookup/search seam
//!
//! The screen never talks HTTP directly. It holds an `Arc<dyn CatalogService>`
//! and awaits the boxed futures it hands out, so tests can swap in a fake.
//!
//! ```text
//! MoviesScreen ──► CatalogService ──► TvMazeService (reqwest)
//!       │
//!       └──► MovieCell ──► PosterLoader ──► HttpPosterLoader (reqwest)
//! ```

pub mod poster;
pub mod tvmaze;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use poster::{HttpPosterLoader, NoPosterLoader, PosterLoader, PosterState};
pub use tvmaze::TvMazeService;

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// One browsable catalog item (a "show" in TVMaze terms)
///
/// Missing fields default rather than failing the whole page, since the
/// catalog omits `rating.average` and `image` for plenty of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,

    #[serde(default)]
    pub rating: Option<Rating>,

    #[serde(default)]
    pub image: Option<PosterImage>,
}

impl CatalogEntry {
    /// Average rating, if the catalog has one
    pub fn average_rating(&self) -> Option<f64> {
        self.rating.as_ref().and_then(|r| r.average)
    }

    /// Medium-size poster reference, unvalidated
    pub fn poster_ref(&self) -> Option<&str> {
        self.image.as_ref().and_then(|i| i.medium.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PosterImage {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

/// Wrapper record returned by the search endpoint
///
/// `show` may be absent; the screen drops those hits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub show: Option<CatalogEntry>,
}

/// `"genres": null` and `"name": null` show up in the wild; treat null
/// like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Why a fetch failed
///
/// The screen collapses every variant into "list cleared". The split only
/// exists so the log line says something useful.
#[derive(Debug)]
pub enum FetchError {
    /// Connection, TLS, timeout
    Network(String),
    /// Non-2xx response
    Status { status: u16, message: String },
    /// Body was not the JSON shape we expected
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status { status, message } => {
                write!(f, "Catalog returned {}: {}", status, message)
            }
            Self::Decode(msg) => write!(f, "Failed to decode catalog response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

pub type FetchResult<T> = Result<T, FetchError>;

// ─────────────────────────────────────────────────────────────────────────────
// Service seam
// ─────────────────────────────────────────────────────────────────────────────

/// Remote catalog collaborator
///
/// Futures are `'static` so the screen can move them onto a spawned task
/// without borrowing the service.
pub trait CatalogService: Send + Sync {
    /// Default listing (first page of the catalog)
    fn fetch_list(&self) -> BoxFuture<'static, FetchResult<Vec<CatalogEntry>>>;

    /// Search results for `term`, as wrapper records
    fn fetch_results(&self, term: &str) -> BoxFuture<'static, FetchResult<Vec<SearchHit>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_tolerates_missing_and_null_fields() {
        let json = r#"{"name":"Under the Dome","genres":null,"rating":{"average":null}}"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.name, "Under the Dome");
        assert!(entry.genres.is_empty());
        assert_eq!(entry.average_rating(), None);
        assert_eq!(entry.poster_ref(), None);

        // One bad entry must not cost the rest of the page
        let page: Vec<CatalogEntry> = serde_json::from_str(
            r#"[{"name":"Ok","genres":["Drama"]},{"name":null,"genres":null},{"name":"Also ok"}]"#,
        )
        .unwrap();
        let names: Vec<&str> = page.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ok", "", "Also ok"]);
        assert_eq!(page[0].genres, vec!["Drama"]);
    }

    #[test]
    fn test_search_hit_without_show() {
        let hits: Vec<SearchHit> =
            serde_json::from_str(r#"[{"score":0.9,"show":{"name":"Girls"}},{"score":0.1}]"#)
                .unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].show.as_ref().map(|s| s.name.as_str()), Some("Girls"));
        assert!(hits[1].show.is_none());
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Status {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Catalog returned 503: Service Unavailable");
    }
}
