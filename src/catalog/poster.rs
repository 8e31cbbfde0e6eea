//! Poster loading
//!
//! Fire-and-forget from the cell's point of view: the cell hands over a URL
//! and later renders whatever state the cache holds for it. Each URL is
//! fetched at most once per session.

use reqwest::Url;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Load state for one poster URL
#[derive(Debug, Clone, PartialEq)]
pub enum PosterState {
    Loading,
    /// Downloaded; only the payload size is kept
    Ready { size: usize },
    Failed,
}

/// Shared URL → state map
///
/// Written by poster tasks, read by the render loop.
#[derive(Debug, Clone, Default)]
pub struct PosterCache {
    entries: Arc<Mutex<HashMap<String, PosterState>>>,
}

impl PosterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &Url) -> Option<PosterState> {
        self.lock().get(url.as_str()).cloned()
    }

    /// Mark `url` as loading unless it is already known
    ///
    /// Returns true when the caller should start the download.
    fn claim(&self, url: &Url) -> bool {
        let mut entries = self.lock();
        if entries.contains_key(url.as_str()) {
            return false;
        }
        entries.insert(url.to_string(), PosterState::Loading);
        true
    }

    fn set(&self, url: &Url, state: PosterState) {
        self.lock().insert(url.to_string(), state);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, PosterState>> {
        // A panicking poster task must not take the UI down with it
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Image-loading collaborator used by `MovieCell::configure`
pub trait PosterLoader: Send + Sync {
    /// Start loading `url` in the background; never blocks, never fails
    fn request(&self, url: &Url);

    /// Current state for `url`, `None` if never requested
    fn state(&self, url: &Url) -> Option<PosterState>;
}

/// Loader used when poster fetching is switched off in config
#[derive(Debug, Default)]
pub struct NoPosterLoader;

impl PosterLoader for NoPosterLoader {
    fn request(&self, _url: &Url) {}

    fn state(&self, _url: &Url) -> Option<PosterState> {
        None
    }
}

/// Downloads poster bytes with reqwest into a `PosterCache`
pub struct HttpPosterLoader {
    client: reqwest::Client,
    cache: PosterCache,
}

impl HttpPosterLoader {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            cache: PosterCache::new(),
        })
    }
}

impl PosterLoader for HttpPosterLoader {
    fn request(&self, url: &Url) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::trace!("No runtime, skipping poster {}", url);
            return;
        };

        if !self.cache.claim(url) {
            return;
        }

        let client = self.client.clone();
        let cache = self.cache.clone();
        let url = url.clone();

        handle.spawn(async move {
            let result = async {
                client
                    .get(url.clone())
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await
            }
            .await;

            match result {
                Ok(bytes) => {
                    tracing::trace!("Poster loaded: {} ({} bytes)", url, bytes.len());
                    cache.set(&url, PosterState::Ready { size: bytes.len() });
                }
                Err(e) => {
                    tracing::debug!("Poster failed: {}: {}", url, e);
                    cache.set(&url, PosterState::Failed);
                }
            }
        });
    }

    fn state(&self, url: &Url) -> Option<PosterState> {
        self.cache.get(url)
    }
}
