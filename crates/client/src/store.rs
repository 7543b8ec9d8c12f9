//! Client-side query store and the slide list loader.
//!
//! [`QueryStore`] caches fetched data per resource key. Writes never patch
//! cached data: they [`invalidate`](QueryStore::invalidate) the key and the
//! owner refetches it in full. [`SlideLoader`] binds the store to a
//! [`SlideBackend`] for the hero slide list.

use std::collections::HashMap;
use std::sync::Arc;

use heroslides_core::hero_slide::HeroSlide;
use heroslides_core::notification::FailureKind;

use crate::api::{ApiError, RESOURCE_PATH};
use crate::backend::SlideBackend;

/// Cache key of the hero slide list.
pub const SLIDES_QUERY_KEY: &str = RESOURCE_PATH;

// ---------------------------------------------------------------------------
// QueryState
// ---------------------------------------------------------------------------

/// Observable state of one cached query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// Never fetched.
    Idle,
    /// First fetch in flight; nothing to show yet.
    Loading,
    /// Data is available. `stale` means it was invalidated; `fetching`
    /// means a refetch is in flight while the old data is still shown.
    Loaded { data: T, stale: bool, fetching: bool },
    /// The last fetch failed. `previous` keeps data from an earlier fetch.
    Failed {
        failure: FailureKind,
        message: String,
        previous: Option<T>,
    },
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    /// The data to show, if any: fresh, stale or left over from before a
    /// failed refetch.
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Loaded { data, .. } => Some(data),
            QueryState::Failed { previous, .. } => previous.as_ref(),
            QueryState::Idle | QueryState::Loading => None,
        }
    }
}

// ---------------------------------------------------------------------------
// QueryStore
// ---------------------------------------------------------------------------

/// Query results keyed by resource identifier.
#[derive(Debug)]
pub struct QueryStore<T> {
    entries: HashMap<String, QueryState<T>>,
}

impl<T> Default for QueryStore<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Clone> QueryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a key's state. Unknown keys are [`QueryState::Idle`].
    pub fn read(&self, key: &str) -> QueryState<T> {
        self.entries.get(key).cloned().unwrap_or(QueryState::Idle)
    }

    /// Borrow the data to show for a key.
    pub fn data(&self, key: &str) -> Option<&T> {
        self.entries.get(key).and_then(QueryState::data)
    }

    /// Whether the key has to be (re)fetched before it can be trusted.
    pub fn needs_fetch(&self, key: &str) -> bool {
        match self.entries.get(key) {
            None | Some(QueryState::Idle) | Some(QueryState::Failed { .. }) => true,
            Some(QueryState::Loaded { stale, .. }) => *stale,
            Some(QueryState::Loading) => false,
        }
    }

    /// Mark a fetch as started, keeping any data already cached.
    pub fn begin_fetch(&mut self, key: &str) {
        let next = match self.entries.remove(key) {
            Some(QueryState::Loaded { data, stale, .. }) => QueryState::Loaded {
                data,
                stale,
                fetching: true,
            },
            Some(QueryState::Failed {
                previous: Some(data),
                ..
            }) => QueryState::Loaded {
                data,
                stale: true,
                fetching: true,
            },
            _ => QueryState::Loading,
        };
        self.entries.insert(key.to_string(), next);
    }

    /// Store the outcome of a fetch. Success replaces the cached data in
    /// full; failure keeps it as `previous`.
    pub fn resolve(&mut self, key: &str, outcome: Result<T, (FailureKind, String)>) {
        let next = match outcome {
            Ok(data) => QueryState::Loaded {
                data,
                stale: false,
                fetching: false,
            },
            Err((failure, message)) => {
                let previous = self.entries.remove(key).and_then(|state| match state {
                    QueryState::Loaded { data, .. } => Some(data),
                    QueryState::Failed { previous, .. } => previous,
                    QueryState::Idle | QueryState::Loading => None,
                });
                QueryState::Failed {
                    failure,
                    message,
                    previous,
                }
            }
        };
        self.entries.insert(key.to_string(), next);
    }

    /// Mark a key's data as stale. Returns `false` when nothing was cached.
    pub fn invalidate(&mut self, key: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(QueryState::Loaded { stale, .. }) => {
                *stale = true;
                true
            }
            Some(QueryState::Failed { .. }) => true,
            Some(QueryState::Idle) | Some(QueryState::Loading) | None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// SlideLoader
// ---------------------------------------------------------------------------

/// Loads the hero slide list into a [`QueryStore`].
pub struct SlideLoader<B> {
    backend: Arc<B>,
    store: QueryStore<Vec<HeroSlide>>,
}

impl<B: SlideBackend> SlideLoader<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            store: QueryStore::new(),
        }
    }

    /// Fetch the list unless a fresh copy is already cached.
    pub async fn load(&mut self) {
        if self.store.needs_fetch(SLIDES_QUERY_KEY) {
            self.refetch().await;
        }
    }

    /// Fetch the list from the backend, replacing the cached copy.
    pub async fn refetch(&mut self) {
        self.store.begin_fetch(SLIDES_QUERY_KEY);
        tracing::debug!(key = SLIDES_QUERY_KEY, "Fetching hero slides");

        let outcome = match self.backend.list().await {
            Ok(slides) => {
                tracing::debug!(count = slides.len(), "Hero slides loaded");
                Ok(slides)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load hero slides");
                Err(describe_load_failure(&e))
            }
        };
        self.store.resolve(SLIDES_QUERY_KEY, outcome);
    }

    /// Invalidate the cached list and refetch it.
    pub async fn invalidate(&mut self) {
        self.store.invalidate(SLIDES_QUERY_KEY);
        self.refetch().await;
    }

    pub fn state(&self) -> QueryState<Vec<HeroSlide>> {
        self.store.read(SLIDES_QUERY_KEY)
    }

    /// The slides to show, in server order.
    pub fn slides(&self) -> &[HeroSlide] {
        self.store
            .data(SLIDES_QUERY_KEY)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.store.read(SLIDES_QUERY_KEY).is_loading()
    }
}

fn describe_load_failure(err: &ApiError) -> (FailureKind, String) {
    let kind = err.failure_kind();
    let message = match err.detail() {
        Some(detail) => format!("{}: {detail}", kind.user_message()),
        None => kind.user_message().to_string(),
    };
    (kind, message)
}
