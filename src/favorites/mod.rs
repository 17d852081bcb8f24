//! Favorites — the set of coin ids the user has starred, persisted locally.
//!
//! The store is explicitly constructed and shared by cloning; clones see the
//! same set. Every toggle rewrites the whole persisted array before it
//! returns, then publishes the new set to all subscribers.

pub mod storage;

pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

use crate::error::SdkError;
use futures_util::Stream;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// Storage entry holding the favorite ids.
pub const FAVORITES_KEY: &str = "favorites_uuids";

/// Observable, persisted set of favorite coin ids.
#[derive(Clone)]
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-persist-notify.
    write_lock: Arc<Mutex<()>>,
    ids: Arc<watch::Sender<HashSet<String>>>,
}

impl FavoritesStore {
    /// Load the persisted set. A missing entry is an empty set.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self, SdkError> {
        let saved: HashSet<String> = storage
            .get_strings(FAVORITES_KEY)?
            .unwrap_or_default()
            .into_iter()
            .collect();
        tracing::debug!(count = saved.len(), "Loaded favorites");

        let (tx, _rx) = watch::channel(saved);
        Ok(Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
            ids: Arc::new(tx),
        })
    }

    /// In-memory store, for previews and tests.
    pub fn in_memory() -> Self {
        let (tx, _rx) = watch::channel(HashSet::new());
        Self {
            storage: Arc::new(MemoryStore::new()),
            write_lock: Arc::new(Mutex::new(())),
            ids: Arc::new(tx),
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.borrow().contains(id)
    }

    /// Flip membership of `id`, persist, then notify. Returns the new membership.
    ///
    /// If persisting fails nothing changes in memory and no one is notified.
    pub fn toggle(&self, id: &str) -> Result<bool, SdkError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut next = self.ids.borrow().clone();
        let now_favorite = if next.remove(id) {
            false
        } else {
            next.insert(id.to_string());
            true
        };

        let mut persisted: Vec<String> = next.iter().cloned().collect();
        persisted.sort();
        self.storage.set_strings(FAVORITES_KEY, &persisted)?;

        self.ids.send_replace(next);
        tracing::debug!(id, favorite = now_favorite, "Toggled favorite");
        Ok(now_favorite)
    }

    /// Current ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.borrow().iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn snapshot(&self) -> HashSet<String> {
        self.ids.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.ids.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.borrow().is_empty()
    }

    /// Receiver that observes every published set, starting from the current one.
    pub fn subscribe(&self) -> watch::Receiver<HashSet<String>> {
        self.ids.subscribe()
    }

    /// Stream of sets published after this call.
    pub fn updates(&self) -> impl Stream<Item = HashSet<String>> + Send + 'static {
        futures_util::stream::unfold(self.ids.subscribe(), |mut rx| async move {
            rx.changed().await.ok()?;
            let ids = rx.borrow_and_update().clone();
            Some((ids, rx))
        })
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("ids", &self.ids())
            .finish()
    }
}
