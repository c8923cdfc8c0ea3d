/// Favorites store
///
/// Single source of truth for the user's favorited movies and people, backed
/// by durable key/value storage and exposed reactively through a watch
/// channel of immutable snapshots.
///
/// Every mutation serializes and rewrites the whole collection, which is O(n)
/// per add/remove. Favorites lists stay in the tens to low hundreds, so this
/// is acceptable; it is not a design for large collections.
use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::{
    error::AppResult,
    models::{FavoriteEntry, MediaKind, StoredFavorite},
    storage::KeyValueStorage,
};

const STORAGE_KEY: &str = "favorites";

/// A point-in-time, read-only view of the favorites collection
pub type FavoritesSnapshot = Arc<Vec<FavoriteEntry>>;

pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStorage>,
    snapshot_tx: watch::Sender<FavoritesSnapshot>,
    // Serializes mutations so a second toggle invoked while a write is still
    // in flight cannot interleave with it.
    write_lock: Mutex<()>,
}

impl FavoritesStore {
    /// Creates a store over the given storage backend
    ///
    /// The store starts empty; call [`load`](Self::load) once at startup to
    /// pull in the persisted collection.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let (snapshot_tx, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            storage,
            snapshot_tx,
            write_lock: Mutex::new(()),
        }
    }

    /// Loads the persisted favorites blob
    ///
    /// An absent key initializes an empty collection. An unreadable or
    /// unparseable blob is discarded and treated as empty, with a logged
    /// diagnostic, so a corrupted file never blocks startup.
    pub async fn load(&self) {
        let _guard = self.write_lock.lock().await;

        let entries = match self.storage.get(STORAGE_KEY).await {
            Ok(Some(json)) => match serde_json::from_str::<Vec<StoredFavorite>>(&json) {
                Ok(stored) => stored.into_iter().map(FavoriteEntry::from).collect(),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unparseable favorites blob");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read favorites, starting empty");
                Vec::new()
            }
        };

        tracing::info!(count = entries.len(), "Favorites loaded");
        self.snapshot_tx.send_replace(Arc::new(entries));
    }

    /// Inserts `entry` at the front of the collection
    ///
    /// A duplicate `(id, kind)` pair is a no-op. The updated collection is
    /// persisted before memory and subscribers see it; a failed write returns
    /// the error and leaves the published state untouched.
    pub async fn add(&self, entry: FavoriteEntry) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let current = self.snapshot_tx.borrow().clone();
        if current
            .iter()
            .any(|f| f.id == entry.id && f.kind == entry.kind)
        {
            return Ok(());
        }

        let mut next = Vec::with_capacity(current.len() + 1);
        next.push(entry);
        next.extend(current.iter().cloned());

        self.persist_and_publish(next).await
    }

    /// Removes the entry matching `(id, kind)`, if any
    ///
    /// Idempotent: the resulting collection is persisted and published
    /// whether or not a match existed.
    pub async fn remove(&self, id: u64, kind: MediaKind) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let current = self.snapshot_tx.borrow().clone();
        let next: Vec<FavoriteEntry> = current
            .iter()
            .filter(|f| !(f.id == id && f.kind == kind))
            .cloned()
            .collect();

        self.persist_and_publish(next).await
    }

    /// Whether `(id, kind)` is currently favorited; pure lookup, no I/O
    pub fn is_favorite(&self, id: u64, kind: MediaKind) -> bool {
        self.snapshot_tx
            .borrow()
            .iter()
            .any(|f| f.id == id && f.kind == kind)
    }

    /// The current snapshot of the collection
    pub fn snapshot(&self) -> FavoritesSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribes to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<FavoritesSnapshot> {
        self.snapshot_tx.subscribe()
    }

    // Durable write first; memory and subscribers only ever observe states
    // that reached storage.
    async fn persist_and_publish(&self, next: Vec<FavoriteEntry>) -> AppResult<()> {
        let stored: Vec<StoredFavorite> =
            next.iter().cloned().map(StoredFavorite::from).collect();
        let json = serde_json::to_string(&stored)?;

        if let Err(e) = self.storage.set(STORAGE_KEY, &json).await {
            tracing::error!(error = %e, "Failed to persist favorites");
            return Err(e);
        }

        self.snapshot_tx.send_replace(Arc::new(next));
        Ok(())
    }
}
