//! BindingStore: the shared, persisted [`BindingSet`].
//!
//! The store is the only owner of the live binding set.  The UI and both
//! dispatcher loops hold it through an `Arc` and go through its methods:
//!
//! - **Reads** (`resolve`, `snapshot`) take a short read lock.
//! - **Mutations** (`assign`, `set_universal`, `clear`) take the write lock,
//!   change the set, release the lock, and then `save()`.
//!
//! # Fail-soft persistence
//!
//! Every disk problem is logged and swallowed:
//!
//! | Situation                  | Result                                     |
//! |----------------------------|--------------------------------------------|
//! | file missing on `load()`   | empty set, `info!`                         |
//! | file malformed on `load()` | empty set, `error!`                        |
//! | write fails on `save()`    | change kept in memory for this run, `error!` |
//!
//! Nothing here returns an error to the caller, so a broken config file can
//! never take down the listener loops.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use soundbind_core::{BindingSet, Namespace};
use thiserror::Error;
use tracing::{debug, error, info};

/// Error type for binding persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing bindings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid bindings record.
    #[error("failed to parse bindings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The binding set could not be serialized.
    #[error("failed to serialize bindings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable home of a [`BindingSet`].
///
/// The production implementation is
/// [`JsonBindingFile`](crate::infrastructure::storage::bindings_file::JsonBindingFile);
/// tests substitute an in-memory or mocked repository.
#[cfg_attr(test, mockall::automock)]
pub trait BindingRepository: Send + Sync {
    /// Reads the persisted set.  `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<BindingSet>, StorageError>;

    /// Replaces the persisted set with `bindings`.
    fn save(&self, bindings: &BindingSet) -> Result<(), StorageError>;
}

/// The application's single binding set plus its repository.
pub struct BindingStore {
    bindings: RwLock<BindingSet>,
    repository: Box<dyn BindingRepository>,
    /// Serialises saves so the last save always writes the latest snapshot.
    save_lock: Mutex<()>,
}

impl BindingStore {
    /// Creates an empty store without touching the repository.
    pub fn new(repository: Box<dyn BindingRepository>) -> Self {
        Self {
            bindings: RwLock::new(BindingSet::new()),
            repository,
            save_lock: Mutex::new(()),
        }
    }

    /// Creates a store and immediately [`load`](Self::load)s it.
    pub fn open(repository: Box<dyn BindingRepository>) -> Self {
        let store = Self::new(repository);
        store.load();
        store
    }

    /// Replaces the in-memory set with the persisted one.
    ///
    /// A missing file leaves the set empty.  A malformed file is logged and
    /// also leaves the set empty.
    pub fn load(&self) {
        let loaded = match self.repository.load() {
            Ok(Some(set)) => {
                info!(
                    keyboard = set.len(Namespace::Keyboard),
                    mouse = set.len(Namespace::Mouse),
                    "loaded sound bindings"
                );
                set
            }
            Ok(None) => {
                info!("no bindings file yet, starting empty");
                BindingSet::new()
            }
            Err(e) => {
                error!("error loading bindings, starting empty: {e}");
                BindingSet::new()
            }
        };
        *self.write() = loaded;
    }

    /// Writes the current set to the repository.  Failures are logged only.
    pub fn save(&self) {
        let _guard = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = self.snapshot();
        match self.repository.save(&snapshot) {
            Ok(()) => debug!("bindings saved"),
            Err(e) => error!("error saving bindings: {e}"),
        }
    }

    /// Binds `id` to `path` in `namespace`, then saves.
    pub fn assign(&self, namespace: Namespace, id: &str, path: &str) {
        self.write().assign(namespace, id, path);
        info!(%namespace, id, path, "sound assigned");
        self.save();
    }

    /// Sets the fallback sound for unmapped keyboard keys, then saves.
    pub fn set_universal(&self, path: &str) {
        self.write().set_universal(path);
        info!(path, "universal sound set");
        self.save();
    }

    /// Removes every binding and the universal sound, then saves.
    pub fn clear(&self) {
        self.write().clear();
        info!("all sounds cleared");
        self.save();
    }

    /// Returns the sound bound to `id`, if any.  See [`BindingSet::resolve`].
    pub fn resolve(&self, namespace: Namespace, id: &str) -> Option<String> {
        self.read().resolve(namespace, id).map(str::to_owned)
    }

    /// Returns a copy of the current set.
    pub fn snapshot(&self) -> BindingSet {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, BindingSet> {
        self.bindings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BindingSet> {
        self.bindings.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
