//! Holds the current catalog snapshot for concurrent readers.
//!
//! Readers take an `Arc` to a complete store and keep it for as long as they
//! need; a reload builds the new store off to the side and swaps the pointer,
//! so nobody ever observes a half-built catalog.

use crate::catalog::index::{CatalogStore, load_catalog_from_paths};
use anyhow::Result;
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug)]
/// Shared, swappable reference to the current catalog snapshot.
pub struct SharedCatalog {
    current: RwLock<Arc<CatalogStore>>,
}

impl SharedCatalog {
    pub fn new(store: CatalogStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
        }
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<CatalogStore> {
        let guard = self.current.read().unwrap_or_else(|err| err.into_inner());
        Arc::clone(&guard)
    }

    /// Install `store` as the current snapshot and hand back the previous one.
    pub fn replace(&self, store: CatalogStore) -> Arc<CatalogStore> {
        let next = Arc::new(store);
        let mut guard = self.current.write().unwrap_or_else(|err| err.into_inner());
        std::mem::replace(&mut *guard, next)
    }

    /// Load a fresh snapshot from disk and install it.
    ///
    /// On failure the current snapshot stays in place and the error is
    /// returned to the caller.
    pub fn reload(&self, database: &Path, schema: &Path) -> Result<Arc<CatalogStore>> {
        match load_catalog_from_paths(database, schema) {
            Ok(store) => {
                let previous = self.replace(store);
                log::info!(
                    "catalog snapshot replaced (was version {})",
                    previous.version()
                );
                Ok(self.snapshot())
            }
            Err(err) => {
                log::warn!("catalog reload failed, keeping current snapshot: {err:#}");
                Err(err)
            }
        }
    }
}
