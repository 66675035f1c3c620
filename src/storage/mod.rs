mod in_memory;
mod json_file;

pub use in_memory::*;
pub use json_file::*;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::{marker::PhantomData, sync::Arc};
use tokio::sync::{Mutex, MutexGuard};
use tracing::Instrument;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("collection `{name}` does not exist")]
    Missing { name: String },
    #[error("failed to read collection `{name}`: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write collection `{name}`: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("collection `{name}` is not a valid JSON array: {source}")]
    Corrupt {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize collection `{name}`: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw storage of named collections. A collection is always read and written
/// as a whole.
#[async_trait]
pub trait CollectionBackend: Send + Sync {
    async fn read(&self, name: &str) -> Result<Vec<u8>, StoreError>;

    /// Replaces the whole collection. Callers never observe a partial write.
    async fn write(&self, name: &str, contents: Vec<u8>) -> Result<(), StoreError>;

    /// Creates the collection as an empty array if it does not exist yet.
    async fn ensure(&self, name: &str) -> Result<(), StoreError>;
}

/// A typed view over one collection of a backend.
///
/// Every load-modify-save cycle goes through [`Collection::update`], which
/// holds a per-collection lock so concurrent writers cannot overwrite each
/// other's changes. Reads are lock free.
pub struct Collection<T> {
    name: String,
    backend: Arc<dyn CollectionBackend>,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(name: impl Into<String>, backend: Arc<dyn CollectionBackend>) -> Self {
        Self {
            name: name.into(),
            backend,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn ensure(&self) -> Result<(), StoreError> {
        self.backend.ensure(&self.name).await
    }

    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        let span = tracing::debug_span!("Loading collection", collection = %self.name);
        let bytes = self.backend.read(&self.name).instrument(span).await?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            name: self.name.clone(),
            source,
        })
    }

    async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let span = tracing::debug_span!(
            "Saving collection",
            collection = %self.name,
            records = records.len()
        );
        let bytes =
            serde_json::to_vec_pretty(records).map_err(|source| StoreError::Serialize {
                name: self.name.clone(),
                source,
            })?;
        self.backend.write(&self.name, bytes).instrument(span).await
    }

    /// Takes the collection's write lock. Writes made through the guard, and
    /// any other work done while it is held, are not interleaved with other
    /// writers of this collection.
    pub async fn lock(&self) -> CollectionGuard<'_, T> {
        CollectionGuard {
            collection: self,
            _lock: self.write_lock.lock().await,
        }
    }

    /// Loads the collection, applies `change` and saves the result, all under
    /// the collection's write lock. Nothing is saved when `change` fails.
    pub async fn update<R, E, F>(&self, change: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
        E: From<StoreError>,
    {
        self.lock().await.update(change).await
    }
}

/// Exclusive write access to a [`Collection`], released on drop.
pub struct CollectionGuard<'a, T> {
    collection: &'a Collection<T>,
    _lock: MutexGuard<'a, ()>,
}

impl<T> CollectionGuard<'_, T>
where
    T: Serialize + DeserializeOwned,
{
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        self.collection.load().await
    }

    pub async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        self.collection.save(records).await
    }

    pub async fn update<R, E, F>(&self, change: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
        E: From<StoreError>,
    {
        let mut records = self.load().await?;
        let outcome = change(&mut records)?;
        self.save(&records).await?;
        Ok(outcome)
    }
}
