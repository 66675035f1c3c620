use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use super::{CollectionBackend, StoreError};

/// Keeps collections in process memory. Used by tests and throwaway setups.
#[derive(Default)]
pub struct InMemoryBackend {
    collections: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    pub fn with_collections<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let collections = names
            .into_iter()
            .map(|name| (name.to_string(), b"[]".to_vec()))
            .collect();
        Self {
            collections: Mutex::new(collections),
        }
    }

    fn collections(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // a poisoned map still holds whole collections, never partial writes
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CollectionBackend for InMemoryBackend {
    async fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        self.collections()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::Missing {
                name: name.to_string(),
            })
    }

    async fn write(&self, name: &str, contents: Vec<u8>) -> Result<(), StoreError> {
        self.collections().insert(name.to_string(), contents);
        Ok(())
    }

    async fn ensure(&self, name: &str) -> Result<(), StoreError> {
        self.collections()
            .entry(name.to_string())
            .or_insert_with(|| b"[]".to_vec());
        Ok(())
    }
}
