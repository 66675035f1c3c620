use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use uuid::Uuid;

use super::{CollectionBackend, StoreError};

/// Stores each collection as `<data_dir>/<name>.json`.
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl CollectionBackend for JsonFileBackend {
    async fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        tokio::fs::read(self.collection_path(name))
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => StoreError::Missing {
                    name: name.to_string(),
                },
                _ => StoreError::Read {
                    name: name.to_string(),
                    source,
                },
            })
    }

    async fn write(&self, name: &str, contents: Vec<u8>) -> Result<(), StoreError> {
        let target = self.collection_path(name);
        let staging = self
            .data_dir
            .join(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()));
        let to_write_error = |source| StoreError::Write {
            name: name.to_string(),
            source,
        };

        if let Err(err) = tokio::fs::write(&staging, contents).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(to_write_error(err));
        }
        // rename within one directory replaces the target atomically
        if let Err(err) = tokio::fs::rename(&staging, &target).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(to_write_error(err));
        }
        Ok(())
    }

    async fn ensure(&self, name: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| StoreError::Write {
                name: name.to_string(),
                source,
            })?;
        match tokio::fs::try_exists(self.collection_path(name)).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::info!("Creating empty collection {}", name);
                self.write(name, b"[]".to_vec()).await
            }
            Err(source) => Err(StoreError::Read {
                name: name.to_string(),
                source,
            }),
        }
    }
}
