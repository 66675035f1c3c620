mod media;
mod reviews;
mod users;

pub use media::*;
pub use users::*;

use crate::storage::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
