use std::cmp::Ordering;

use crate::domain::{contains_ignore_case, generate_unique_id, MediaFilter, Movie, MoviePatch, NewMovie};
use crate::storage::{Collection, CollectionGuard, StoreError};

use super::{RepositoryError, RepositoryResult};

pub struct MediaRepository {
    pub(super) collection: Collection<Movie>,
}

pub(super) fn movie_not_found(id: &str) -> RepositoryError {
    RepositoryError::NotFound(format!("Movie {} not found", id))
}

impl MediaRepository {
    pub fn new(collection: Collection<Movie>) -> Self {
        Self { collection }
    }

    pub async fn ensure(&self) -> Result<(), StoreError> {
        self.collection.ensure().await
    }

    /// All movies ordered by mean review rating, narrowed by `filter`.
    pub async fn list(&self, filter: &MediaFilter) -> RepositoryResult<Vec<Movie>> {
        let mut media = self.collection.load().await?;
        sort_by_mean_rating(&mut media);
        media.retain(|movie| filter.matches(movie));
        Ok(media)
    }

    pub async fn get_by_id(&self, id: &str) -> RepositoryResult<Movie> {
        self.collection
            .load()
            .await?
            .into_iter()
            .find(|movie| movie.imdb_id == id)
            .ok_or_else(|| movie_not_found(id))
    }

    pub async fn exists(&self, id: &str) -> RepositoryResult<bool> {
        Ok(self
            .collection
            .load()
            .await?
            .iter()
            .any(|movie| movie.imdb_id == id))
    }

    /// Movies whose title contains `query`, in collection order.
    pub async fn search_by_title(&self, query: &str) -> RepositoryResult<Vec<Movie>> {
        let mut media = self.collection.load().await?;
        media.retain(|movie| contains_ignore_case(&movie.title, query));
        Ok(media)
    }

    pub async fn create(&self, new_movie: NewMovie) -> RepositoryResult<Movie> {
        self.collection
            .update(|media| -> RepositoryResult<Movie> {
                let imdb_id =
                    generate_unique_id(|candidate| media.iter().any(|m| m.imdb_id == candidate));
                let movie = Movie {
                    imdb_id,
                    title: new_movie.title,
                    year: new_movie.year,
                    kind: new_movie.kind,
                    poster: new_movie.poster,
                    reviews: None,
                };
                media.push(movie.clone());
                Ok(movie)
            })
            .await
    }

    pub async fn update(&self, id: &str, patch: MoviePatch) -> RepositoryResult<Movie> {
        self.collection
            .update(|media| -> RepositoryResult<Movie> {
                let movie = media
                    .iter_mut()
                    .find(|movie| movie.imdb_id == id)
                    .ok_or_else(|| movie_not_found(id))?;
                patch.apply(movie);
                Ok(movie.clone())
            })
            .await
    }

    /// Removes the movie together with its reviews.
    pub async fn delete(&self, id: &str) -> RepositoryResult<()> {
        self.lock().await.delete(id).await
    }

    /// Holds the catalogue's write lock until the returned view is dropped,
    /// so no movie can be added or removed meanwhile.
    pub async fn lock(&self) -> LockedMedia<'_> {
        LockedMedia {
            guard: self.collection.lock().await,
        }
    }

    pub async fn set_poster(&self, id: &str, poster: String) -> RepositoryResult<Movie> {
        self.collection
            .update(|media| -> RepositoryResult<Movie> {
                let movie = media
                    .iter_mut()
                    .find(|movie| movie.imdb_id == id)
                    .ok_or_else(|| movie_not_found(id))?;
                movie.poster = Some(poster);
                Ok(movie.clone())
            })
            .await
    }
}

pub struct LockedMedia<'a> {
    guard: CollectionGuard<'a, Movie>,
}

impl LockedMedia<'_> {
    pub async fn exists(&self, id: &str) -> RepositoryResult<bool> {
        Ok(self
            .guard
            .load()
            .await?
            .iter()
            .any(|movie| movie.imdb_id == id))
    }

    pub async fn delete(&self, id: &str) -> RepositoryResult<()> {
        self.guard
            .update(|media| -> RepositoryResult<()> {
                let before = media.len();
                media.retain(|movie| movie.imdb_id != id);
                if media.len() == before {
                    return Err(movie_not_found(id));
                }
                Ok(())
            })
            .await
    }
}

/// Sorts ascending by mean rating. Two movies compare equal whenever either
/// of them has no reviews, so the result is only a partial order and rated
/// movies separated by an unrated one keep their relative positions.
pub fn sort_by_mean_rating(media: &mut [Movie]) {
    // insertion sort: slice::sort_by may panic on a comparator that is not a total order
    for unsorted in 1..media.len() {
        let mut position = unsorted;
        while position > 0
            && compare_mean_rating(&media[position - 1], &media[position]) == Ordering::Greater
        {
            media.swap(position - 1, position);
            position -= 1;
        }
    }
}

fn compare_mean_rating(a: &Movie, b: &Movie) -> Ordering {
    match (a.mean_rating(), b.mean_rating()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}
