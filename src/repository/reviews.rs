use chrono::Utc;

use crate::domain::{generate_unique_id, Movie, Review, ReviewPatch};

use super::{media::movie_not_found, MediaRepository, RepositoryError, RepositoryResult};

fn review_not_found(id: &str) -> RepositoryError {
    RepositoryError::NotFound(format!("Review {} not found", id))
}

impl MediaRepository {
    /// Reviews of a movie. A movie that never received a review has no
    /// reviews array and is reported as not found.
    pub async fn list_reviews(&self, movie_id: &str) -> RepositoryResult<Vec<Review>> {
        self.get_by_id(movie_id)
            .await?
            .reviews
            .ok_or_else(|| movie_not_found(movie_id))
    }

    pub async fn add_review(
        &self,
        movie_id: &str,
        comment: String,
        rate: f64,
    ) -> RepositoryResult<Movie> {
        self.collection
            .update(|media| -> RepositoryResult<Movie> {
                let movie = media
                    .iter_mut()
                    .find(|movie| movie.imdb_id == movie_id)
                    .ok_or_else(|| movie_not_found(movie_id))?;
                let reviews = movie.reviews.get_or_insert_with(Vec::new);
                let id = generate_unique_id(|candidate| {
                    reviews.iter().any(|review| review.id == candidate)
                });
                reviews.push(Review {
                    id,
                    element_id: movie_id.to_string(),
                    comment,
                    rate,
                    created_at: Utc::now(),
                    edited_at: None,
                });
                Ok(movie.clone())
            })
            .await
    }

    pub async fn update_review(
        &self,
        movie_id: &str,
        review_id: &str,
        patch: ReviewPatch,
    ) -> RepositoryResult<Vec<Review>> {
        self.collection
            .update(|media| -> RepositoryResult<Vec<Review>> {
                let movie = media
                    .iter_mut()
                    .find(|movie| movie.imdb_id == movie_id)
                    .ok_or_else(|| movie_not_found(movie_id))?;
                let reviews = movie
                    .reviews
                    .as_mut()
                    .ok_or_else(|| review_not_found(review_id))?;
                let review = reviews
                    .iter_mut()
                    .find(|review| review.id == review_id)
                    .ok_or_else(|| review_not_found(review_id))?;
                patch.apply(review, Utc::now());
                Ok(reviews.clone())
            })
            .await
    }

    pub async fn delete_review(&self, movie_id: &str, review_id: &str) -> RepositoryResult<()> {
        self.collection
            .update(|media| -> RepositoryResult<()> {
                let movie = media
                    .iter_mut()
                    .find(|movie| movie.imdb_id == movie_id)
                    .ok_or_else(|| movie_not_found(movie_id))?;
                let reviews = movie
                    .reviews
                    .as_mut()
                    .ok_or_else(|| review_not_found(review_id))?;
                let before = reviews.len();
                reviews.retain(|review| review.id != review_id);
                if reviews.len() == before {
                    return Err(review_not_found(review_id));
                }
                Ok(())
            })
            .await
    }
}
