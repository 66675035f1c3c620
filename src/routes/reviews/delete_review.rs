use actix_web::{
    web::{Data, Path},
    HttpResponse,
};

use super::ReviewPath;
use crate::error::ApiError;
use crate::repository::MediaRepository;

pub async fn delete_review(
    path: Path<ReviewPath>,
    media: Data<MediaRepository>,
) -> Result<HttpResponse, ApiError> {
    let ReviewPath {
        movie_id,
        review_id,
    } = path.into_inner();
    media.delete_review(&movie_id, &review_id).await?;
    tracing::info!("Review {} of {} deleted", review_id, movie_id);
    Ok(HttpResponse::NoContent().finish())
}
