use actix_web::{
    web::{Data, Json},
    HttpResponse,
};

use super::ReviewRequest;
use crate::error::ApiError;
use crate::repository::MediaRepository;
use crate::routes::validate_body;

/// Adds a review to the movie named by `elementID` and answers with the
/// updated movie.
pub async fn post_review(
    body: Json<ReviewRequest>,
    media: Data<MediaRepository>,
) -> Result<HttpResponse, ApiError> {
    validate_body(&body.0)?;
    let ReviewRequest {
        element_id,
        comment,
        rate,
    } = body.into_inner();
    let rate = rate.ok_or_else(|| ApiError::invalid("rate", "Rate is required"))?;

    let movie = media.add_review(&element_id, comment, rate).await?;
    tracing::info!("Review added to {}", element_id);
    Ok(HttpResponse::Created().json(movie))
}
