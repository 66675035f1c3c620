use actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};

use super::{ReviewPath, ReviewUpdateRequest};
use crate::domain::ReviewPatch;
use crate::error::ApiError;
use crate::repository::MediaRepository;
use crate::routes::validate_body;

pub async fn update_review(
    path: Path<ReviewPath>,
    body: Json<ReviewUpdateRequest>,
    media: Data<MediaRepository>,
) -> Result<HttpResponse, ApiError> {
    validate_body(&body.0)?;
    let ReviewUpdateRequest { comment, rate } = body.into_inner();
    let rate = rate.ok_or_else(|| ApiError::invalid("rate", "Rate is required"))?;

    let ReviewPath {
        movie_id,
        review_id,
    } = path.into_inner();
    let reviews = media
        .update_review(&movie_id, &review_id, ReviewPatch { comment, rate })
        .await?;
    tracing::info!("Review {} of {} edited", review_id, movie_id);
    Ok(HttpResponse::Ok().json(reviews))
}
