use actix_web::{
    web::{Data, Json},
    HttpResponse,
};

use super::MovieRequest;
use crate::error::ApiError;
use crate::repository::MediaRepository;
use crate::routes::validate_body;

pub async fn create_media(
    body: Json<MovieRequest>,
    media: Data<MediaRepository>,
) -> Result<HttpResponse, ApiError> {
    validate_body(&body.0)?;
    let movie = media.create(body.into_inner().into_new_movie()).await?;
    tracing::info!("Movie {} created", movie.imdb_id);
    Ok(HttpResponse::Created().json(movie))
}
