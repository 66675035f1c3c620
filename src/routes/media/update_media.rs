use actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};

use super::MovieRequest;
use crate::error::ApiError;
use crate::repository::MediaRepository;
use crate::routes::validate_body;

pub async fn update_media(
    path: Path<String>,
    body: Json<MovieRequest>,
    media: Data<MediaRepository>,
) -> Result<HttpResponse, ApiError> {
    validate_body(&body.0)?;
    let movie = media
        .update(&path.into_inner(), body.into_inner().into_patch())
        .await?;
    tracing::info!("Movie {} updated", movie.imdb_id);
    Ok(HttpResponse::Ok().json(movie))
}
