use actix_multipart::Multipart;
use actix_web::{
    web::{Data, Path},
    HttpResponse,
};

use crate::error::ApiError;
use crate::repository::MediaRepository;
use crate::routes::read_image_upload;
use crate::services::{ImageStore, POSTER_FOLDER};

pub async fn upload_media_poster(
    path: Path<String>,
    payload: Multipart,
    media: Data<MediaRepository>,
    image_store: Data<dyn ImageStore>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    // nothing is uploaded for movies that do not exist
    media.get_by_id(&id).await?;

    let image = read_image_upload(payload).await?;
    let poster_url = image_store.store(image, POSTER_FOLDER).await?;
    let movie = media.set_poster(&id, poster_url).await?;
    tracing::info!("Poster of {} saved", movie.imdb_id);
    Ok(HttpResponse::Ok().json(movie))
}
