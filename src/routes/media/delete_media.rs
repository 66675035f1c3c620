use actix_web::{
    web::{Data, Path},
    HttpResponse,
};

use crate::error::ApiError;
use crate::repository::{MediaRepository, UserRepository};

/// Deletes a movie with its reviews and drops it from every watchlist.
pub async fn delete_media(
    path: Path<String>,
    media: Data<MediaRepository>,
    users: Data<UserRepository>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    users.delete_movie(&id, &media).await?;
    tracing::info!("Movie {} deleted", id);
    Ok(HttpResponse::NoContent().finish())
}
