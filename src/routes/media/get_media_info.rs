use actix_web::{
    web::{Data, Path},
    HttpResponse,
};

use crate::error::ApiError;
use crate::repository::MediaRepository;
use crate::services::MovieLookup;

/// Details of a catalogue movie, completed by the external movie lookup.
/// The stored record is returned when the lookup knows no such title.
pub async fn get_media_info(
    path: Path<String>,
    media: Data<MediaRepository>,
    lookup: Data<dyn MovieLookup>,
) -> Result<HttpResponse, ApiError> {
    let movie = media.get_by_id(&path.into_inner()).await?;

    let candidates = lookup.search_by_title(&movie.title).await?;
    match candidates.first() {
        Some(candidate) => {
            tracing::info!("Hydrating {} from lookup entry {}", movie.imdb_id, candidate.imdb_id);
            let details = lookup.get_by_id(&candidate.imdb_id).await?;
            Ok(HttpResponse::Ok().json(details))
        }
        None => {
            tracing::info!("No lookup match for {}", movie.title);
            Ok(HttpResponse::Ok().json(movie))
        }
    }
}
