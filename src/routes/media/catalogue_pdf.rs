use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web::{Data, Query},
    HttpResponse,
};
use serde::Deserialize;

use super::render_catalogue;
use crate::error::ApiError;
use crate::repository::MediaRepository;
use crate::services::DocumentRenderer;

#[derive(Deserialize, Debug)]
pub struct CatalogueQuery {
    pub title: Option<String>,
}

/// Streams a PDF listing every movie whose title contains `title`.
pub async fn get_catalogue_pdf(
    query: Query<CatalogueQuery>,
    media: Data<MediaRepository>,
    renderer: Data<dyn DocumentRenderer>,
) -> Result<HttpResponse, ApiError> {
    let title = match query.into_inner().title {
        Some(title) if !title.trim().is_empty() => title,
        _ => return Err(ApiError::invalid("title", "Title query not given")),
    };

    let movies = media.search_by_title(&title).await?;
    if movies.is_empty() {
        return Err(ApiError::NotFound("Movies Not Found".to_string()));
    }

    let content_type = renderer.content_type();
    let document = render_catalogue(renderer, &title, &movies).await?;
    tracing::info!("Catalogue for {} rendered with {} movies", title, movies.len());
    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Inline,
            parameters: vec![DispositionParam::Filename("movies.pdf".to_string())],
        })
        .body(document))
}
