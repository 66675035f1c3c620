use actix_web::{
    web::{Data, Query},
    HttpResponse,
};
use serde::Deserialize;

use crate::domain::MediaFilter;
use crate::error::ApiError;
use crate::repository::MediaRepository;

#[derive(Deserialize, Debug)]
pub struct MediaQuery {
    pub s: Option<String>,
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub async fn get_media_list(
    media: Data<MediaRepository>,
    query: Query<MediaQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let filter = MediaFilter {
        search: query.s,
        year: query.year,
        kind: query.kind,
    };
    let movies = media.list(&filter).await?;
    tracing::info!("Listing {} movies", movies.len());
    Ok(HttpResponse::Ok().json(movies))
}
