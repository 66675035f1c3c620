use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::repository::{MediaRepository, UserRepository};

#[derive(Deserialize, Debug)]
pub struct WatchlistPath {
    pub id: String,
    pub imdb_id: String,
}

pub async fn get_watchlist(
    path: Path<String>,
    users: Data<UserRepository>,
) -> Result<HttpResponse, ApiError> {
    let watchlist = users.get_watchlist(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(watchlist))
}

pub async fn add_to_watchlist(
    path: Path<WatchlistPath>,
    users: Data<UserRepository>,
    media: Data<MediaRepository>,
) -> Result<HttpResponse, ApiError> {
    let WatchlistPath { id, imdb_id } = path.into_inner();
    let watchlist = users.add_to_watchlist(&id, &imdb_id, &media).await?;
    tracing::info!("Movie {} on the watchlist of {}", imdb_id, id);
    Ok(HttpResponse::Created().json(watchlist))
}

pub async fn remove_from_watchlist(
    path: Path<WatchlistPath>,
    users: Data<UserRepository>,
) -> Result<HttpResponse, ApiError> {
    let WatchlistPath { id, imdb_id } = path.into_inner();
    let watchlist = users.remove_from_watchlist(&id, &imdb_id).await?;
    tracing::info!("Movie {} off the watchlist of {}", imdb_id, id);
    Ok(HttpResponse::Ok().json(watchlist))
}
