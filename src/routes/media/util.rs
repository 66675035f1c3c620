use actix_web::{
    web::{self, Data},
    Scope,
};
use serde::Deserialize;
use validator::Validate;

use crate::domain::{Movie, MoviePatch, NewMovie};
use crate::error::ApiError;
use crate::services::{catalogue_lines, DocumentRenderer};

use super::{
    create_media, delete_media, get_catalogue_pdf, get_media_info, get_media_list,
    send_catalogue_email, update_media, upload_media_poster,
};

pub fn media_source() -> Scope {
    web::scope("/media")
        .route("", web::get().to(get_media_list))
        .route("", web::post().to(create_media))
        .route("/catalogue/pdf", web::get().to(get_catalogue_pdf))
        .route("/catalogue/email", web::post().to(send_catalogue_email))
        .route("/{id}", web::get().to(get_media_info))
        .route("/{id}", web::put().to(update_media))
        .route("/{id}", web::delete().to(delete_media))
        .route("/{id}/upload", web::post().to(upload_media_poster))
}

/// Body of catalogue additions and updates.
#[derive(Deserialize, Debug, Validate)]
pub struct MovieRequest {
    #[serde(rename = "Title", default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(rename = "Year", default)]
    #[validate(length(min = 1, message = "Year is required"))]
    pub year: String,
    #[serde(rename = "Type", default)]
    #[validate(length(min = 1, message = "Type is required"))]
    pub kind: String,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
}

impl MovieRequest {
    pub fn into_new_movie(self) -> NewMovie {
        NewMovie {
            title: self.title,
            year: self.year,
            kind: self.kind,
            poster: self.poster,
        }
    }

    pub fn into_patch(self) -> MoviePatch {
        MoviePatch {
            title: self.title,
            year: self.year,
            kind: self.kind,
            poster: self.poster,
        }
    }
}

/// Renders the catalogue of `media` off the async workers.
pub async fn render_catalogue(
    renderer: Data<dyn DocumentRenderer>,
    query: &str,
    media: &[Movie],
) -> Result<Vec<u8>, ApiError> {
    let title = format!("Movies Catalogue - {}", query);
    let lines = catalogue_lines(query, media);
    let rendered = web::block(move || renderer.render(&title, &lines))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok(rendered?)
}
