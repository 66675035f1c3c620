use actix_web::{web, Scope};
use serde::Deserialize;
use validator::Validate;

use super::{delete_review, get_reviews, post_review, update_review};

pub fn review_source() -> Scope {
    web::scope("/reviews")
        .route("", web::post().to(post_review))
        .route("/{movie_id}", web::get().to(get_reviews))
        .route("/{movie_id}/{review_id}", web::put().to(update_review))
        .route("/{movie_id}/{review_id}", web::delete().to(delete_review))
}

#[derive(Deserialize, Debug, Validate)]
pub struct ReviewRequest {
    #[serde(rename = "elementID", default)]
    #[validate(length(min = 1, message = "elementID is required"))]
    pub element_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Comment is required"))]
    pub comment: String,
    #[validate(
        required(message = "Rate is required"),
        range(min = 0.0, max = 5.0, message = "Rate must be between 0 and 5")
    )]
    pub rate: Option<f64>,
}

#[derive(Deserialize, Debug, Validate)]
pub struct ReviewUpdateRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Comment is required"))]
    pub comment: String,
    #[validate(
        required(message = "Rate is required"),
        range(min = 0.0, max = 5.0, message = "Rate must be between 0 and 5")
    )]
    pub rate: Option<f64>,
}

#[derive(Deserialize, Debug)]
pub struct ReviewPath {
    pub movie_id: String,
    pub review_id: String,
}
