use actix_web::{
    web::{Data, Path},
    HttpResponse,
};

use crate::error::ApiError;
use crate::repository::MediaRepository;

pub async fn get_reviews(
    path: Path<String>,
    media: Data<MediaRepository>,
) -> Result<HttpResponse, ApiError> {
    let reviews = media.list_reviews(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reviews))
}
