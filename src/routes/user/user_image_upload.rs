use actix_multipart::Multipart;
use actix_web::{
    web::{Data, Path},
    HttpResponse,
};

use crate::domain::UserView;
use crate::error::ApiError;
use crate::repository::UserRepository;
use crate::routes::read_image_upload;
use crate::services::{ImageStore, PROFILE_FOLDER};

pub async fn upload_user_image(
    path: Path<String>,
    payload: Multipart,
    users: Data<UserRepository>,
    image_store: Data<dyn ImageStore>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if users.get_by_id(&id).await?.is_none() {
        return Err(ApiError::NotFound("user Not Found".to_string()));
    }

    let image = read_image_upload(payload).await?;
    let image_url = image_store.store(image, PROFILE_FOLDER).await?;
    let user = users.set_image(&id, image_url).await?;
    tracing::info!("Profile image of {} saved", user.id);
    Ok(HttpResponse::Ok().json(UserView::from(user)))
}
