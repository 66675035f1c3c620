use actix_web::{
    web::{Data, Path},
    HttpResponse,
};

use crate::domain::UserView;
use crate::error::ApiError;
use crate::repository::UserRepository;

pub async fn get_user(
    path: Path<String>,
    users: Data<UserRepository>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match users.get_by_id(&id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(UserView::from(user))),
        None => {
            tracing::info!("User {} not found", id);
            Err(ApiError::NotFound("User Not Found".to_string()))
        }
    }
}
