use actix_web::{
    web::{Data, Path},
    HttpResponse,
};

use crate::error::ApiError;
use crate::repository::UserRepository;

pub async fn delete_user(
    path: Path<String>,
    users: Data<UserRepository>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    users.delete(&id).await?;
    tracing::info!("User {} deleted", id);
    Ok(HttpResponse::NoContent().finish())
}
