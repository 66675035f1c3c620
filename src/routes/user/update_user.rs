use actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};

use super::{AdminRequest, ClientRequest};
use crate::domain::UserView;
use crate::error::ApiError;
use crate::repository::{UpdateScope, UserRepository};
use crate::routes::validate_body;

/// Replaces the profile of any account. The password is hashed again.
pub async fn update_user(
    path: Path<String>,
    body: Json<ClientRequest>,
    users: Data<UserRepository>,
) -> Result<HttpResponse, ApiError> {
    validate_body(&body.0)?;
    let profile = body.into_inner().into_profile()?;
    let user = users
        .update(&path.into_inner(), profile, UpdateScope::AnyUser)
        .await?;
    tracing::info!("User {} updated", user.id);
    Ok(HttpResponse::Ok().json(UserView::from(user)))
}

pub async fn update_admin(
    path: Path<String>,
    body: Json<AdminRequest>,
    users: Data<UserRepository>,
) -> Result<HttpResponse, ApiError> {
    validate_body(&body.0)?;
    let profile = body.into_inner().into_profile()?;
    let user = users
        .update(&path.into_inner(), profile, UpdateScope::AdminOnly)
        .await?;
    tracing::info!("Admin {} updated", user.id);
    Ok(HttpResponse::Ok().json(UserView::from(user)))
}
