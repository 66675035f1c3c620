use actix_multipart::Multipart;
use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use serde_json::Value;

use super::{AdminRequest, ClientRequest};
use crate::domain::{Role, UserView};
use crate::error::ApiError;
use crate::repository::UserRepository;
use crate::routes::{read_form_with_image, validate_body};
use crate::services::{ImageStore, PROFILE_FOLDER};

pub async fn register_client(
    body: Json<ClientRequest>,
    users: Data<UserRepository>,
) -> Result<HttpResponse, ApiError> {
    validate_body(&body.0)?;
    let profile = body.into_inner().into_profile()?;
    let user = users.register(profile, Role::Client).await?;
    tracing::info!("Client {} registered", user.id);
    Ok(HttpResponse::Created().json(UserView::from(user)))
}

pub async fn register_admin(
    body: Json<AdminRequest>,
    users: Data<UserRepository>,
) -> Result<HttpResponse, ApiError> {
    validate_body(&body.0)?;
    let profile = body.into_inner().into_profile()?;
    let user = users.register(profile, Role::Admin).await?;
    tracing::info!("Admin {} registered", user.id);
    Ok(HttpResponse::Created().json(UserView::from(user)))
}

/// Admin registration sent as a multipart form, with an optional `image`
/// file stored as the profile picture.
pub async fn register_admin_with_image(
    payload: Multipart,
    users: Data<UserRepository>,
    image_store: Data<dyn ImageStore>,
) -> Result<HttpResponse, ApiError> {
    let (fields, image) = read_form_with_image(payload).await?;
    let body: AdminRequest = serde_json::from_value(Value::Object(fields)).map_err(|err| {
        tracing::info!("Rejected admin form: {}", err);
        ApiError::invalid("body", &err.to_string())
    })?;
    validate_body(&body)?;
    let profile = body.into_profile()?;

    let image_url = match image {
        Some(image) => Some(image_store.store(image, PROFILE_FOLDER).await?),
        None => None,
    };
    let mut user = users.register(profile, Role::Admin).await?;
    if let Some(image_url) = image_url {
        user = users.set_image(&user.id, image_url).await?;
    }
    tracing::info!("Admin {} registered", user.id);
    Ok(HttpResponse::Created().json(UserView::from(user)))
}
