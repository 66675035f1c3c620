use actix_web::{
    web::{Data, Query},
    HttpResponse,
};
use serde::Deserialize;

use crate::domain::UserView;
use crate::error::ApiError;
use crate::repository::{UserListing, UserRepository};

#[derive(Deserialize, Debug)]
pub struct UserQuery {
    pub email: Option<String>,
}

/// Every client, or the account registered with `email` when given.
pub async fn get_users(
    query: Query<UserQuery>,
    users: Data<UserRepository>,
) -> Result<HttpResponse, ApiError> {
    let email = query
        .into_inner()
        .email
        .filter(|email| !email.is_empty());
    match users.list(email.as_deref()).await? {
        UserListing::ByEmail(Some(user)) => Ok(HttpResponse::Ok().json(UserView::from(user))),
        UserListing::ByEmail(None) => Err(ApiError::NotFound("User Not Found".to_string())),
        UserListing::Clients(clients) => Ok(HttpResponse::Ok().json(
            clients.into_iter().map(UserView::from).collect::<Vec<_>>(),
        )),
    }
}

pub async fn get_admins(users: Data<UserRepository>) -> Result<HttpResponse, ApiError> {
    let admins: Vec<UserView> = users
        .list_admins()
        .await?
        .into_iter()
        .map(UserView::from)
        .collect();
    Ok(HttpResponse::Ok().json(admins))
}
