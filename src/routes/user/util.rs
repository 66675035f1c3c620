use std::borrow::Cow;
use std::sync::LazyLock;

use actix_web::{
    guard::{self, GuardContext},
    http::header,
    web, Scope,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::UserProfile;
use crate::error::ApiError;
use crate::util::string_or_number;

use super::{
    add_to_watchlist, delete_user, get_admins, get_user, get_users, get_watchlist,
    register_admin, register_admin_with_image, register_client, remove_from_watchlist,
    update_admin, update_user, upload_user_image,
};

pub fn user_source() -> Scope {
    web::scope("/user")
        .route("", web::get().to(get_users))
        .route("", web::post().to(register_client))
        .route("/admin", web::get().to(get_admins))
        .route(
            "/admin",
            web::post()
                .guard(guard::fn_guard(is_multipart))
                .to(register_admin_with_image),
        )
        .route("/admin", web::post().to(register_admin))
        .route("/admin/{id}", web::put().to(update_admin))
        .route("/{id}", web::get().to(get_user))
        .route("/{id}", web::put().to(update_user))
        .route("/{id}", web::delete().to(delete_user))
        .route("/{id}/myList", web::get().to(get_watchlist))
        .route("/{id}/myList/{imdb_id}", web::post().to(add_to_watchlist))
        .route("/{id}/myList/{imdb_id}", web::delete().to(remove_from_watchlist))
        .route("/{id}/upload", web::post().to(upload_user_image))
}

fn is_multipart(ctx: &GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |value| value.starts_with("multipart/form-data"))
}

static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9]+$").expect("valid alphanumeric pattern"));
static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)$").expect("valid numeric pattern"));

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 || !ALPHANUMERIC.is_match(password) {
        return Err(ValidationError::new("Password format")
            .with_message(Cow::from("Add a valid password please!")));
    }
    Ok(())
}

pub fn validate_year_of_birth(year: &str) -> Result<(), ValidationError> {
    if !NUMERIC.is_match(year) {
        return Err(ValidationError::new("Year of birth format")
            .with_message(Cow::from("Year of birth should be a number")));
    }
    Ok(())
}

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!("Failed to hash password {:?}", err);
            ApiError::Internal(err.to_string())
        })
}

/// Account fields of a client, used on registration and on updates.
#[derive(Deserialize, Debug, Validate)]
pub struct ClientRequest {
    #[serde(default)]
    #[validate(length(min = 4, message = "No way! Name too short!"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 4, message = "No way! Surname too short!"))]
    pub surname: String,
    #[serde(default)]
    #[validate(email(message = "No way! Email not correct!"))]
    pub email: String,
    #[serde(rename = "yearOfBirth", default, deserialize_with = "string_or_number")]
    #[validate(custom(function = "validate_year_of_birth"))]
    pub year_of_birth: String,
    #[serde(default)]
    #[validate(length(min = 5, message = "Invalid address"))]
    pub address: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Add City please!"))]
    pub city: String,
    #[serde(rename = "postalCode", default, deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "Add Postal Code please!"))]
    pub postal_code: String,
    #[serde(rename = "cardExpDate", default, deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "Add Exp. Date please!"))]
    pub card_exp_date: String,
    #[serde(rename = "cardNumber", default, deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "Add Credit Card Number please!"))]
    pub card_number: String,
    #[serde(default)]
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

impl ClientRequest {
    pub fn into_profile(self) -> Result<UserProfile, ApiError> {
        Ok(UserProfile {
            password_hash: hash_password(&self.password)?,
            name: self.name,
            surname: self.surname,
            email: self.email,
            year_of_birth: Some(self.year_of_birth),
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            card_number: Some(self.card_number),
            card_exp_date: Some(self.card_exp_date),
        })
    }
}

/// Account fields of an administrator. Admins carry no birth year or card.
#[derive(Deserialize, Debug, Validate)]
pub struct AdminRequest {
    #[serde(default)]
    #[validate(length(min = 4, message = "No way! Name too short!"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 4, message = "No way! Surname too short!"))]
    pub surname: String,
    #[serde(default)]
    #[validate(email(message = "No way! Email not correct!"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 5, message = "Invalid address"))]
    pub address: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Add City please!"))]
    pub city: String,
    #[serde(rename = "postalCode", default, deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "Add Postal Code please!"))]
    pub postal_code: String,
    #[serde(default)]
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

impl AdminRequest {
    pub fn into_profile(self) -> Result<UserProfile, ApiError> {
        Ok(UserProfile {
            password_hash: hash_password(&self.password)?,
            name: self.name,
            surname: self.surname,
            email: self.email,
            year_of_birth: None,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            card_number: None,
            card_exp_date: None,
        })
    }
}
