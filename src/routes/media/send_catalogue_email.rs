use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use serde::Deserialize;
use validator::Validate;

use super::render_catalogue;
use crate::error::ApiError;
use crate::repository::MediaRepository;
use crate::routes::validate_body;
use crate::services::{DocumentRenderer, EmailAttachment, EmailSender, OutgoingEmail};
use crate::util::ResponseMessage;

#[derive(Deserialize, Debug, Validate)]
pub struct CatalogueEmailRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(email(message = "Not a valid email"))]
    pub email: String,
}

fn build_email(title: &str, to: String, document: Vec<u8>, content_type: &str) -> OutgoingEmail {
    OutgoingEmail {
        to,
        from: None,
        subject: "Movies Catalogue".to_string(),
        text: format!("Thank you for requesting a movie catalogue for {}", title),
        html: format!(
            "<strong>Thank you for requesting a movie catalogue for \"{}\"!!!</strong>",
            title
        ),
        attachments: vec![EmailAttachment {
            filename: "movies.pdf".to_string(),
            content_type: content_type.to_string(),
            content: document,
        }],
    }
}

/// Emails the PDF catalogue of every movie whose title contains `title`.
pub async fn send_catalogue_email(
    body: Json<CatalogueEmailRequest>,
    media: Data<MediaRepository>,
    renderer: Data<dyn DocumentRenderer>,
    email_sender: Data<dyn EmailSender>,
) -> Result<HttpResponse, ApiError> {
    validate_body(&body.0)?;
    let CatalogueEmailRequest { title, email } = body.into_inner();

    let movies = media.search_by_title(&title).await?;
    if movies.is_empty() {
        return Err(ApiError::NotFound("Movies Not Found".to_string()));
    }

    let content_type = renderer.content_type();
    let document = render_catalogue(renderer, &title, &movies).await?;
    email_sender
        .send(build_email(&title, email, document, content_type))
        .await?;

    tracing::info!("Catalogue for {} emailed", title);
    Ok(HttpResponse::Created().json(ResponseMessage::new("Email sent")))
}
