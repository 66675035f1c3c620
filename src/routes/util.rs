use actix_multipart::{Field, Multipart};
use actix_web::web::BytesMut;
use futures_util::TryStreamExt;
use mime::{IMAGE_GIF, IMAGE_JPEG, IMAGE_PNG};
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::ApiError;
use crate::services::ImageUpload;

const MAX_FILE_SIZE: usize = 5_000_600; // 5 mb
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

/// Runs the declarative checks of a request body.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), ApiError> {
    body.validate().map_err(|errors| {
        let err = ApiError::from(errors);
        tracing::info!("Rejected request body: {:?}", err);
        err
    })
}

fn invalid_upload(message: &str) -> ApiError {
    tracing::error!("{}", message);
    ApiError::invalid("image", message)
}

async fn read_field(field: &mut Field, limit: usize, too_large: &str) -> Result<BytesMut, ApiError> {
    let mut bytes = BytesMut::new();
    loop {
        let chunk = match field.try_next().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(err) => {
                tracing::error!("Multipart error {:?}", err);
                return Err(invalid_upload("Malformed multipart body"));
            }
        };
        if bytes.len() + chunk.len() > limit {
            return Err(invalid_upload(too_large));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_image_field(field: &mut Field) -> Result<ImageUpload, ApiError> {
    let (content_type, extension) = match field.content_type() {
        Some(mime) if *mime == IMAGE_JPEG => ("image/jpeg", "jpeg"),
        Some(mime) if *mime == IMAGE_PNG => ("image/png", "png"),
        Some(mime) if *mime == IMAGE_GIF => ("image/gif", "gif"),
        _ => return Err(invalid_upload("Invalid file type")),
    };

    let file_bytes = read_field(field, MAX_FILE_SIZE, "File is too large").await?;
    if file_bytes.is_empty() {
        return Err(invalid_upload("No file in request"));
    }

    tracing::info!("Received image of {} bytes", file_bytes.len());
    Ok(ImageUpload {
        bytes: file_bytes.to_vec(),
        content_type: content_type.to_string(),
        extension: extension.to_string(),
    })
}

async fn next_field(payload: &mut Multipart) -> Result<Option<Field>, ApiError> {
    payload.try_next().await.map_err(|err| {
        tracing::error!("Multipart error {:?}", err);
        invalid_upload("Malformed multipart body")
    })
}

/// Reads the `image` field of a multipart upload into memory.
pub async fn read_image_upload(mut payload: Multipart) -> Result<ImageUpload, ApiError> {
    let mut field = match next_field(&mut payload).await? {
        Some(field) => field,
        None => return Err(invalid_upload("No file in request")),
    };
    if field.name() != Some("image") {
        return Err(invalid_upload("Invalid field name"));
    }
    read_image_field(&mut field).await
}

/// Reads a multipart form: text fields as JSON strings and an optional
/// `image` file.
pub async fn read_form_with_image(
    mut payload: Multipart,
) -> Result<(Map<String, Value>, Option<ImageUpload>), ApiError> {
    let mut fields = Map::new();
    let mut image = None;
    while let Some(mut field) = next_field(&mut payload).await? {
        let name = match field.name() {
            Some(name) => name.to_string(),
            None => return Err(invalid_upload("Invalid field name")),
        };
        if name == "image" {
            image = Some(read_image_field(&mut field).await?);
            continue;
        }
        let bytes = read_field(&mut field, MAX_TEXT_FIELD_SIZE, "Form field is too large").await?;
        let value = String::from_utf8(bytes.to_vec())
            .map_err(|_| ApiError::invalid(&name, "Form field is not valid text"))?;
        fields.insert(name, Value::String(value));
    }
    Ok((fields, image))
}
