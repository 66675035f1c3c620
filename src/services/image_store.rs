use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    config::{self, timeout::TimeoutConfig, Credentials},
    primitives::ByteStream,
    types::ObjectCannedAcl,
    Client,
};
use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use super::UpstreamError;
use crate::configuration::ImageStoreSettings;

pub const POSTER_FOLDER: &str = "striveflix";
pub const PROFILE_FOLDER: &str = "striveflix/users";

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub extension: String,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores the image under `folder` and returns its public URL.
    async fn store(&self, image: ImageUpload, folder: &str) -> Result<String, UpstreamError>;
}

pub struct S3ImageStore {
    client: Client,
    bucket: String,
    public_url: String,
}

impl S3ImageStore {
    pub fn new(settings: &ImageStoreSettings) -> Self {
        let credentials = Credentials::new(
            settings.access_key.clone(),
            settings.secret_key.clone(),
            None,
            None,
            "loaded from configuration",
        );
        let timeouts = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(settings.timeout_secs))
            .build();
        let conf = config::Builder::new()
            .region(Region::new(settings.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(settings.endpoint_url.clone())
            .force_path_style(true)
            .timeout_config(timeouts)
            .behavior_version(BehaviorVersion::latest())
            .build();

        Self {
            client: Client::from_conf(conf),
            bucket: settings.bucket.clone(),
            public_url: settings.public_url.trim_end_matches('/').to_string(),
        }
    }
}

fn object_name(extension: &str) -> String {
    format!("{}-{}.{}", Utc::now().timestamp_millis(), Uuid::new_v4(), extension)
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn store(&self, image: ImageUpload, folder: &str) -> Result<String, UpstreamError> {
        let key = format!("{}/{}", folder, object_name(&image.extension));
        let span = tracing::info_span!("Uploading image", %key, size = image.bytes.len());

        match self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(image.bytes))
            .content_type(image.content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .instrument(span)
            .await
        {
            Ok(_) => {
                tracing::info!("File saved successfully");
                Ok(format!("{}/{}", self.public_url, key))
            }
            Err(err) => {
                tracing::error!("Failed to save file: {:?}", err);
                Err(UpstreamError::new("image store", err.to_string()))
            }
        }
    }
}
