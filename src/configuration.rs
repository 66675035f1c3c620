use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub storage: StorageSettings,
    pub image_store: ImageStoreSettings,
    pub email: EmailSettings,
    pub movie_lookup: MovieLookupSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin, `*` allows any.
    pub frontend_url: String,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Deserialize, Clone)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub media_collection: String,
    pub users_collection: String,
}

#[derive(Deserialize, Clone)]
pub struct ImageStoreSettings {
    pub bucket: String,
    pub region: String,
    pub endpoint_url: String,
    pub public_url: String,
    pub access_key: String,
    pub secret_key: String,
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct EmailSettings {
    pub smtp_relay: String,
    pub username: String,
    pub password: String,
    pub sender: String,
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct MovieLookupSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

/// Reads `<filename>.json`, then applies `APP__SECTION__KEY` environment
/// overrides, e.g. `APP__APPLICATION__PORT=8080`.
pub fn get_configuration(filename: &str) -> Result<Settings, config::ConfigError> {
    let mut builder = Config::builder();
    builder = builder.add_source(File::new(filename, FileFormat::Json));
    builder = builder.add_source(
        Environment::with_prefix("APP")
            .prefix_separator("__")
            .separator("__"),
    );
    let config = builder.build()?;
    config.try_deserialize()
}
