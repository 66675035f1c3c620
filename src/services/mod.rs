//! Third-party collaborators the routes depend on. Each one sits behind a
//! trait so the server can be started against fakes.

mod catalogue;
mod email;
mod image_store;
mod movie_lookup;

pub use catalogue::*;
pub use email::*;
pub use image_store::*;
pub use movie_lookup::*;

#[derive(Debug, thiserror::Error)]
#[error("{service} failed: {message}")]
pub struct UpstreamError {
    pub service: &'static str,
    pub message: String,
}

impl UpstreamError {
    pub fn new(service: &'static str, message: impl Into<String>) -> Self {
        Self {
            service,
            message: message.into(),
        }
    }
}
