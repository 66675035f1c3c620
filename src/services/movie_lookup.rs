use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::UpstreamError;
use crate::configuration::MovieLookupSettings;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LookupCandidate {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
}

#[async_trait]
pub trait MovieLookup: Send + Sync {
    async fn search_by_title(&self, title: &str) -> Result<Vec<LookupCandidate>, UpstreamError>;

    /// Full detail record of a movie of the external catalogue.
    async fn get_by_id(&self, external_id: &str) -> Result<Value, UpstreamError>;
}

/// Client for an OMDb compatible API (`?s=` search, `?i=` details).
pub struct OmdbMovieLookup {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<LookupCandidate>,
}

fn lookup_error(err: impl std::fmt::Display) -> UpstreamError {
    UpstreamError::new("movie lookup", err.to_string())
}

impl OmdbMovieLookup {
    pub fn new(settings: &MovieLookupSettings) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(lookup_error)?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    async fn query(&self, key: &str, value: &str) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), (key, value)])
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Movie lookup request error {:#?}", err);
                lookup_error(err)
            })?
            .error_for_status()
            .map_err(lookup_error)?;
        response.json::<Value>().await.map_err(lookup_error)
    }
}

#[async_trait]
impl MovieLookup for OmdbMovieLookup {
    async fn search_by_title(&self, title: &str) -> Result<Vec<LookupCandidate>, UpstreamError> {
        let body = self.query("s", title).await?;
        tracing::info!("Got movie lookup search response");
        parse_search(body)
    }

    async fn get_by_id(&self, external_id: &str) -> Result<Value, UpstreamError> {
        let body = self.query("i", external_id).await?;
        if body["Response"] == "False" {
            let reason = body["Error"].as_str().unwrap_or("unknown error");
            return Err(lookup_error(reason));
        }
        Ok(body)
    }
}

/// A search without hits answers `{"Response":"False"}` and yields no
/// candidates.
fn parse_search(body: Value) -> Result<Vec<LookupCandidate>, UpstreamError> {
    serde_json::from_value::<SearchResponse>(body)
        .map(|response| response.search)
        .map_err(lookup_error)
}
