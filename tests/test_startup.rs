#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use striveflix_backend::configuration::StorageSettings;
use striveflix_backend::services::{
    EmailSender, ImageStore, ImageUpload, LookupCandidate, MovieLookup, OutgoingEmail,
    PdfRenderer, UpstreamError,
};
use striveflix_backend::startup::{open_repositories, run_server, AppState};
use tempfile::TempDir;

/// Title the fake movie lookup knows about.
pub const KNOWN_TITLE: &str = "Up";
pub const KNOWN_EXTERNAL_ID: &str = "tt1049413";

#[derive(Default)]
pub struct FakeImageStore {
    pub stored: Mutex<Vec<(String, ImageUpload)>>,
}

#[async_trait]
impl ImageStore for FakeImageStore {
    async fn store(&self, image: ImageUpload, folder: &str) -> Result<String, UpstreamError> {
        let mut stored = self.stored.lock().unwrap();
        let url = format!(
            "https://images.test/{}/{}.{}",
            folder,
            stored.len(),
            image.extension
        );
        stored.push((folder.to_string(), image));
        Ok(url)
    }
}

#[derive(Default)]
pub struct FakeEmailSender {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl EmailSender for FakeEmailSender {
    async fn send(&self, email: OutgoingEmail) -> Result<(), UpstreamError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

pub struct FakeMovieLookup;

#[async_trait]
impl MovieLookup for FakeMovieLookup {
    async fn search_by_title(&self, title: &str) -> Result<Vec<LookupCandidate>, UpstreamError> {
        if title == KNOWN_TITLE {
            Ok(vec![LookupCandidate {
                imdb_id: KNOWN_EXTERNAL_ID.to_string(),
                title: KNOWN_TITLE.to_string(),
                year: "2009".to_string(),
                kind: "movie".to_string(),
            }])
        } else {
            Ok(Vec::new())
        }
    }

    async fn get_by_id(&self, external_id: &str) -> Result<Value, UpstreamError> {
        if external_id == KNOWN_EXTERNAL_ID {
            Ok(json!({
                "imdbID": KNOWN_EXTERNAL_ID,
                "Title": KNOWN_TITLE,
                "Year": "2009",
                "Type": "movie",
                "Director": "Pete Docter",
            }))
        } else {
            Err(UpstreamError::new("movie lookup", "Incorrect IMDb ID."))
        }
    }
}

pub struct TestApp {
    pub address: String,
    pub data_dir: TempDir,
    pub image_store: Arc<FakeImageStore>,
    pub email_sender: Arc<FakeEmailSender>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Creates a movie through the API and returns its `imdbID`.
    pub async fn create_movie(&self, title: &str, year: &str, kind: &str) -> String {
        let res = reqwest::Client::new()
            .post(self.url("/media"))
            .json(&json!({"Title": title, "Year": year, "Type": kind}))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(res.status().as_u16(), 201);
        let body: Value = res.json().await.expect("Failed to parse the response body");
        body["imdbID"].as_str().unwrap().to_string()
    }

    pub fn sent_emails(&self) -> Vec<OutgoingEmail> {
        self.email_sender.sent.lock().unwrap().clone()
    }

    pub fn stored_images(&self) -> Vec<(String, ImageUpload)> {
        self.image_store.stored.lock().unwrap().clone()
    }
}

pub async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();

    let data_dir = tempfile::tempdir().expect("Failed to create data directory");
    let storage = StorageSettings {
        data_dir: data_dir.path().to_path_buf(),
        media_collection: "media".to_string(),
        users_collection: "users".to_string(),
    };
    let (media, users) = open_repositories(&storage)
        .await
        .expect("Failed to open collections");

    let image_store = Arc::new(FakeImageStore::default());
    let email_sender = Arc::new(FakeEmailSender::default());
    let state = AppState {
        media,
        users,
        image_store: image_store.clone(),
        email_sender: email_sender.clone(),
        movie_lookup: Arc::new(FakeMovieLookup),
        renderer: Arc::new(PdfRenderer),
        frontend_url: "*".to_string(),
    };
    let server = run_server(listener, state).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        data_dir,
        image_store,
        email_sender,
    }
}
