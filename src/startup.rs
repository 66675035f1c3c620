use crate::configuration::{Settings, StorageSettings};
use crate::error::json_error_handler;
use crate::repository::{MediaRepository, UserRepository};
use crate::routes::{hello_world::handler, media_source, review_source, user_source};
use crate::services::{
    DocumentRenderer, EmailSender, ImageStore, MovieLookup, OmdbMovieLookup, PdfRenderer,
    S3ImageStore, SmtpEmailSender, UpstreamError,
};
use crate::storage::{Collection, CollectionBackend, JsonFileBackend, StoreError};

use actix_web::{
    dev::Server,
    web::{self, Data},
    App, HttpServer,
};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use actix_cors::Cors;
use actix_web::http::header;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Everything the handlers need, built once and shared by every worker.
pub struct AppState {
    pub media: MediaRepository,
    pub users: UserRepository,
    pub image_store: Arc<dyn ImageStore>,
    pub email_sender: Arc<dyn EmailSender>,
    pub movie_lookup: Arc<dyn MovieLookup>,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub frontend_url: String,
}

impl AppState {
    pub async fn from_settings(settings: &Settings) -> Result<Self, StartupError> {
        let (media, users) = open_repositories(&settings.storage).await?;
        Ok(Self {
            media,
            users,
            image_store: Arc::new(S3ImageStore::new(&settings.image_store)),
            email_sender: Arc::new(SmtpEmailSender::new(&settings.email)?),
            movie_lookup: Arc::new(OmdbMovieLookup::new(&settings.movie_lookup)?),
            renderer: Arc::new(PdfRenderer),
            frontend_url: settings.application.frontend_url.clone(),
        })
    }
}

/// Opens both collections in the data directory, creating them when absent.
pub async fn open_repositories(
    settings: &StorageSettings,
) -> Result<(MediaRepository, UserRepository), StoreError> {
    let backend: Arc<dyn CollectionBackend> = Arc::new(JsonFileBackend::new(&settings.data_dir));
    let media = MediaRepository::new(Collection::new(
        settings.media_collection.clone(),
        backend.clone(),
    ));
    let users = UserRepository::new(Collection::new(
        settings.users_collection.clone(),
        backend,
    ));
    media.ensure().await?;
    users.ensure().await?;
    Ok((media, users))
}

fn configure_cors(frontend_url: &str) -> Cors {
    let mut cors = Cors::default();
    cors = if frontend_url == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(frontend_url)
    };
    cors.allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

pub fn run_server(listener: TcpListener, state: AppState) -> Result<Server, std::io::Error> {
    let media = Data::new(state.media);
    let users = Data::new(state.users);
    let image_store: Data<dyn ImageStore> = Data::from(state.image_store);
    let email_sender: Data<dyn EmailSender> = Data::from(state.email_sender);
    let movie_lookup: Data<dyn MovieLookup> = Data::from(state.movie_lookup);
    let renderer: Data<dyn DocumentRenderer> = Data::from(state.renderer);
    let frontend_url = state.frontend_url;

    let server = HttpServer::new(move || {
        let cors = configure_cors(frontend_url.as_str());

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(media.clone())
            .app_data(users.clone())
            .app_data(image_store.clone())
            .app_data(email_sender.clone())
            .app_data(movie_lookup.clone())
            .app_data(renderer.clone())
            .route("/", web::get().to(handler))
            .service(media_source())
            .service(review_source())
            .service(user_source())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
