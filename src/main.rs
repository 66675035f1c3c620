use dotenv::dotenv;
use std::io::{Error, ErrorKind};
use std::net::TcpListener;
use striveflix_backend::configuration::get_configuration;
use striveflix_backend::startup::{self, AppState};
use striveflix_backend::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let subscriber = get_subscriber("striveflix", "info", std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration("configuration").map_err(|err| {
        Error::new(
            ErrorKind::Other,
            format!(
                "Failed to read `configuration.json`. Please make sure it exists and is valid JSON: {}",
                err
            ),
        )
    })?;
    let listener = TcpListener::bind(configuration.application.address())?;
    let state = AppState::from_settings(&configuration)
        .await
        .map_err(|err| Error::new(ErrorKind::Other, err.to_string()))?;

    tracing::info!("Listening on {}", listener.local_addr()?);
    startup::run_server(listener, state)?.await
}
