mod test_startup;
use serde::Deserialize;
use test_startup::*;

#[derive(Deserialize)]
struct ResponseMessage {
    message: String,
}

#[actix_rt::test]
async fn check_server_health() {
    let app = spawn_app().await;
    let client: reqwest::Client = reqwest::Client::new();

    let res = client
        .get(app.url("/"))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    let body = res
        .json::<ResponseMessage>()
        .await
        .expect("Failed to parse the response body");
    assert_eq!(body.message.as_str(), "StriveFlix catalogue is up");
}

#[actix_rt::test]
async fn collections_are_created_on_startup() {
    let app = spawn_app().await;
    for name in ["media.json", "users.json"] {
        let contents = std::fs::read_to_string(app.data_dir.path().join(name))
            .expect("Collection file should exist");
        assert_eq!(contents.trim(), "[]");
    }
}
