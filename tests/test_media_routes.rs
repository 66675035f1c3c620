mod test_startup;

use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use test_startup::*;

#[actix_rt::test]
async fn created_movie_is_listed_without_reviews() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let id = app.create_movie("Up", "2009", "movie").await;

    let res = client
        .get(app.url("/media"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status().as_u16(), 200);
    let body: Vec<Value> = res.json().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["imdbID"], id.as_str());
    assert_eq!(body[0]["Title"], "Up");
    assert!(body[0].get("reviews").is_none());
}

#[actix_rt::test]
async fn movie_without_title_is_rejected_with_every_field() {
    let app = spawn_app().await;
    let res = reqwest::Client::new()
        .post(app.url("/media"))
        .json(&json!({"Poster": "x"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status().as_u16(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["kind"], "validation_failed");
    assert_eq!(body["error"]["fields"].as_array().unwrap().len(), 3);
}

#[actix_rt::test]
async fn malformed_json_is_a_validation_failure() {
    let app = spawn_app().await;
    let res = reqwest::Client::new()
        .post(app.url("/media"))
        .header("Content-Type", "application/json")
        .body("{\"Title\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status().as_u16(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["kind"], "validation_failed");
}

#[actix_rt::test]
async fn list_filters_by_search_then_year_then_type() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    app.create_movie("Up", "2009", "movie").await;
    app.create_movie("Upload", "2020", "series").await;
    app.create_movie("Heat", "1995", "movie").await;

    let titles = |body: Vec<Value>| -> Vec<String> {
        let mut titles: Vec<String> = body
            .iter()
            .map(|movie| movie["Title"].as_str().unwrap().to_string())
            .collect();
        titles.sort();
        titles
    };

    let by_search: Vec<Value> = client
        .get(app.url("/media?s=UP&year=1995"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(titles(by_search), vec!["Up", "Upload"]);

    let by_year: Vec<Value> = client
        .get(app.url("/media?year=1995&type=series"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(titles(by_year), vec!["Heat"]);

    let by_type: Vec<Value> = client
        .get(app.url("/media?type=series&s="))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(titles(by_type), vec!["Upload"]);
}

#[actix_rt::test]
async fn update_keeps_the_id() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let id = app.create_movie("Up", "2009", "movie").await;

    let res = client
        .put(app.url(&format!("/media/{}", id)))
        .json(&json!({"imdbID": "other", "Title": "Up!", "Year": "2010", "Type": "movie"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["imdbID"], id.as_str());
    assert_eq!(body["Title"], "Up!");
    assert_eq!(body["Year"], "2010");

    let missing = client
        .put(app.url("/media/unknown"))
        .json(&json!({"Title": "Up!", "Year": "2010", "Type": "movie"}))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[actix_rt::test]
async fn details_come_from_the_lookup_or_the_local_record() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let known = app.create_movie(KNOWN_TITLE, "2009", "movie").await;
    let local = app.create_movie("Home Video", "2001", "movie").await;

    let hydrated: Value = client
        .get(app.url(&format!("/media/{}", known)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hydrated["imdbID"], KNOWN_EXTERNAL_ID);
    assert_eq!(hydrated["Director"], "Pete Docter");

    let fallback: Value = client
        .get(app.url(&format!("/media/{}", local)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fallback["imdbID"], local.as_str());
    assert_eq!(fallback["Title"], "Home Video");

    let missing = client.get(app.url("/media/unknown")).send().await.unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[actix_rt::test]
async fn deleting_a_movie_removes_it_from_watchlists() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let id = app.create_movie("Up", "2009", "movie").await;

    let user: Value = client
        .post(app.url("/user"))
        .json(&json!({
            "name": "Maria",
            "surname": "Rossi",
            "email": "maria@example.com",
            "yearOfBirth": 1990,
            "address": "Via Roma 1",
            "city": "Rome",
            "postalCode": "00100",
            "cardExpDate": "12/30",
            "cardNumber": "4111111111111111",
            "password": "secret123"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let user_id = user["_id"].as_str().unwrap();
    let added = client
        .post(app.url(&format!("/user/{}/myList/{}", user_id, id)))
        .send()
        .await
        .unwrap();
    assert_eq!(added.status().as_u16(), 201);

    let res = client
        .delete(app.url(&format!("/media/{}", id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status().as_u16(), 204);

    let gone = client
        .get(app.url(&format!("/media/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status().as_u16(), 404);

    let watchlist: Vec<String> = client
        .get(app.url(&format!("/user/{}/myList", user_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(watchlist.is_empty());

    let again = client
        .delete(app.url(&format!("/media/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status().as_u16(), 404);
}

fn image_form(field: &str, mime: &str) -> Form {
    let part = Part::bytes(vec![0x89, b'P', b'N', b'G', 1, 2, 3])
        .file_name("poster.png")
        .mime_str(mime)
        .unwrap();
    Form::new().part(field.to_string(), part)
}

#[actix_rt::test]
async fn poster_upload_stores_the_image_url() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let id = app.create_movie("Up", "2009", "movie").await;

    let res = client
        .post(app.url(&format!("/media/{}/upload", id)))
        .multipart(image_form("image", "image/png"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["Poster"], "https://images.test/striveflix/0.png");

    let stored = app.stored_images();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].0, "striveflix");
    assert_eq!(stored[0].1.content_type, "image/png");
}

#[actix_rt::test]
async fn poster_upload_rejects_wrong_field_or_type() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let id = app.create_movie("Up", "2009", "movie").await;

    for form in [image_form("poster", "image/png"), image_form("image", "text/plain")] {
        let res = client
            .post(app.url(&format!("/media/{}/upload", id)))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(res.status().as_u16(), 400);
    }

    let missing = client
        .post(app.url("/media/unknown/upload"))
        .multipart(image_form("image", "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
    assert!(app.stored_images().is_empty());
}

#[actix_rt::test]
async fn catalogue_pdf_needs_a_title_and_a_match() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    app.create_movie("Up", "2009", "movie").await;

    let no_title = client
        .get(app.url("/media/catalogue/pdf"))
        .send()
        .await
        .unwrap();
    assert_eq!(no_title.status().as_u16(), 400);

    let no_match = client
        .get(app.url("/media/catalogue/pdf?title=zzz"))
        .send()
        .await
        .unwrap();
    assert_eq!(no_match.status().as_u16(), 404);

    let res = client
        .get(app.url("/media/catalogue/pdf?title=up"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(
        res.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );
    let bytes = res.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[actix_rt::test]
async fn catalogue_email_attaches_the_pdf() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    app.create_movie("Up", "2009", "movie").await;

    let res = client
        .post(app.url("/media/catalogue/email"))
        .json(&json!({"title": "Up", "email": "fan@example.com"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status().as_u16(), 201);

    let sent = app.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "fan@example.com");
    assert_eq!(sent[0].subject, "Movies Catalogue");
    assert!(sent[0].text.contains("Up"));
    assert_eq!(sent[0].attachments.len(), 1);
    assert_eq!(sent[0].attachments[0].filename, "movies.pdf");
    assert_eq!(sent[0].attachments[0].content_type, "application/pdf");
    assert!(sent[0].attachments[0].content.starts_with(b"%PDF"));
}

#[actix_rt::test]
async fn catalogue_email_validates_before_sending() {
    let app = spawn_app().await;
    let res = reqwest::Client::new()
        .post(app.url("/media/catalogue/email"))
        .json(&json!({"title": "", "email": "not-an-email"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status().as_u16(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["fields"].as_array().unwrap().len(), 2);
    assert!(app.sent_emails().is_empty());
}
