mod test_startup;

use serde_json::{json, Value};
use test_startup::*;

#[actix_rt::test]
async fn review_lifecycle() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let id = app.create_movie("Up", "2009", "movie").await;

    let res = client
        .post(app.url("/reviews"))
        .json(&json!({"elementID": id, "comment": "Great", "rate": 5}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status().as_u16(), 201);
    let movie: Value = res.json().await.unwrap();
    let reviews = movie["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rate"], 5.0);
    assert_eq!(reviews[0]["elementID"], id.as_str());
    assert!(reviews[0]["createdAt"].is_string());
    let review_id = reviews[0]["_id"].as_str().unwrap().to_string();

    let edited: Vec<Value> = client
        .put(app.url(&format!("/reviews/{}/{}", id, review_id)))
        .json(&json!({"comment": "Still great", "rate": 4.5}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(edited[0]["comment"], "Still great");
    assert_eq!(edited[0]["rate"], 4.5);
    assert!(edited[0]["editedAt"].is_string());

    let deleted = client
        .delete(app.url(&format!("/reviews/{}/{}", id, review_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 204);

    let listed: Vec<Value> = client
        .get(app.url(&format!("/reviews/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[actix_rt::test]
async fn movie_that_was_never_reviewed_has_no_reviews() {
    let app = spawn_app().await;
    let id = app.create_movie("Up", "2009", "movie").await;

    let res = reqwest::Client::new()
        .get(app.url(&format!("/reviews/{}", id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status().as_u16(), 404);
}

#[actix_rt::test]
async fn review_fields_are_validated() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let id = app.create_movie("Up", "2009", "movie").await;

    let missing = client
        .post(app.url("/reviews"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 400);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"]["fields"].as_array().unwrap().len(), 3);

    let out_of_range = client
        .post(app.url("/reviews"))
        .json(&json!({"elementID": id, "comment": "Meh", "rate": 7}))
        .send()
        .await
        .unwrap();
    assert_eq!(out_of_range.status().as_u16(), 400);
}

#[actix_rt::test]
async fn reviews_of_unknown_movies_or_reviews_are_not_found() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let id = app.create_movie("Up", "2009", "movie").await;

    let unknown_movie = client
        .post(app.url("/reviews"))
        .json(&json!({"elementID": "unknown", "comment": "Great", "rate": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_movie.status().as_u16(), 404);

    client
        .post(app.url("/reviews"))
        .json(&json!({"elementID": id, "comment": "Great", "rate": 5}))
        .send()
        .await
        .unwrap();

    let unknown_review = client
        .put(app.url(&format!("/reviews/{}/unknown", id)))
        .json(&json!({"comment": "Great", "rate": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_review.status().as_u16(), 404);

    let unknown_delete = client
        .delete(app.url(&format!("/reviews/{}/unknown", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_delete.status().as_u16(), 404);
}

#[actix_rt::test]
async fn rated_movies_are_listed_by_mean_rating() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let good = app.create_movie("Good", "2001", "movie").await;
    let poor = app.create_movie("Poor", "2002", "movie").await;

    for (id, rate) in [(&good, 5), (&good, 4), (&poor, 1)] {
        client
            .post(app.url("/reviews"))
            .json(&json!({"elementID": id, "comment": "Rated", "rate": rate}))
            .send()
            .await
            .unwrap();
    }

    let listed: Vec<Value> = client
        .get(app.url("/media"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed[0]["imdbID"], poor.as_str());
    assert_eq!(listed[1]["imdbID"], good.as_str());
}
