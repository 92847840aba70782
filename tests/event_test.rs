//! Event CRUD behavior over the HTTP surface.

mod common;

use axum::http::StatusCode;
use common::create_test_app;
use serde_json::json;

#[tokio::test]
async fn created_events_get_sequential_external_ids() {
    let app = create_test_app().await;
    let cookie = app.signup_and_signin("a@x.com", "password1").await;

    let (status, body) = app
        .post_json("/addEvent", json!({"title": "First"}), Some(&cookie))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["ourId"], 1);

    let (_, body) = app
        .post_json("/addEvent", json!({"title": "Second"}), Some(&cookie))
        .await;
    assert_eq!(body["event"]["ourId"], 2);
}

#[tokio::test]
async fn add_event_defaults_image_and_appears_in_public_listing() {
    let app = create_test_app().await;
    let cookie = app.signup_and_signin("a@x.com", "password1").await;

    app.post_json("/addEvent", json!({"title": "Meetup"}), Some(&cookie))
        .await;

    // Listing is public, GET and POST alike.
    let (status, body) = app.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"].as_array().unwrap().len(), 1);
    assert_eq!(
        body["events"][0]["image"],
        "https://placehold.co/600x400?text=No+Image"
    );

    let (status, body) = app.post_json("/", json!({}), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_listing_is_success_with_empty_array() {
    let app = create_test_app().await;

    let (status, body) = app.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["events"], json!([]));
}

#[tokio::test]
async fn get_specific_event_works_by_query_and_by_body() {
    let app = create_test_app().await;
    let cookie = app.signup_and_signin("a@x.com", "password1").await;

    app.post_json(
        "/addEvent",
        json!({"title": "Meetup", "location": "Oslo"}),
        Some(&cookie),
    )
    .await;

    let (status, body) = app.get("/getSpecificEvent?ourId=1", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["title"], "Meetup");

    let (status, body) = app
        .post_json("/getSpecificEvent", json!({"ourId": 1}), Some(&cookie))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["location"], "Oslo");
}

#[tokio::test]
async fn get_specific_missing_event_is_not_found() {
    let app = create_test_app().await;
    let cookie = app.signup_and_signin("a@x.com", "password1").await;

    let (status, body) = app.get("/getSpecificEvent?ourId=42", Some(&cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Event not found");
}

#[tokio::test]
async fn sorted_events_come_back_date_ascending() {
    let app = create_test_app().await;
    let cookie = app.signup_and_signin("a@x.com", "password1").await;

    app.post_json(
        "/addEvent",
        json!({"title": "Later", "date": "2026-06-01T10:00:00Z"}),
        Some(&cookie),
    )
    .await;
    app.post_json(
        "/addEvent",
        json!({"title": "Earlier", "date": "2026-05-01T10:00:00Z"}),
        Some(&cookie),
    )
    .await;

    let (status, body) = app.get("/sortedEvents", None).await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Earlier", "Later"]);
}

#[tokio::test]
async fn update_by_non_creator_is_forbidden_and_applies_nothing() {
    let app = create_test_app().await;
    let creator = app.signup_and_signin("a@x.com", "password1").await;
    let other = app.signup_and_signin("b@x.com", "password1").await;

    app.post_json("/addEvent", json!({"title": "Meetup"}), Some(&creator))
        .await;

    let (status, body) = app
        .post_json(
            "/updateSpecificEvent?ourId=1",
            json!({"title": "Hijacked"}),
            Some(&other),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let (_, body) = app.get("/getSpecificEvent?ourId=1", Some(&creator)).await;
    assert_eq!(body["event"]["title"], "Meetup");
}

#[tokio::test]
async fn update_by_creator_is_reflected_in_subsequent_reads() {
    let app = create_test_app().await;
    let cookie = app.signup_and_signin("a@x.com", "password1").await;

    app.post_json("/addEvent", json!({"title": "Meetup"}), Some(&cookie))
        .await;

    let (status, body) = app
        .post_json(
            "/updateSpecificEvent?ourId=1",
            json!({"title": "New"}),
            Some(&cookie),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["title"], "New");

    let (_, body) = app.get("/getSpecificEvent?ourId=1", Some(&cookie)).await;
    assert_eq!(body["event"]["title"], "New");
}

#[tokio::test]
async fn update_via_get_applies_query_string_patch() {
    let app = create_test_app().await;
    let cookie = app.signup_and_signin("a@x.com", "password1").await;

    app.post_json("/addEvent", json!({"title": "Meetup"}), Some(&cookie))
        .await;

    let (status, body) = app
        .get(
            "/updateSpecificEvent?ourId=1&title=Renamed&maxAttendees=25&date=2026-06-01T10:00:00Z",
            Some(&cookie),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["title"], "Renamed");
    assert_eq!(body["event"]["maxAttendees"], 25);

    let (_, body) = app.get("/getSpecificEvent?ourId=1", Some(&cookie)).await;
    assert_eq!(body["event"]["title"], "Renamed");
    assert_eq!(body["event"]["date"], "2026-06-01T10:00:00Z");
}

#[tokio::test]
async fn update_via_get_with_only_an_id_changes_nothing() {
    let app = create_test_app().await;
    let cookie = app.signup_and_signin("a@x.com", "password1").await;

    app.post_json(
        "/addEvent",
        json!({"title": "Meetup", "location": "Oslo"}),
        Some(&cookie),
    )
    .await;

    let (status, body) = app.get("/updateSpecificEvent?ourId=1", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["title"], "Meetup");
    assert_eq!(body["event"]["location"], "Oslo");
}

#[tokio::test]
async fn update_target_comes_from_the_request() {
    let app = create_test_app().await;
    let cookie = app.signup_and_signin("a@x.com", "password1").await;

    app.post_json("/addEvent", json!({"title": "One"}), Some(&cookie))
        .await;
    app.post_json("/addEvent", json!({"title": "Two"}), Some(&cookie))
        .await;

    app.post_json(
        "/updateSpecificEvent?ourId=2",
        json!({"title": "Two updated"}),
        Some(&cookie),
    )
    .await;

    let (_, body) = app.get("/getSpecificEvent?ourId=1", Some(&cookie)).await;
    assert_eq!(body["event"]["title"], "One");
    let (_, body) = app.get("/getSpecificEvent?ourId=2", Some(&cookie)).await;
    assert_eq!(body["event"]["title"], "Two updated");
}

#[tokio::test]
async fn delete_by_non_creator_is_forbidden() {
    let app = create_test_app().await;
    let creator = app.signup_and_signin("a@x.com", "password1").await;
    let other = app.signup_and_signin("b@x.com", "password1").await;

    app.post_json("/addEvent", json!({"title": "Meetup"}), Some(&creator))
        .await;

    let (status, _) = app.get("/deleteSpecificEvent?ourId=1", Some(&other)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/getSpecificEvent?ourId=1", Some(&creator)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_by_creator_removes_the_event() {
    let app = create_test_app().await;
    let cookie = app.signup_and_signin("a@x.com", "password1").await;

    app.post_json("/addEvent", json!({"title": "Meetup"}), Some(&cookie))
        .await;

    let (status, body) = app.get("/deleteSpecificEvent?ourId=1", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = app.get("/getSpecificEvent?ourId=1", Some(&cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_event_without_title_is_rejected() {
    let app = create_test_app().await;
    let cookie = app.signup_and_signin("a@x.com", "password1").await;

    let (status, body) = app
        .post_json("/addEvent", json!({"title": ""}), Some(&cookie))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
