mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{
    my_doctor_id, register_client, register_doctor, seed_specialty, send, spawn_app, TestApp,
};

async fn setup(app: &TestApp) -> (String, i64) {
    let specialty_id = seed_specialty(app, "Dermatology").await;
    let doctor_token = register_doctor(app, "doc@example.com", specialty_id).await;
    let doctor_id = my_doctor_id(app, &doctor_token).await;
    let client_token = register_client(app, "alice@example.com").await;
    (client_token, doctor_id)
}

#[tokio::test]
async fn review_feeds_the_doctor_catalog_aggregates() {
    let app = spawn_app().await;
    let (client_token, doctor_id) = setup(&app).await;
    let other_token = register_client(&app, "bob@example.com").await;

    let (status, review) = send(
        &app,
        "POST",
        &format!("/doctors/{doctor_id}/reviews"),
        Some(&client_token),
        Some(json!({ "rating": 5, "comment": "Great listener" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(review["rating"], 5);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/doctors/{doctor_id}/reviews"),
        Some(&other_token),
        Some(json!({ "rating": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, doctors) = send(&app, "GET", "/doctors", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let doctors = doctors.as_array().unwrap();
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0]["reviews_count"], 2);
    assert_eq!(doctors[0]["avg_rating"], 4.5);

    let (status, listed) = send(
        &app,
        "GET",
        &format!("/doctors/{doctor_id}/reviews"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn one_review_per_doctor_per_client() {
    let app = spawn_app().await;
    let (client_token, doctor_id) = setup(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/doctors/{doctor_id}/reviews"),
        Some(&client_token),
        Some(json!({ "rating": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/doctors/{doctor_id}/reviews"),
        Some(&client_token),
        Some(json!({ "rating": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, mine) = send(&app, "GET", "/reviews/mine", Some(&client_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rating_outside_one_to_five_is_rejected() {
    let app = spawn_app().await;
    let (client_token, doctor_id) = setup(&app).await;

    for rating in [0, 6] {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/doctors/{doctor_id}/reviews"),
            Some(&client_token),
            Some(json!({ "rating": rating })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn reviewing_an_unknown_doctor_is_not_found() {
    let app = spawn_app().await;
    let client_token = register_client(&app, "alice@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/doctors/999/reviews",
        Some(&client_token),
        Some(json!({ "rating": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn favorites_add_is_idempotent() {
    let app = spawn_app().await;
    let (client_token, doctor_id) = setup(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/favorites/doctors/{doctor_id}"),
        Some(&client_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/favorites/doctors/{doctor_id}"),
        Some(&client_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["already_favorite"], true);

    let (status, favorites) = send(&app, "GET", "/favorites", Some(&client_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let favorites = favorites.as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["doctor_id"], doctor_id);
    assert_eq!(favorites[0]["doctor_name"], "Dr. Test");
    assert_eq!(favorites[0]["specialty_name"], "Dermatology");
}

#[tokio::test]
async fn removing_a_missing_favorite_is_not_found() {
    let app = spawn_app().await;
    let (client_token, doctor_id) = setup(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/favorites/doctors/{doctor_id}"),
        Some(&client_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/favorites/doctors/{doctor_id}"),
        Some(&client_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/favorites/doctors/{doctor_id}"),
        Some(&client_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn favoriting_an_unknown_doctor_is_not_found() {
    let app = spawn_app().await;
    let client_token = register_client(&app, "alice@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/favorites/doctors/999",
        Some(&client_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
