mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{
    book_slot, create_slot, my_doctor_id, register_client, register_doctor, seed_admin,
    seed_specialty, send, spawn_app, TestApp,
};

async fn admin_user_ids(app: &TestApp, admin_token: &str) -> Vec<i64> {
    let (status, users) = send(app, "GET", "/admin/users?role=ADMIN", Some(admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn admin_surface_is_admin_only() {
    let app = spawn_app().await;
    let client_token = register_client(&app, "alice@example.com").await;

    let (status, _) = send(&app, "GET", "/admin/users", Some(&client_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/admin/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn the_last_admin_cannot_be_deleted() {
    let app = spawn_app().await;
    let admin_token = seed_admin(&app, "root@example.com").await;
    let ids = admin_user_ids(&app, &admin_token).await;
    assert_eq!(ids.len(), 1);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/users/{}", ids[0]),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // With a second admin present the deletion goes through.
    seed_admin(&app, "backup@example.com").await;
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/users/{}", ids[0]),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn admin_can_list_and_search_users() {
    let app = spawn_app().await;
    let admin_token = seed_admin(&app, "root@example.com").await;
    register_client(&app, "alice@example.com").await;
    register_client(&app, "bob@example.com").await;

    let (status, users) = send(
        &app,
        "GET",
        "/admin/users?role=CLIENT&q=alice",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "alice@example.com");
}

#[tokio::test]
async fn specialty_management_round_trip() {
    let app = spawn_app().await;
    let admin_token = seed_admin(&app, "root@example.com").await;

    let (status, created) = send(
        &app,
        "POST",
        "/admin/specialties",
        Some(&admin_token),
        Some(json!({ "name": "Cardiology" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let specialty_id = created["id"].as_i64().unwrap();

    // Case-insensitive duplicate check.
    let (status, _) = send(
        &app,
        "POST",
        "/admin/specialties",
        Some(&admin_token),
        Some(json!({ "name": "cardiology" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, renamed) = send(
        &app,
        "PUT",
        &format!("/admin/specialties/{specialty_id}"),
        Some(&admin_token),
        Some(json!({ "name": "Interventional Cardiology" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Interventional Cardiology");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/specialties/{specialty_id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn a_referenced_specialty_cannot_be_deleted() {
    let app = spawn_app().await;
    let admin_token = seed_admin(&app, "root@example.com").await;
    let specialty_id = seed_specialty(&app, "Neurology").await;
    register_doctor(&app, "doc@example.com", specialty_id).await;

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/specialties/{specialty_id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn deactivated_doctors_drop_out_of_the_active_catalog() {
    let app = spawn_app().await;
    let admin_token = seed_admin(&app, "root@example.com").await;
    let specialty_id = seed_specialty(&app, "Psychiatry").await;
    let doctor_token = register_doctor(&app, "doc@example.com", specialty_id).await;
    let doctor_id = my_doctor_id(&app, &doctor_token).await;

    let (status, profile) = send(
        &app,
        "PATCH",
        &format!("/admin/doctors/{doctor_id}/active"),
        Some(&admin_token),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["is_active"], false);

    let (status, active) = send(&app, "GET", "/doctors?is_active=true", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(active.as_array().unwrap().is_empty());

    let (status, all) = send(&app, "GET", "/admin/doctors", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn admin_slot_listing_filters_by_day_and_availability() {
    let app = spawn_app().await;
    let admin_token = seed_admin(&app, "root@example.com").await;
    let specialty_id = seed_specialty(&app, "Cardiology").await;
    let doctor_token = register_doctor(&app, "doc@example.com", specialty_id).await;
    let doctor_id = my_doctor_id(&app, &doctor_token).await;
    let client_token = register_client(&app, "alice@example.com").await;

    let monday = create_slot(
        &app,
        &doctor_token,
        "2030-02-11T10:00:00Z",
        "2030-02-11T11:00:00Z",
    )
    .await;
    create_slot(
        &app,
        &doctor_token,
        "2030-02-12T10:00:00Z",
        "2030-02-12T11:00:00Z",
    )
    .await;
    book_slot(&app, &client_token, monday["id"].as_i64().unwrap()).await;

    let (status, day_slots) = send(
        &app,
        "GET",
        &format!("/admin/doctors/{doctor_id}/slots?day=2030-02-11"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(day_slots.as_array().unwrap().len(), 1);

    let (status, open_slots) = send(
        &app,
        "GET",
        &format!("/admin/doctors/{doctor_id}/slots?only_available=true"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let open_slots = open_slots.as_array().unwrap();
    assert_eq!(open_slots.len(), 1);
    assert_eq!(open_slots[0]["is_available"], true);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/admin/doctors/{doctor_id}/slots?day=not-a-date"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_appointment_removal_frees_the_slot() {
    let app = spawn_app().await;
    let admin_token = seed_admin(&app, "root@example.com").await;
    let specialty_id = seed_specialty(&app, "Cardiology").await;
    let doctor_token = register_doctor(&app, "doc@example.com", specialty_id).await;
    let doctor_id = my_doctor_id(&app, &doctor_token).await;
    let client_token = register_client(&app, "alice@example.com").await;

    let slot = create_slot(
        &app,
        &doctor_token,
        "2030-02-10T10:00:00Z",
        "2030-02-10T11:00:00Z",
    )
    .await;
    let appointment = book_slot(&app, &client_token, slot["id"].as_i64().unwrap()).await;
    let appointment_id = appointment["id"].as_i64().unwrap();

    // While booked, the slot cannot be removed even by an admin.
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/slots/{}", slot["id"].as_i64().unwrap()),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, listed) = send(
        &app,
        "GET",
        &format!("/admin/appointments?doctor_id={doctor_id}&status=PENDING"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/appointments/{appointment_id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, open) = send(
        &app,
        "GET",
        &format!("/doctors/{doctor_id}/slots"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(open.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn moderated_review_deletion_allows_a_fresh_review() {
    let app = spawn_app().await;
    let admin_token = seed_admin(&app, "root@example.com").await;
    let specialty_id = seed_specialty(&app, "Cardiology").await;
    let doctor_token = register_doctor(&app, "doc@example.com", specialty_id).await;
    let doctor_id = my_doctor_id(&app, &doctor_token).await;
    let client_token = register_client(&app, "alice@example.com").await;

    let (status, review) = send(
        &app,
        "POST",
        &format!("/doctors/{doctor_id}/reviews"),
        Some(&client_token),
        Some(json!({ "rating": 1, "comment": "spam" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let review_id = review["id"].as_i64().unwrap();

    let (status, listed) = send(
        &app,
        "GET",
        &format!("/admin/reviews?doctor_id={doctor_id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/reviews/{review_id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/doctors/{doctor_id}/reviews"),
        Some(&client_token),
        Some(json!({ "rating": 5, "comment": "better now" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = spawn_app().await;
    let (status, body): (StatusCode, Value) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].as_str().is_some());
}
