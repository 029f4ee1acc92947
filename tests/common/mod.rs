#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use medbook::app::create_router;
use medbook::app_state::AppState;
use medbook::auth::{hash_password, issue_token};
use medbook::config::{
    AppConfig, AuthConfig, Config, DatabaseConfig, Environment, ServerConfig,
};
use medbook::db::models::Role;
use medbook::db::repositories::UserRepository;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub config: Config,
}

// A single connection keeps every request on the same in-memory database.
pub async fn spawn_app() -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    medbook::db::MIGRATOR.run(&pool).await.unwrap();

    let config = Config {
        server: ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
            min_connections: Some(1),
        },
        auth: AuthConfig {
            token_secret: "integration-test-secret".to_string(),
            token_ttl_minutes: 60,
        },
        app: AppConfig {
            name: "Doctors Booking API".to_string(),
            environment: Environment::Development,
            auto_seed: false,
        },
    };

    let router = create_router(AppState::new(pool.clone(), config.clone()));
    TestApp {
        router,
        pool,
        config,
    }
}

pub async fn send(
    app: &TestApp,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn register_client(app: &TestApp, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register-client",
        None,
        Some(json!({ "email": email, "password": "password1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register-client failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}

pub async fn seed_specialty(app: &TestApp, name: &str) -> i64 {
    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO specialties (name) VALUES (?) RETURNING id")
            .bind(name)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    id
}

pub async fn register_doctor(app: &TestApp, email: &str, specialty_id: i64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register-doctor",
        None,
        Some(json!({
            "email": email,
            "password": "password1",
            "full_name": "Dr. Test",
            "bio": "Testing clinic hours",
            "specialty_id": specialty_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register-doctor failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}

pub async fn my_doctor_id(app: &TestApp, doctor_token: &str) -> i64 {
    let (status, body) = send(app, "GET", "/doctor/me", Some(doctor_token), None).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
}

pub async fn create_slot(app: &TestApp, doctor_token: &str, start: &str, end: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/doctor/slots",
        Some(doctor_token),
        Some(json!({ "start_at": start, "end_at": end })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "slot creation failed: {body}");
    body
}

pub async fn book_slot(app: &TestApp, client_token: &str, slot_id: i64) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/appointments",
        Some(client_token),
        Some(json!({ "slot_id": slot_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "booking failed: {body}");
    body
}

/// Inserts an admin account directly and mints a token for it, bypassing the
/// public registration surface which never produces admins.
pub async fn seed_admin(app: &TestApp, email: &str) -> String {
    let password_hash = hash_password("admin123").unwrap();
    let mut tx = app.pool.begin().await.unwrap();
    let admin = UserRepository::create(&mut tx, Some(email), None, &password_hash, Role::Admin)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    issue_token(&app.config.auth, admin.id).unwrap()
}
