use axum::{extract::State, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::tracing::trace_requests;
use crate::modules::{
    admin::admin_routes, appointments::appointment_routes, auth::auth_routes,
    doctor_appointments::doctor_appointment_routes, doctors::doctor_routes,
    favorites::favorite_routes, notifications::notification_routes, reviews::review_routes,
    slots::slot_routes, specialties::specialty_routes, users::user_routes,
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(doctor_routes())
        .merge(specialty_routes())
        .merge(slot_routes())
        .merge(appointment_routes())
        .merge(doctor_appointment_routes())
        .merge(review_routes())
        .merge(favorite_routes())
        .merge(notification_routes())
        .nest("/admin", admin_routes())
        .layer(middleware::from_fn(trace_requests))
        .with_state(state)
}

async fn hello(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "message": format!("{} is running", state.config.app.name) }))
}

async fn health(State(state): State<AppState>) -> AppResult<Json<Value>> {
    sqlx::query("SELECT 1")
        .execute(&state.db)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(json!({
        "status": "ok",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
