use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{Appointment, AppointmentStatus, DoctorProfile, Role, User};
use crate::db::repositories::{AppointmentRepository, DoctorRepository};
use crate::error::{AppError, AppResult};
use crate::services::booking;

async fn my_doctor_profile(state: &AppState, user: &User) -> AppResult<DoctorProfile> {
    DoctorRepository::find_by_user_id(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Doctor profile not found".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct InboxQuery {
    pub status: Option<AppointmentStatus>,
}

pub async fn list_received(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<InboxQuery>,
) -> AppResult<Json<Vec<Appointment>>> {
    let user = current.require(&[Role::Doctor])?;
    let profile = my_doctor_profile(&state, user).await?;

    let rows = AppointmentRepository::list_for_doctor(&state.db, profile.id, query.status).await?;
    Ok(Json(rows))
}

pub async fn upcoming(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Appointment>>> {
    let user = current.require(&[Role::Doctor])?;
    let profile = my_doctor_profile(&state, user).await?;

    let rows = AppointmentRepository::upcoming_for_doctor(
        &state.db,
        profile.id,
        OffsetDateTime::now_utc(),
    )
    .await?;
    Ok(Json(rows))
}

pub async fn confirm(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(appointment_id): Path<i64>,
) -> AppResult<Json<Appointment>> {
    let user = current.require(&[Role::Doctor])?;
    let profile = my_doctor_profile(&state, user).await?;

    let appointment = booking::confirm(&state.db, &profile, appointment_id).await?;
    Ok(Json(appointment))
}

pub async fn cancel(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(appointment_id): Path<i64>,
) -> AppResult<Json<Appointment>> {
    let user = current.require(&[Role::Doctor])?;
    let profile = my_doctor_profile(&state, user).await?;

    let appointment = booking::cancel_by_doctor(&state.db, &profile, appointment_id).await?;
    Ok(Json(appointment))
}

pub async fn complete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(appointment_id): Path<i64>,
) -> AppResult<Json<Appointment>> {
    let user = current.require(&[Role::Doctor])?;
    let profile = my_doctor_profile(&state, user).await?;

    let appointment = booking::complete(&state.db, &profile, appointment_id).await?;
    Ok(Json(appointment))
}
