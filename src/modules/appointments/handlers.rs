use axum::{
    extract::{Path, State},
    Json,
};

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{Appointment, NewAppointment, RescheduleRequest, Role};
use crate::db::repositories::AppointmentRepository;
use crate::error::{AppError, AppResult};
use crate::services::booking;

pub async fn create_appointment(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(data): Json<NewAppointment>,
) -> AppResult<Json<Appointment>> {
    let user = current.require(&[Role::Client])?;
    let appointment = booking::create_appointment(&state.db, user.id, &data).await?;
    Ok(Json(appointment))
}

pub async fn my_appointments(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Appointment>>> {
    let user = current.require(&[Role::Client])?;
    let rows = AppointmentRepository::list_for_patient(&state.db, user.id).await?;
    Ok(Json(rows))
}

pub async fn my_history(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Appointment>>> {
    let user = current.require(&[Role::Client])?;
    let rows = AppointmentRepository::history_for_patient(&state.db, user.id).await?;
    Ok(Json(rows))
}

pub async fn get_my_appointment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(appointment_id): Path<i64>,
) -> AppResult<Json<Appointment>> {
    let user = current.require(&[Role::Client])?;

    let appointment = AppointmentRepository::find_by_id(&state.db, appointment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;
    if appointment.patient_user_id != user.id {
        return Err(AppError::Authorization("Not your appointment".to_string()));
    }

    Ok(Json(appointment))
}

pub async fn cancel_appointment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(appointment_id): Path<i64>,
) -> AppResult<Json<Appointment>> {
    let user = current.require(&[Role::Client])?;
    let appointment = booking::cancel_by_patient(&state.db, user.id, appointment_id).await?;
    Ok(Json(appointment))
}

pub async fn reschedule_appointment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(appointment_id): Path<i64>,
    Json(data): Json<RescheduleRequest>,
) -> AppResult<Json<Appointment>> {
    let user = current.require(&[Role::Client])?;
    let appointment =
        booking::reschedule(&state.db, user.id, appointment_id, data.new_slot_id).await?;
    Ok(Json(appointment))
}
