use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use time::{format_description, Date};
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{
    Appointment, AppointmentStatus, DoctorFilter, DoctorListing, DoctorProfile, NewSpecialty,
    Review, Role, Slot, Specialty, UserOut,
};
use crate::db::repositories::{
    AdminAppointmentFilter, AppointmentRepository, DoctorRepository, ReviewRepository,
    SlotRepository, SpecialtyRepository, UserRepository,
};
use crate::error::{AppError, AppResult};
use crate::services::booking;

// ---- users ----

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub role: Option<Role>,
    pub q: Option<String>,
}

pub async fn list_users(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<Vec<UserOut>>> {
    current.require(&[Role::Admin])?;
    let users = UserRepository::list(&state.db, query.role, query.q.as_deref()).await?;
    Ok(Json(users.into_iter().map(UserOut::from).collect()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Value>> {
    current.require(&[Role::Admin])?;

    let user = UserRepository::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if user.role == Role::Admin {
        let admins = UserRepository::count_with_role(&state.db, Role::Admin).await?;
        if admins <= 1 {
            return Err(AppError::Conflict(
                "Cannot delete the last ADMIN".to_string(),
            ));
        }
    }

    UserRepository::delete(&state.db, user.id).await?;
    Ok(Json(json!({ "ok": true })))
}

// ---- specialties ----

pub async fn list_specialties(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Specialty>>> {
    current.require(&[Role::Admin])?;
    let rows = SpecialtyRepository::list_by_id(&state.db).await?;
    Ok(Json(rows))
}

pub async fn create_specialty(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(data): Json<NewSpecialty>,
) -> AppResult<Json<Specialty>> {
    current.require(&[Role::Admin])?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if SpecialtyRepository::name_exists(&state.db, &data.name).await? {
        return Err(AppError::Conflict("Specialty already exists".to_string()));
    }

    let specialty = SpecialtyRepository::create(&state.db, &data.name).await?;
    Ok(Json(specialty))
}

pub async fn rename_specialty(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(specialty_id): Path<i64>,
    Json(data): Json<NewSpecialty>,
) -> AppResult<Json<Specialty>> {
    current.require(&[Role::Admin])?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if SpecialtyRepository::find_by_id(&state.db, specialty_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Specialty not found".to_string()));
    }

    let specialty = SpecialtyRepository::rename(&state.db, specialty_id, &data.name).await?;
    Ok(Json(specialty))
}

/// A specialty cannot be deleted while any doctor profile references it.
pub async fn delete_specialty(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(specialty_id): Path<i64>,
) -> AppResult<Json<Value>> {
    current.require(&[Role::Admin])?;

    if SpecialtyRepository::find_by_id(&state.db, specialty_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Specialty not found".to_string()));
    }

    let used = DoctorRepository::count_with_specialty(&state.db, specialty_id).await?;
    if used > 0 {
        return Err(AppError::Conflict(
            "Specialty is used by doctors".to_string(),
        ));
    }

    SpecialtyRepository::delete(&state.db, specialty_id).await?;
    Ok(Json(json!({ "ok": true })))
}

// ---- doctors ----

#[derive(Debug, Deserialize)]
pub struct AdminDoctorQuery {
    pub is_active: Option<bool>,
    pub specialty_id: Option<i64>,
    pub q: Option<String>,
}

pub async fn list_doctors(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<AdminDoctorQuery>,
) -> AppResult<Json<Vec<DoctorListing>>> {
    current.require(&[Role::Admin])?;
    let filter = DoctorFilter {
        name: query.q,
        specialty_id: query.specialty_id,
        specialty_name: None,
        is_active: query.is_active,
    };
    let rows = DoctorRepository::list(&state.db, &filter).await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

pub async fn set_doctor_active(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(doctor_id): Path<i64>,
    Json(data): Json<SetActiveRequest>,
) -> AppResult<Json<DoctorProfile>> {
    current.require(&[Role::Admin])?;

    if DoctorRepository::find_by_id(&state.db, doctor_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Doctor not found".to_string()));
    }

    let profile = DoctorRepository::set_active(&state.db, doctor_id, data.is_active).await?;
    Ok(Json(profile))
}

pub async fn delete_doctor(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(doctor_id): Path<i64>,
) -> AppResult<Json<Value>> {
    current.require(&[Role::Admin])?;

    if DoctorRepository::find_by_id(&state.db, doctor_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Doctor not found".to_string()));
    }

    DoctorRepository::delete(&state.db, doctor_id).await?;
    Ok(Json(json!({ "ok": true })))
}

// ---- slots ----

#[derive(Debug, Deserialize)]
pub struct AdminSlotQuery {
    pub only_available: Option<bool>,
    /// Calendar day filter, `YYYY-MM-DD`.
    pub day: Option<String>,
}

pub async fn list_doctor_slots(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(doctor_id): Path<i64>,
    Query(query): Query<AdminSlotQuery>,
) -> AppResult<Json<Vec<Slot>>> {
    current.require(&[Role::Admin])?;

    let day = match &query.day {
        Some(raw) => {
            let format = format_description::parse("[year]-[month]-[day]")
                .map_err(|e| AppError::InternalServerError(e.to_string()))?;
            Some(Date::parse(raw, &format).map_err(|_| {
                AppError::Validation("day must be a date like 2026-02-10".to_string())
            })?)
        }
        None => None,
    };

    let rows =
        SlotRepository::list_for_admin(&state.db, doctor_id, query.only_available, day).await?;
    Ok(Json(rows))
}

pub async fn delete_slot(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(slot_id): Path<i64>,
) -> AppResult<Json<Value>> {
    current.require(&[Role::Admin])?;
    booking::delete_slot_unchecked(&state.db, slot_id).await?;
    Ok(Json(json!({ "ok": true })))
}

// ---- appointments ----

#[derive(Debug, Deserialize)]
pub struct AdminAppointmentQuery {
    pub status: Option<AppointmentStatus>,
    pub doctor_id: Option<i64>,
    pub patient_user_id: Option<i64>,
}

pub async fn list_appointments(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<AdminAppointmentQuery>,
) -> AppResult<Json<Vec<Appointment>>> {
    current.require(&[Role::Admin])?;
    let filter = AdminAppointmentFilter {
        status: query.status,
        doctor_id: query.doctor_id,
        patient_user_id: query.patient_user_id,
    };
    let rows = AppointmentRepository::list_for_admin(&state.db, &filter).await?;
    Ok(Json(rows))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(appointment_id): Path<i64>,
) -> AppResult<Json<Value>> {
    current.require(&[Role::Admin])?;
    booking::admin_delete_appointment(&state.db, appointment_id).await?;
    Ok(Json(json!({ "ok": true })))
}

// ---- reviews ----

#[derive(Debug, Deserialize)]
pub struct AdminReviewQuery {
    pub doctor_id: Option<i64>,
    pub user_id: Option<i64>,
}

pub async fn list_reviews(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<AdminReviewQuery>,
) -> AppResult<Json<Vec<Review>>> {
    current.require(&[Role::Admin])?;
    let rows = ReviewRepository::list_for_admin(&state.db, query.doctor_id, query.user_id).await?;
    Ok(Json(rows))
}

pub async fn delete_review(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(review_id): Path<i64>,
) -> AppResult<Json<Value>> {
    current.require(&[Role::Admin])?;

    if ReviewRepository::find_by_id(&state.db, review_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Review not found".to_string()));
    }

    ReviewRepository::delete(&state.db, review_id).await?;
    Ok(Json(json!({ "ok": true })))
}
