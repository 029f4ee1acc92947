use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{DoctorFilter, DoctorListing, DoctorProfile, DoctorProfileUpsert, Role};
use crate::db::repositories::{DoctorRepository, SpecialtyRepository};
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};

/// Public doctor catalog with review aggregates.
pub async fn list_doctors(
    State(state): State<AppState>,
    Query(filter): Query<DoctorFilter>,
) -> AppResult<Json<Vec<DoctorListing>>> {
    let mut doctors = DoctorRepository::list(&state.db, &filter).await?;
    for doctor in &mut doctors {
        doctor.avg_rating = (doctor.avg_rating * 100.0).round() / 100.0;
    }
    Ok(Json(doctors))
}

pub async fn get_my_profile(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<DoctorProfile>> {
    let user = current.require(&[Role::Doctor])?;
    let profile = DoctorRepository::find_by_user_id(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Doctor profile not found".to_string()))?;
    Ok(Json(profile))
}

/// Create-or-update self-service upsert; re-activates the profile either way.
pub async fn upsert_my_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(data): Json<DoctorProfileUpsert>,
) -> AppResult<Json<DoctorProfile>> {
    let user = current.require(&[Role::Doctor])?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if SpecialtyRepository::find_by_id(&state.db, data.specialty_id)
        .await?
        .is_none()
    {
        return Err(AppError::Validation("Invalid specialty_id".to_string()));
    }

    let existing = DoctorRepository::find_by_user_id(&state.db, user.id).await?;

    let mut tx = state.db.begin().await.map_err(DatabaseError::from)?;
    let profile = if existing.is_some() {
        DoctorRepository::update_for_user(&mut tx, user.id, &data).await?
    } else {
        DoctorRepository::create(&mut tx, user.id, &data).await?
    };
    tx.commit().await.map_err(DatabaseError::from)?;

    Ok(Json(profile))
}
