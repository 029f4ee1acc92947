use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{NewReview, Review, Role};
use crate::db::repositories::{DoctorRepository, ReviewRepository};
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};

pub async fn my_reviews(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Review>>> {
    let user = current.require(&[Role::Client])?;
    let rows = ReviewRepository::list_for_user(&state.db, user.id).await?;
    Ok(Json(rows))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(doctor_id): Path<i64>,
) -> AppResult<Json<Vec<Review>>> {
    if DoctorRepository::find_by_id(&state.db, doctor_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Doctor not found".to_string()));
    }

    let rows = ReviewRepository::list_for_doctor(&state.db, doctor_id).await?;
    Ok(Json(rows))
}

/// One review per (user, doctor) pair; the UNIQUE constraint catches racing
/// duplicates that slip past the existence check.
pub async fn create_review(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(doctor_id): Path<i64>,
    Json(data): Json<NewReview>,
) -> AppResult<Json<Review>> {
    let user = current.require(&[Role::Client])?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if DoctorRepository::find_by_id(&state.db, doctor_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Doctor not found".to_string()));
    }

    if ReviewRepository::exists_for_pair(&state.db, user.id, doctor_id).await? {
        return Err(AppError::Conflict(
            "You already reviewed this doctor".to_string(),
        ));
    }

    let review = ReviewRepository::create(
        &state.db,
        user.id,
        doctor_id,
        data.rating,
        data.comment.as_deref(),
    )
    .await
    .map_err(|err| match err {
        DatabaseError::Duplicate => {
            AppError::Conflict("You already reviewed this doctor".to_string())
        }
        other => AppError::Database(other),
    })?;

    Ok(Json(review))
}
