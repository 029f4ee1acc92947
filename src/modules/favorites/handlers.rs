use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{FavoriteDoctor, Role};
use crate::db::repositories::{DoctorRepository, FavoriteRepository};
use crate::error::{AppError, AppResult};

/// Adding an existing favorite is an idempotent no-op, not a conflict.
pub async fn add_favorite(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(doctor_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let user = current.require(&[Role::Client])?;

    if DoctorRepository::find_by_id(&state.db, doctor_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Doctor not found".to_string()));
    }

    if FavoriteRepository::find_pair(&state.db, user.id, doctor_id)
        .await?
        .is_some()
    {
        return Ok(Json(json!({ "ok": true, "already_favorite": true })));
    }

    FavoriteRepository::create(&state.db, user.id, doctor_id).await?;
    Ok(Json(json!({ "ok": true, "doctor_id": doctor_id })))
}

pub async fn list_favorites(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<FavoriteDoctor>>> {
    let user = current.require(&[Role::Client])?;
    let rows = FavoriteRepository::list_for_user(&state.db, user.id).await?;
    Ok(Json(rows))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(doctor_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let user = current.require(&[Role::Client])?;

    let removed = FavoriteRepository::delete_pair(&state.db, user.id, doctor_id).await?;
    if !removed {
        return Err(AppError::NotFound("Not in favorites".to_string()));
    }

    Ok(Json(json!({ "ok": true, "doctor_id": doctor_id })))
}
