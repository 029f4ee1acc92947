use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{DoctorProfile, NewSlot, Role, Slot, User};
use crate::db::repositories::{DoctorRepository, SlotRepository};
use crate::error::{AppError, AppResult};
use crate::services::booking;

async fn my_doctor_profile(state: &AppState, user: &User) -> AppResult<DoctorProfile> {
    DoctorRepository::find_by_user_id(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Doctor profile not found".to_string()))
}

pub async fn create_slot(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(data): Json<NewSlot>,
) -> AppResult<Json<Slot>> {
    let user = current.require(&[Role::Doctor])?;
    let profile = my_doctor_profile(&state, user).await?;

    let slot = booking::create_slot(&state.db, profile.id, &data).await?;
    Ok(Json(slot))
}

pub async fn list_my_slots(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Slot>>> {
    let user = current.require(&[Role::Doctor])?;
    let profile = my_doctor_profile(&state, user).await?;

    let slots = SlotRepository::list_for_doctor(&state.db, profile.id).await?;
    Ok(Json(slots))
}

pub async fn delete_slot(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(slot_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let user = current.require(&[Role::Doctor])?;
    let profile = my_doctor_profile(&state, user).await?;

    booking::delete_slot(&state.db, &profile, slot_id).await?;
    Ok(Json(json!({ "ok": true, "deleted_slot_id": slot_id })))
}

#[derive(Debug, Deserialize)]
pub struct PublicSlotQuery {
    pub from_dt: Option<String>,
}

/// Public availability view for one doctor; only open slots are shown.
pub async fn list_public_slots(
    State(state): State<AppState>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<PublicSlotQuery>,
) -> AppResult<Json<Vec<Slot>>> {
    // Stored timestamps are UTC; bring the filter to the same offset before
    // it reaches the comparison.
    let from = match &query.from_dt {
        Some(raw) => Some(
            OffsetDateTime::parse(raw, &Rfc3339)
                .map_err(|_| {
                    AppError::Validation(
                        "from_dt must be an RFC 3339 datetime like 2026-02-10T10:30:00Z"
                            .to_string(),
                    )
                })?
                .to_offset(UtcOffset::UTC),
        ),
        None => None,
    };

    let slots = SlotRepository::list_available(&state.db, doctor_id, from).await?;
    Ok(Json(slots))
}
