use axum::{extract::State, Json};
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{NewSpecialty, Role, Specialty};
use crate::db::repositories::SpecialtyRepository;
use crate::error::{AppError, AppResult};

pub async fn list_specialties(State(state): State<AppState>) -> AppResult<Json<Vec<Specialty>>> {
    let specialties = SpecialtyRepository::list_by_name(&state.db).await?;
    Ok(Json(specialties))
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
