use axum::{extract::State, Json};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::auth::{hash_password, issue_token, verify_password};
use crate::db::models::{DoctorProfileUpsert, Role};
use crate::db::repositories::{DoctorRepository, SpecialtyRepository, UserRepository};
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct RegisterClientRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct RegisterDoctorRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: SecretString,
    pub full_name: String,
    #[serde(default)]
    pub bio: String,
    pub clinic_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub specialty_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email or username.
    pub identifier: String,
    pub password: SecretString,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

async fn check_handles_free(
    state: &AppState,
    email: Option<&str>,
    username: Option<&str>,
    password: &SecretString,
) -> AppResult<()> {
    if email.is_none() && username.is_none() {
        return Err(AppError::Validation(
            "Provide email or username".to_string(),
        ));
    }
    if password.expose_secret().len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    if let Some(email) = email {
        if UserRepository::email_exists(&state.db, email).await? {
            return Err(AppError::Conflict("Email already used".to_string()));
        }
    }
    if let Some(username) = username {
        if UserRepository::username_exists(&state.db, username).await? {
            return Err(AppError::Conflict("Username already used".to_string()));
        }
    }
    Ok(())
}

pub async fn register_client(
    State(state): State<AppState>,
    Json(data): Json<RegisterClientRequest>,
) -> AppResult<Json<TokenResponse>> {
    check_handles_free(
        &state,
        data.email.as_deref(),
        data.username.as_deref(),
        &data.password,
    )
    .await?;

    let password_hash = hash_password(data.password.expose_secret())?;

    let mut tx = state.db.begin().await.map_err(DatabaseError::from)?;
    let user = UserRepository::create(
        &mut tx,
        data.email.as_deref(),
        data.username.as_deref(),
        &password_hash,
        Role::Client,
    )
    .await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    let token = issue_token(&state.config.auth, user.id)?;
    Ok(Json(TokenResponse::bearer(token)))
}

pub async fn register_doctor(
    State(state): State<AppState>,
    Json(data): Json<RegisterDoctorRequest>,
) -> AppResult<Json<TokenResponse>> {
    check_handles_free(
        &state,
        data.email.as_deref(),
        data.username.as_deref(),
        &data.password,
    )
    .await?;

    if SpecialtyRepository::find_by_id(&state.db, data.specialty_id)
        .await?
        .is_none()
    {
        return Err(AppError::Validation(
            "Invalid specialty_id. Use GET /specialties to see available options.".to_string(),
        ));
    }

    let password_hash = hash_password(data.password.expose_secret())?;

    // User and profile are inserted as one unit; a doctor account without a
    // profile must not be observable.
    let mut tx = state.db.begin().await.map_err(DatabaseError::from)?;
    let user = UserRepository::create(
        &mut tx,
        data.email.as_deref(),
        data.username.as_deref(),
        &password_hash,
        Role::Doctor,
    )
    .await?;
    DoctorRepository::create(
        &mut tx,
        user.id,
        &DoctorProfileUpsert {
            full_name: data.full_name,
            bio: data.bio,
            clinic_name: data.clinic_name,
            address: data.address,
            phone: data.phone,
            specialty_id: data.specialty_id,
        },
    )
    .await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    let token = issue_token(&state.config.auth, user.id)?;
    Ok(Json(TokenResponse::bearer(token)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(data): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user = UserRepository::find_by_identifier(&state.db, &data.identifier).await?;

    let user = match user {
        Some(user) if verify_password(data.password.expose_secret(), &user.password_hash) => user,
        _ => {
            return Err(AppError::Authentication(
                "Invalid credentials".to_string(),
            ))
        }
    };

    let token = issue_token(&state.config.auth, user.id)?;
    Ok(Json(TokenResponse::bearer(token)))
}
