//! First-run seeding: a bootstrap admin account and the base specialty
//! catalog, applied only when the relevant tables are empty.

use sqlx::SqlitePool;
use tracing::info;

use crate::auth::hash_password;
use crate::config::Config;
use crate::db::models::Role;
use crate::db::repositories::{SpecialtyRepository, UserRepository};
use crate::error::AppError;

const DEFAULT_SPECIALTIES: &[&str] = &[
    "Cardiology",
    "Dermatology",
    "Pediatrics",
    "Neurology",
    "Orthopedics",
    "Endocrinology",
    "Otolaryngology (ENT)",
    "Ophthalmology",
    "Gastroenterology",
    "Gynecology",
    "Urology",
    "Pulmonology",
    "Nephrology",
    "Psychiatry",
    "Rheumatology",
];

pub async fn run_auto_seed(pool: &SqlitePool, config: &Config) -> Result<(), AppError> {
    if !config.app.auto_seed {
        return Ok(());
    }

    if !UserRepository::any_exists(pool).await? {
        let password_hash = hash_password("admin123")?;
        let mut tx = pool.begin().await.map_err(|e| {
            AppError::InternalServerError(format!("failed to begin transaction: {e}"))
        })?;
        let admin = UserRepository::create(
            &mut tx,
            Some("admin@local"),
            Some("admin"),
            &password_hash,
            Role::Admin,
        )
        .await?;
        tx.commit().await.map_err(|e| {
            AppError::InternalServerError(format!("failed to commit transaction: {e}"))
        })?;
        info!(user_id = admin.id, "seeded bootstrap admin account");
    }

    if !SpecialtyRepository::any_exists(pool).await? {
        for name in DEFAULT_SPECIALTIES {
            SpecialtyRepository::create(pool, name).await?;
        }
        info!(count = DEFAULT_SPECIALTIES.len(), "seeded specialty catalog");
    }

    Ok(())
}
