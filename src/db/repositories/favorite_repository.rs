use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::db::error::DatabaseError;
use crate::db::models::{Favorite, FavoriteDoctor};

pub struct FavoriteRepository;

impl FavoriteRepository {
    pub async fn find_pair(
        pool: &SqlitePool,
        user_id: i64,
        doctor_id: i64,
    ) -> Result<Option<Favorite>, DatabaseError> {
        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, user_id, doctor_id, created_at
            FROM favorites
            WHERE user_id = ? AND doctor_id = ?
            "#,
        )
        .bind(user_id)
        .bind(doctor_id)
        .fetch_optional(pool)
        .await?;
        Ok(favorite)
    }

    pub async fn create(
        pool: &SqlitePool,
        user_id: i64,
        doctor_id: i64,
    ) -> Result<Favorite, DatabaseError> {
        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (user_id, doctor_id, created_at)
            VALUES (?, ?, ?)
            RETURNING id, user_id, doctor_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(doctor_id)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(pool)
        .await?;
        Ok(favorite)
    }

    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: i64,
    ) -> Result<Vec<FavoriteDoctor>, DatabaseError> {
        let rows = sqlx::query_as::<_, FavoriteDoctor>(
            r#"
            SELECT d.id AS doctor_id, d.full_name AS doctor_name,
                   s.id AS specialty_id, s.name AS specialty_name
            FROM favorites f
            JOIN doctor_profiles d ON d.id = f.doctor_id
            JOIN specialties s ON s.id = d.specialty_id
            WHERE f.user_id = ?
            ORDER BY f.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn delete_pair(
        pool: &SqlitePool,
        user_id: i64,
        doctor_id: i64,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND doctor_id = ?")
            .bind(user_id)
            .bind(doctor_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
