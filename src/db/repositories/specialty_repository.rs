use sqlx::SqlitePool;

use crate::db::error::DatabaseError;
use crate::db::models::Specialty;

pub struct SpecialtyRepository;

impl SpecialtyRepository {
    pub async fn list_by_name(pool: &SqlitePool) -> Result<Vec<Specialty>, DatabaseError> {
        let rows = sqlx::query_as::<_, Specialty>(
            "SELECT id, name FROM specialties ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_id(pool: &SqlitePool) -> Result<Vec<Specialty>, DatabaseError> {
        let rows =
            sqlx::query_as::<_, Specialty>("SELECT id, name FROM specialties ORDER BY id ASC")
                .fetch_all(pool)
                .await?;
        Ok(rows)
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        specialty_id: i64,
    ) -> Result<Option<Specialty>, DatabaseError> {
        let row = sqlx::query_as::<_, Specialty>("SELECT id, name FROM specialties WHERE id = ?")
            .bind(specialty_id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn name_exists(pool: &SqlitePool, name: &str) -> Result<bool, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(id) FROM specialties WHERE lower(name) = lower(?)")
                .bind(name.trim())
                .fetch_one(pool)
                .await?;
        Ok(count > 0)
    }

    pub async fn any_exists(pool: &SqlitePool) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM specialties")
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(pool: &SqlitePool, name: &str) -> Result<Specialty, DatabaseError> {
        let row = sqlx::query_as::<_, Specialty>(
            "INSERT INTO specialties (name) VALUES (?) RETURNING id, name",
        )
        .bind(name.trim())
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn rename(
        pool: &SqlitePool,
        specialty_id: i64,
        name: &str,
    ) -> Result<Specialty, DatabaseError> {
        let row = sqlx::query_as::<_, Specialty>(
            "UPDATE specialties SET name = ? WHERE id = ? RETURNING id, name",
        )
        .bind(name.trim())
        .bind(specialty_id)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(pool: &SqlitePool, specialty_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM specialties WHERE id = ?")
            .bind(specialty_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
