use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};

use crate::db::error::DatabaseError;
use crate::db::models::{DoctorFilter, DoctorListing, DoctorProfile, DoctorProfileUpsert};

const PROFILE_COLUMNS: &str =
    "id, user_id, full_name, bio, clinic_name, address, phone, specialty_id, is_active";

pub struct DoctorRepository;

impl DoctorRepository {
    pub async fn find_by_id(
        pool: &SqlitePool,
        doctor_id: i64,
    ) -> Result<Option<DoctorProfile>, DatabaseError> {
        let profile = sqlx::query_as::<_, DoctorProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM doctor_profiles WHERE id = ?"
        ))
        .bind(doctor_id)
        .fetch_optional(pool)
        .await?;
        Ok(profile)
    }

    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: i64,
    ) -> Result<Option<DoctorProfile>, DatabaseError> {
        let profile = sqlx::query_as::<_, DoctorProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM doctor_profiles WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(profile)
    }

    pub async fn create(
        tx: &mut Transaction<'_, Sqlite>,
        user_id: i64,
        data: &DoctorProfileUpsert,
    ) -> Result<DoctorProfile, DatabaseError> {
        let profile = sqlx::query_as::<_, DoctorProfile>(&format!(
            r#"
            INSERT INTO doctor_profiles
                (user_id, full_name, bio, clinic_name, address, phone, specialty_id, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?, 1)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&data.full_name)
        .bind(&data.bio)
        .bind(&data.clinic_name)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(data.specialty_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(profile)
    }

    pub async fn update_for_user(
        tx: &mut Transaction<'_, Sqlite>,
        user_id: i64,
        data: &DoctorProfileUpsert,
    ) -> Result<DoctorProfile, DatabaseError> {
        let profile = sqlx::query_as::<_, DoctorProfile>(&format!(
            r#"
            UPDATE doctor_profiles
            SET full_name = ?, bio = ?, clinic_name = ?, address = ?, phone = ?,
                specialty_id = ?, is_active = 1
            WHERE user_id = ?
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(&data.full_name)
        .bind(&data.bio)
        .bind(&data.clinic_name)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(data.specialty_id)
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(profile)
    }

    /// Public catalog listing with per-doctor review aggregates.
    pub async fn list(
        pool: &SqlitePool,
        filter: &DoctorFilter,
    ) -> Result<Vec<DoctorListing>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT d.id, d.full_name, d.bio, d.clinic_name, d.address, d.phone,
                   d.specialty_id, s.name AS specialty_name, d.is_active,
                   COALESCE(r.avg_rating, 0.0) AS avg_rating,
                   COALESCE(r.reviews_count, 0) AS reviews_count
            FROM doctor_profiles d
            JOIN specialties s ON s.id = d.specialty_id
            LEFT JOIN (
                SELECT doctor_id, AVG(rating) AS avg_rating, COUNT(id) AS reviews_count
                FROM reviews
                GROUP BY doctor_id
            ) r ON r.doctor_id = d.id
            WHERE 1 = 1
            "#,
        );

        if let Some(is_active) = filter.is_active {
            builder.push(" AND d.is_active = ").push_bind(is_active);
        }
        if let Some(specialty_id) = filter.specialty_id {
            builder.push(" AND d.specialty_id = ").push_bind(specialty_id);
        }
        if let Some(specialty_name) = &filter.specialty_name {
            let pattern = format!("%{}%", specialty_name.trim());
            builder.push(" AND s.name LIKE ").push_bind(pattern);
        }
        if let Some(name) = &filter.name {
            let pattern = format!("%{}%", name.trim());
            builder
                .push(" AND (d.full_name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR d.clinic_name LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        builder.push(" ORDER BY d.id ASC");

        let rows = builder
            .build_query_as::<DoctorListing>()
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn set_active(
        pool: &SqlitePool,
        doctor_id: i64,
        is_active: bool,
    ) -> Result<DoctorProfile, DatabaseError> {
        let profile = sqlx::query_as::<_, DoctorProfile>(&format!(
            "UPDATE doctor_profiles SET is_active = ? WHERE id = ? RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(is_active)
        .bind(doctor_id)
        .fetch_one(pool)
        .await?;
        Ok(profile)
    }

    pub async fn count_with_specialty(
        pool: &SqlitePool,
        specialty_id: i64,
    ) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(id) FROM doctor_profiles WHERE specialty_id = ?")
                .bind(specialty_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    pub async fn delete(pool: &SqlitePool, doctor_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM doctor_profiles WHERE id = ?")
            .bind(doctor_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
