use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use time::OffsetDateTime;

use crate::db::error::DatabaseError;
use crate::db::models::Review;

const REVIEW_COLUMNS: &str = "id, user_id, doctor_id, rating, comment, created_at";

pub struct ReviewRepository;

impl ReviewRepository {
    pub async fn exists_for_pair(
        pool: &SqlitePool,
        user_id: i64,
        doctor_id: i64,
    ) -> Result<bool, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(id) FROM reviews WHERE user_id = ? AND doctor_id = ?")
                .bind(user_id)
                .bind(doctor_id)
                .fetch_one(pool)
                .await?;
        Ok(count > 0)
    }

    /// The UNIQUE(user_id, doctor_id) constraint backs this up; a racing
    /// duplicate surfaces as `DatabaseError::Duplicate`.
    pub async fn create(
        pool: &SqlitePool,
        user_id: i64,
        doctor_id: i64,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<Review, DatabaseError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (user_id, doctor_id, rating, comment, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(doctor_id)
        .bind(rating)
        .bind(comment)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(pool)
        .await?;
        Ok(review)
    }

    pub async fn list_for_doctor(
        pool: &SqlitePool,
        doctor_id: i64,
    ) -> Result<Vec<Review>, DatabaseError> {
        let rows = sqlx::query_as::<_, Review>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS} FROM reviews
            WHERE doctor_id = ?
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(doctor_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: i64,
    ) -> Result<Vec<Review>, DatabaseError> {
        let rows = sqlx::query_as::<_, Review>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS} FROM reviews
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_for_admin(
        pool: &SqlitePool,
        doctor_id: Option<i64>,
        user_id: Option<i64>,
    ) -> Result<Vec<Review>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE 1 = 1"
        ));
        if let Some(doctor_id) = doctor_id {
            builder.push(" AND doctor_id = ").push_bind(doctor_id);
        }
        if let Some(user_id) = user_id {
            builder.push(" AND user_id = ").push_bind(user_id);
        }
        builder.push(" ORDER BY id DESC");

        let rows = builder.build_query_as::<Review>().fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        review_id: i64,
    ) -> Result<Option<Review>, DatabaseError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?"
        ))
        .bind(review_id)
        .fetch_optional(pool)
        .await?;
        Ok(review)
    }

    pub async fn delete(pool: &SqlitePool, review_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(review_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
