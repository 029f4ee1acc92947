use sqlx::{Sqlite, SqlitePool, Transaction};
use time::OffsetDateTime;

use crate::db::error::DatabaseError;
use crate::db::models::Notification;

pub struct NotificationRepository;

impl NotificationRepository {
    /// Inserts inside the caller's transaction so the record is durable
    /// exactly when the triggering state change is.
    pub async fn create(
        tx: &mut Transaction<'_, Sqlite>,
        user_id: i64,
        message: &str,
    ) -> Result<Notification, DatabaseError> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, message, created_at)
            VALUES (?, ?, ?)
            RETURNING id, user_id, message, created_at
            "#,
        )
        .bind(user_id)
        .bind(message)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&mut **tx)
        .await?;
        Ok(notification)
    }

    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: i64,
    ) -> Result<Vec<Notification>, DatabaseError> {
        let rows = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, message, created_at
            FROM notifications
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
