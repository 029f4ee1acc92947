use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use time::{Date, OffsetDateTime, Time};

use crate::db::error::DatabaseError;
use crate::db::models::Slot;

const SLOT_COLUMNS: &str = "id, doctor_id, start_at, end_at, is_available";

pub struct SlotRepository;

impl SlotRepository {
    pub async fn find_by_id(
        pool: &SqlitePool,
        slot_id: i64,
    ) -> Result<Option<Slot>, DatabaseError> {
        let slot = sqlx::query_as::<_, Slot>(&format!(
            "SELECT {SLOT_COLUMNS} FROM appointment_slots WHERE id = ?"
        ))
        .bind(slot_id)
        .fetch_optional(pool)
        .await?;
        Ok(slot)
    }

    /// Half-open interval overlap against every slot of the doctor:
    /// `existing.start < new.end AND existing.end > new.start`.
    pub async fn overlap_exists(
        tx: &mut Transaction<'_, Sqlite>,
        doctor_id: i64,
        start_at: OffsetDateTime,
        end_at: OffsetDateTime,
    ) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(id) FROM appointment_slots
            WHERE doctor_id = ? AND start_at < ? AND end_at > ?
            "#,
        )
        .bind(doctor_id)
        .bind(end_at)
        .bind(start_at)
        .fetch_one(&mut **tx)
        .await?;
        Ok(count > 0)
    }

    pub async fn create(
        tx: &mut Transaction<'_, Sqlite>,
        doctor_id: i64,
        start_at: OffsetDateTime,
        end_at: OffsetDateTime,
    ) -> Result<Slot, DatabaseError> {
        let slot = sqlx::query_as::<_, Slot>(&format!(
            r#"
            INSERT INTO appointment_slots (doctor_id, start_at, end_at, is_available)
            VALUES (?, ?, ?, 1)
            RETURNING {SLOT_COLUMNS}
            "#
        ))
        .bind(doctor_id)
        .bind(start_at)
        .bind(end_at)
        .fetch_one(&mut **tx)
        .await?;
        Ok(slot)
    }

    pub async fn list_for_doctor(
        pool: &SqlitePool,
        doctor_id: i64,
    ) -> Result<Vec<Slot>, DatabaseError> {
        let slots = sqlx::query_as::<_, Slot>(&format!(
            "SELECT {SLOT_COLUMNS} FROM appointment_slots WHERE doctor_id = ? ORDER BY start_at ASC"
        ))
        .bind(doctor_id)
        .fetch_all(pool)
        .await?;
        Ok(slots)
    }

    /// Public view: available slots only, optionally ending after `from`.
    pub async fn list_available(
        pool: &SqlitePool,
        doctor_id: i64,
        from: Option<OffsetDateTime>,
    ) -> Result<Vec<Slot>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {SLOT_COLUMNS} FROM appointment_slots WHERE is_available = 1 AND doctor_id = "
        ));
        builder.push_bind(doctor_id);
        if let Some(from) = from {
            builder.push(" AND end_at > ").push_bind(from);
        }
        builder.push(" ORDER BY start_at ASC");

        let slots = builder.build_query_as::<Slot>().fetch_all(pool).await?;
        Ok(slots)
    }

    pub async fn list_for_admin(
        pool: &SqlitePool,
        doctor_id: i64,
        only_available: Option<bool>,
        day: Option<Date>,
    ) -> Result<Vec<Slot>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {SLOT_COLUMNS} FROM appointment_slots WHERE doctor_id = "
        ));
        builder.push_bind(doctor_id);
        if let Some(only_available) = only_available {
            builder.push(" AND is_available = ").push_bind(only_available);
        }
        if let Some(day) = day {
            let start = day.with_time(Time::MIDNIGHT).assume_utc();
            let end = start + time::Duration::days(1);
            builder
                .push(" AND start_at >= ")
                .push_bind(start)
                .push(" AND start_at < ")
                .push_bind(end);
        }
        builder.push(" ORDER BY start_at ASC");

        let slots = builder.build_query_as::<Slot>().fetch_all(pool).await?;
        Ok(slots)
    }

    /// Flips the availability bit to held, but only if it is still available.
    /// Returns false when another booking won the race; the caller must treat
    /// that as a conflict and roll back.
    pub async fn hold(
        tx: &mut Transaction<'_, Sqlite>,
        slot_id: i64,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE appointment_slots SET is_available = 0 WHERE id = ? AND is_available = 1",
        )
        .bind(slot_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn free(tx: &mut Transaction<'_, Sqlite>, slot_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE appointment_slots SET is_available = 1 WHERE id = ?")
            .bind(slot_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub async fn delete(tx: &mut Transaction<'_, Sqlite>, slot_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM appointment_slots WHERE id = ?")
            .bind(slot_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
