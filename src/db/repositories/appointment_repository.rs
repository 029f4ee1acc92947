use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use time::OffsetDateTime;

use crate::db::error::DatabaseError;
use crate::db::models::{Appointment, AppointmentStatus, CanceledBy};

const APPOINTMENT_COLUMNS: &str =
    "id, doctor_id, patient_user_id, slot_id, status, canceled_by, notes, created_at";

#[derive(Debug, Default, Clone)]
pub struct AdminAppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub doctor_id: Option<i64>,
    pub patient_user_id: Option<i64>,
}

pub struct AppointmentRepository;

impl AppointmentRepository {
    pub async fn insert(
        tx: &mut Transaction<'_, Sqlite>,
        doctor_id: i64,
        patient_user_id: i64,
        slot_id: i64,
        notes: &str,
    ) -> Result<Appointment, DatabaseError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            INSERT INTO appointments (doctor_id, patient_user_id, slot_id, status, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(doctor_id)
        .bind(patient_user_id)
        .bind(slot_id)
        .bind(AppointmentStatus::Pending)
        .bind(notes)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&mut **tx)
        .await?;
        Ok(appointment)
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        appointment_id: i64,
    ) -> Result<Option<Appointment>, DatabaseError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?"
        ))
        .bind(appointment_id)
        .fetch_optional(pool)
        .await?;
        Ok(appointment)
    }

    pub async fn list_for_patient(
        pool: &SqlitePool,
        patient_user_id: i64,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let rows = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS} FROM appointments
            WHERE patient_user_id = ?
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(patient_user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Terminal appointments only (completed or canceled).
    pub async fn history_for_patient(
        pool: &SqlitePool,
        patient_user_id: i64,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let rows = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS} FROM appointments
            WHERE patient_user_id = ? AND status IN (?, ?)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(patient_user_id)
        .bind(AppointmentStatus::Completed)
        .bind(AppointmentStatus::Canceled)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_for_doctor(
        pool: &SqlitePool,
        doctor_id: i64,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE doctor_id = "
        ));
        builder.push_bind(doctor_id);
        if let Some(status) = status {
            builder.push(" AND status = ").push_bind(status);
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let rows = builder
            .build_query_as::<Appointment>()
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Confirmed appointments whose slot starts after `now`, soonest first.
    pub async fn upcoming_for_doctor(
        pool: &SqlitePool,
        doctor_id: i64,
        now: OffsetDateTime,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let rows = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT a.id, a.doctor_id, a.patient_user_id, a.slot_id, a.status,
                   a.canceled_by, a.notes, a.created_at
            FROM appointments a
            JOIN appointment_slots s ON s.id = a.slot_id
            WHERE a.doctor_id = ? AND a.status = ? AND s.start_at >= ?
            ORDER BY s.start_at ASC
            "#,
        )
        .bind(doctor_id)
        .bind(AppointmentStatus::Confirmed)
        .bind(now)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_for_admin(
        pool: &SqlitePool,
        filter: &AdminAppointmentFilter,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE 1 = 1"
        ));
        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(status);
        }
        if let Some(doctor_id) = filter.doctor_id {
            builder.push(" AND doctor_id = ").push_bind(doctor_id);
        }
        if let Some(patient_user_id) = filter.patient_user_id {
            builder
                .push(" AND patient_user_id = ")
                .push_bind(patient_user_id);
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let rows = builder
            .build_query_as::<Appointment>()
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn set_status(
        tx: &mut Transaction<'_, Sqlite>,
        appointment_id: i64,
        status: AppointmentStatus,
        canceled_by: Option<CanceledBy>,
    ) -> Result<Appointment, DatabaseError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            UPDATE appointments SET status = ?, canceled_by = ?
            WHERE id = ?
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(status)
        .bind(canceled_by)
        .bind(appointment_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(appointment)
    }

    pub async fn set_slot(
        tx: &mut Transaction<'_, Sqlite>,
        appointment_id: i64,
        slot_id: i64,
    ) -> Result<Appointment, DatabaseError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "UPDATE appointments SET slot_id = ? WHERE id = ? RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(slot_id)
        .bind(appointment_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(appointment)
    }

    /// Any appointment row, regardless of status, counts as a reference.
    pub async fn exists_for_slot(
        tx: &mut Transaction<'_, Sqlite>,
        slot_id: i64,
    ) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM appointments WHERE slot_id = ?")
            .bind(slot_id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(count > 0)
    }

    pub async fn delete(
        tx: &mut Transaction<'_, Sqlite>,
        appointment_id: i64,
    ) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(appointment_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
