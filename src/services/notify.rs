use sqlx::{Sqlite, Transaction};

use crate::db::models::Appointment;
use crate::db::repositories::NotificationRepository;
use crate::db::DatabaseError;

/// Appends one notification for the patient and one for the identity behind
/// the doctor profile. Runs inside the caller's transaction so the records
/// commit (or roll back) together with the triggering state change.
pub async fn notify_doctor_and_patient(
    tx: &mut Transaction<'_, Sqlite>,
    appointment: &Appointment,
    message: &str,
) -> Result<(), DatabaseError> {
    NotificationRepository::create(tx, appointment.patient_user_id, message).await?;

    let doctor_user_id: Option<i64> =
        sqlx::query_scalar("SELECT user_id FROM doctor_profiles WHERE id = ?")
            .bind(appointment.doctor_id)
            .fetch_optional(&mut **tx)
            .await?;

    if let Some(doctor_user_id) = doctor_user_id {
        NotificationRepository::create(tx, doctor_user_id, message).await?;
    }

    Ok(())
}
