//! Slot ledger and appointment state machine.
//!
//! Every mutation that touches a slot and an appointment together runs in a
//! single transaction. Slot holds go through the guarded UPDATE in
//! `SlotRepository::hold`, which re-validates the availability flag at write
//! time; of two concurrent bookings of the same slot, exactly one commits and
//! the other observes zero affected rows and fails with a conflict.

use sqlx::SqlitePool;
use time::UtcOffset;
use tracing::info;

use crate::db::models::{
    Appointment, AppointmentStatus, CanceledBy, DoctorProfile, NewAppointment, NewSlot, Slot,
};
use crate::db::repositories::{AppointmentRepository, SlotRepository};
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};
use crate::services::notify::notify_doctor_and_patient;

/// Create a bookable slot for a doctor. Rejects inverted intervals and any
/// overlap with an existing slot of the same doctor (half-open comparison, so
/// back-to-back slots are fine).
pub async fn create_slot(pool: &SqlitePool, doctor_id: i64, data: &NewSlot) -> AppResult<Slot> {
    let start_at = data.start_at.to_offset(UtcOffset::UTC);
    let end_at = data.end_at.to_offset(UtcOffset::UTC);

    if end_at <= start_at {
        return Err(AppError::Validation(
            "end_at must be after start_at".to_string(),
        ));
    }

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

    if SlotRepository::overlap_exists(&mut tx, doctor_id, start_at, end_at).await? {
        return Err(AppError::Conflict(
            "Slot overlaps with existing slot".to_string(),
        ));
    }

    let slot = SlotRepository::create(&mut tx, doctor_id, start_at, end_at).await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    Ok(slot)
}

/// Delete a slot owned by the calling doctor. Any referencing appointment
/// row, whatever its status, blocks the deletion; slot history is preserved
/// as long as an appointment points at it.
pub async fn delete_slot(pool: &SqlitePool, doctor: &DoctorProfile, slot_id: i64) -> AppResult<()> {
    let slot = SlotRepository::find_by_id(pool, slot_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Slot not found".to_string()))?;

    if slot.doctor_id != doctor.id {
        return Err(AppError::Authorization(
            "Slot belongs to another doctor".to_string(),
        ));
    }

    delete_slot_unchecked(pool, slot.id).await
}

/// Admin path: same appointment-reference rule, no ownership check.
pub async fn delete_slot_unchecked(pool: &SqlitePool, slot_id: i64) -> AppResult<()> {
    if SlotRepository::find_by_id(pool, slot_id).await?.is_none() {
        return Err(AppError::NotFound("Slot not found".to_string()));
    }

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

    if AppointmentRepository::exists_for_slot(&mut tx, slot_id).await? {
        return Err(AppError::Conflict(
            "Slot has an appointment and cannot be deleted".to_string(),
        ));
    }

    SlotRepository::delete(&mut tx, slot_id).await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    Ok(())
}

/// Book an available slot for a patient: hold the slot and insert the
/// PENDING appointment as one unit, then notify both parties.
pub async fn create_appointment(
    pool: &SqlitePool,
    patient_user_id: i64,
    data: &NewAppointment,
) -> AppResult<Appointment> {
    let slot = SlotRepository::find_by_id(pool, data.slot_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Slot not found".to_string()))?;

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

    if !SlotRepository::hold(&mut tx, slot.id).await? {
        return Err(AppError::Conflict("Slot is not available".to_string()));
    }

    let notes = data.notes.as_deref().unwrap_or("");
    let appointment =
        AppointmentRepository::insert(&mut tx, slot.doctor_id, patient_user_id, slot.id, notes)
            .await?;

    notify_doctor_and_patient(&mut tx, &appointment, "New appointment request (PENDING)").await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    info!(
        appointment_id = appointment.id,
        slot_id = slot.id,
        "appointment created"
    );
    Ok(appointment)
}

/// Patient-side cancel: frees the slot and records who canceled.
pub async fn cancel_by_patient(
    pool: &SqlitePool,
    patient_user_id: i64,
    appointment_id: i64,
) -> AppResult<Appointment> {
    let appointment = find_appointment(pool, appointment_id).await?;

    if appointment.patient_user_id != patient_user_id {
        return Err(AppError::Authorization(
            "Not your appointment".to_string(),
        ));
    }

    cancel(pool, appointment, CanceledBy::User, "Appointment canceled by patient").await
}

/// Doctor-side cancel: same status rules as the patient path.
pub async fn cancel_by_doctor(
    pool: &SqlitePool,
    doctor: &DoctorProfile,
    appointment_id: i64,
) -> AppResult<Appointment> {
    let appointment = find_owned_appointment(pool, doctor, appointment_id).await?;
    cancel(pool, appointment, CanceledBy::Doctor, "Appointment canceled by doctor").await
}

async fn cancel(
    pool: &SqlitePool,
    appointment: Appointment,
    canceled_by: CanceledBy,
    message: &str,
) -> AppResult<Appointment> {
    if !appointment.status.can_cancel() {
        return Err(AppError::Conflict(
            "Cannot cancel in current status".to_string(),
        ));
    }

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

    let appointment = AppointmentRepository::set_status(
        &mut tx,
        appointment.id,
        AppointmentStatus::Canceled,
        Some(canceled_by),
    )
    .await?;
    SlotRepository::free(&mut tx, appointment.slot_id).await?;
    notify_doctor_and_patient(&mut tx, &appointment, message).await?;

    tx.commit().await.map_err(DatabaseError::from)?;

    info!(appointment_id = appointment.id, ?canceled_by, "appointment canceled");
    Ok(appointment)
}

/// PENDING -> CONFIRMED, by the owning doctor only.
pub async fn confirm(
    pool: &SqlitePool,
    doctor: &DoctorProfile,
    appointment_id: i64,
) -> AppResult<Appointment> {
    let appointment = find_owned_appointment(pool, doctor, appointment_id).await?;

    if appointment.status != AppointmentStatus::Pending {
        return Err(AppError::Conflict(
            "Only PENDING appointments can be confirmed".to_string(),
        ));
    }

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;
    let appointment = AppointmentRepository::set_status(
        &mut tx,
        appointment.id,
        AppointmentStatus::Confirmed,
        None,
    )
    .await?;
    notify_doctor_and_patient(&mut tx, &appointment, "Appointment confirmed").await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    Ok(appointment)
}

/// CONFIRMED -> COMPLETED, by the owning doctor only.
pub async fn complete(
    pool: &SqlitePool,
    doctor: &DoctorProfile,
    appointment_id: i64,
) -> AppResult<Appointment> {
    let appointment = find_owned_appointment(pool, doctor, appointment_id).await?;

    if appointment.status != AppointmentStatus::Confirmed {
        return Err(AppError::Conflict(
            "Only CONFIRMED appointments can be completed".to_string(),
        ));
    }

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;
    let appointment = AppointmentRepository::set_status(
        &mut tx,
        appointment.id,
        AppointmentStatus::Completed,
        None,
    )
    .await?;
    notify_doctor_and_patient(&mut tx, &appointment, "Appointment completed").await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    Ok(appointment)
}

/// Move a PENDING appointment to a different available slot. The old slot is
/// freed and the new one held inside the same transaction.
pub async fn reschedule(
    pool: &SqlitePool,
    patient_user_id: i64,
    appointment_id: i64,
    new_slot_id: i64,
) -> AppResult<Appointment> {
    let appointment = find_appointment(pool, appointment_id).await?;

    if appointment.patient_user_id != patient_user_id {
        return Err(AppError::Authorization("Not your appointment".to_string()));
    }
    if appointment.status != AppointmentStatus::Pending {
        return Err(AppError::Conflict(
            "Only PENDING appointments can be rescheduled".to_string(),
        ));
    }
    if new_slot_id == appointment.slot_id {
        return Err(AppError::Conflict(
            "New slot must differ from the current slot".to_string(),
        ));
    }

    let new_slot = SlotRepository::find_by_id(pool, new_slot_id)
        .await?
        .ok_or_else(|| AppError::NotFound("New slot not found".to_string()))?;

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

    SlotRepository::free(&mut tx, appointment.slot_id).await?;
    if !SlotRepository::hold(&mut tx, new_slot.id).await? {
        return Err(AppError::Conflict("Slot is not available".to_string()));
    }

    let appointment = AppointmentRepository::set_slot(&mut tx, appointment.id, new_slot.id).await?;
    let message = format!("Appointment rescheduled to slot {}", new_slot.id);
    notify_doctor_and_patient(&mut tx, &appointment, &message).await?;

    tx.commit().await.map_err(DatabaseError::from)?;

    info!(
        appointment_id = appointment.id,
        new_slot_id = new_slot.id,
        "appointment rescheduled"
    );
    Ok(appointment)
}

/// Admin removal of an appointment row; the bound slot becomes available
/// again in the same transaction.
pub async fn admin_delete_appointment(pool: &SqlitePool, appointment_id: i64) -> AppResult<()> {
    let appointment = find_appointment(pool, appointment_id).await?;

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;
    SlotRepository::free(&mut tx, appointment.slot_id).await?;
    AppointmentRepository::delete(&mut tx, appointment.id).await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    Ok(())
}

async fn find_appointment(pool: &SqlitePool, appointment_id: i64) -> AppResult<Appointment> {
    AppointmentRepository::find_by_id(pool, appointment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
}

/// Ownership check for doctor-only transitions: a mismatch is Forbidden,
/// not NotFound.
async fn find_owned_appointment(
    pool: &SqlitePool,
    doctor: &DoctorProfile,
    appointment_id: i64,
) -> AppResult<Appointment> {
    let appointment = find_appointment(pool, appointment_id).await?;
    if appointment.doctor_id != doctor.id {
        return Err(AppError::Authorization(
            "Appointment belongs to another doctor".to_string(),
        ));
    }
    Ok(appointment)
}
