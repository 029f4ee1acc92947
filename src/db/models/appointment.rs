use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    /// Cancellation is only reachable from the two non-terminal states.
    pub fn can_cancel(self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }
}

/// Which party performed a cancellation, kept for audit/display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CanceledBy {
    User,
    Doctor,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_user_id: i64,
    pub slot_id: i64,
    pub status: AppointmentStatus,
    pub canceled_by: Option<CanceledBy>,
    pub notes: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct NewAppointment {
    pub slot_id: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub new_slot_id: i64,
}
