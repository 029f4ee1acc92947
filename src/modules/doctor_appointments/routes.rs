use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::modules::doctor_appointments::handlers::{
    cancel, complete, confirm, list_received, upcoming,
};

pub fn doctor_appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/doctor/appointments", get(list_received))
        .route("/doctor/appointments/upcoming", get(upcoming))
        .route("/doctor/appointments/{appointment_id}/confirm", post(confirm))
        .route("/doctor/appointments/{appointment_id}/cancel", post(cancel))
        .route(
            "/doctor/appointments/{appointment_id}/complete",
            post(complete),
        )
}
