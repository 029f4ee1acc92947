use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::modules::appointments::handlers::{
    cancel_appointment, create_appointment, get_my_appointment, my_appointments, my_history,
    reschedule_appointment,
};

pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/appointments", post(create_appointment))
        .route("/appointments/mine", get(my_appointments))
        .route("/appointments/history", get(my_history))
        .route("/appointments/{appointment_id}", get(get_my_appointment))
        .route("/appointments/{appointment_id}/cancel", post(cancel_appointment))
        .route(
            "/appointments/{appointment_id}/reschedule",
            post(reschedule_appointment),
        )
}
