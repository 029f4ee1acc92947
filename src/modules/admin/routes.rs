use axum::{
    routing::{delete, get, patch},
    Router,
};

use crate::app_state::AppState;
use crate::modules::admin::handlers::{
    create_specialty, delete_appointment, delete_doctor, delete_review, delete_slot,
    delete_specialty, delete_user, list_appointments, list_doctor_slots, list_doctors,
    list_reviews, list_specialties, list_users, rename_specialty, set_doctor_active,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{user_id}", delete(delete_user))
        .route("/specialties", get(list_specialties).post(create_specialty))
        .route(
            "/specialties/{specialty_id}",
            delete(delete_specialty).put(rename_specialty),
        )
        .route("/doctors", get(list_doctors))
        .route("/doctors/{doctor_id}/active", patch(set_doctor_active))
        .route("/doctors/{doctor_id}", delete(delete_doctor))
        .route("/doctors/{doctor_id}/slots", get(list_doctor_slots))
        .route("/slots/{slot_id}", delete(delete_slot))
        .route("/appointments", get(list_appointments))
        .route("/appointments/{appointment_id}", delete(delete_appointment))
        .route("/reviews", get(list_reviews))
        .route("/reviews/{review_id}", delete(delete_review))
}
