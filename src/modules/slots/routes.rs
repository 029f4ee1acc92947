use axum::{
    routing::{delete, get},
    Router,
};

use crate::app_state::AppState;
use crate::modules::slots::handlers::{
    create_slot, delete_slot, list_my_slots, list_public_slots,
};

pub fn slot_routes() -> Router<AppState> {
    Router::new()
        .route("/doctor/slots", get(list_my_slots).post(create_slot))
        .route("/doctor/slots/{slot_id}", delete(delete_slot))
        .route("/doctors/{doctor_id}/slots", get(list_public_slots))
}
