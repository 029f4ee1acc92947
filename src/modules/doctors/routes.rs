use axum::{
    routing::get,
    Router,
};

use crate::app_state::AppState;
use crate::modules::doctors::handlers::{get_my_profile, list_doctors, upsert_my_profile};

pub fn doctor_routes() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(list_doctors))
        .route("/doctor/me", get(get_my_profile).post(upsert_my_profile))
}
