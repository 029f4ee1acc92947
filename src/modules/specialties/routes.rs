use axum::{routing::get, Router};

use crate::app_state::AppState;
use crate::modules::specialties::handlers::{create_specialty, list_specialties};

pub fn specialty_routes() -> Router<AppState> {
    Router::new().route("/specialties", get(list_specialties).post(create_specialty))
}
