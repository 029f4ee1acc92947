use axum::{routing::get, Router};

use crate::app_state::AppState;
use crate::modules::users::handlers::get_me;

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}
