use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::modules::favorites::handlers::{add_favorite, list_favorites, remove_favorite};

pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites))
        .route(
            "/favorites/doctors/{doctor_id}",
            post(add_favorite).delete(remove_favorite),
        )
}
